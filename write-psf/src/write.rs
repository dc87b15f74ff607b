use types::ScalarLE;

use crate::validate::{Validate, ValidationReport};

/// A type that that can be written out as part of a font file.
///
/// All multi-byte values in a PSF file are little-endian.
pub trait FontWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// A buffer that tables are serialized into.
///
/// PSF files have no offsets: each part of the file immediately follows the
/// previous one, so writing is a single pass.
#[derive(Debug, Default)]
pub struct TableWriter {
    bytes: Vec<u8>,
}

/// Attempt to serialize a table.
///
/// If the table is malformed, this will return an Err([`ValidationReport`]),
/// otherwise it will return the bytes encoding the table.
pub fn dump_table<T: FontWrite + Validate>(table: &T) -> Result<Vec<u8>, ValidationReport> {
    table.validate()?;
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    Ok(writer.into_data())
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in little-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes)
    }

    /// Write `count` zero bytes.
    pub fn pad(&mut self, count: usize) {
        self.bytes.resize(self.bytes.len() + count, 0);
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_data(self) -> Vec<u8> {
        self.bytes
    }
}

macro_rules! write_le_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(self.to_raw_le().as_ref())
            }
        }
    };
}

write_le_bytes!(u8);
write_le_bytes!(u16);
write_le_bytes!(u32);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite> FontWrite for Option<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        if let Some(inner) = self {
            inner.write_into(writer)
        }
    }
}

//! A little-endian byte buffer for assembling test fonts

use std::ops::Deref;

use psf_types::ScalarLE;

/// A buffer that scalars can be pushed onto in little-endian order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeBuffer {
    data: Vec<u8>,
}

impl LeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar.
    pub fn push(mut self, item: impl ScalarLE) -> Self {
        self.data.extend_from_slice(item.to_raw_le().as_ref());
        self
    }

    /// Append each scalar in `iter`.
    pub fn extend<T: ScalarLE>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend_from_slice(item.to_raw_le().as_ref());
        }
        self
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }
}

impl Deref for LeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl AsRef<[u8]> for LeBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<LeBuffer> for Vec<u8> {
    fn from(src: LeBuffer) -> Vec<u8> {
        src.data
    }
}

/// Build a [`LeBuffer`] from a list of items.
///
/// Each item is one of:
///
/// - a typed literal, such as `0x36u8` or `32u32`;
/// - a parenthesized expression evaluating to a scalar, such as `(mode)`;
/// - a bracketed list of scalars of the same type, such as `[0x36u8, 0x04]`.
#[macro_export]
macro_rules! le_buffer {
    ( $( $x:tt ),* $(,)? ) => {{
        let buf = $crate::lebuffer::LeBuffer::new();
        $( let buf = $crate::le_buffer_add!(buf, $x); )*
        buf
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! le_buffer_add {
    ($b:ident, $v:literal) => {
        $b.push($v)
    };
    ($b:ident, [$($v:expr),* $(,)?]) => {
        $b.extend([$($v),*])
    };
    ($b:ident, ($v:expr)) => {
        $b.push($v)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn mixed_items() {
        let count = 2u32;
        let buf = le_buffer!([0x36u8, 0x04], 0x0102u16, (count), 0xFFu8);
        assert_eq!(&*buf, &[0x36, 0x04, 0x02, 0x01, 2, 0, 0, 0, 0xFF]);
    }
}

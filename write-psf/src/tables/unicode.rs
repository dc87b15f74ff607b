//! Encoding the unicode table

use read::UnicodeEntry;
use types::{FormatVersion, PSF1_SEPARATOR, PSF1_START_SEQ, PSF2_SEPARATOR, PSF2_START_SEQ};

use crate::{
    validate::{Validate, ValidationCtx},
    FontWrite, TableWriter,
};

/// A unicode table, ready to be written in a particular format version.
///
/// The entries are borrowed from the font being written.
#[derive(Clone, Copy, Debug)]
pub struct UnicodeTable<'a> {
    pub version: FormatVersion,
    pub entries: &'a [UnicodeEntry],
}

impl<'a> UnicodeTable<'a> {
    pub fn new(version: FormatVersion, entries: &'a [UnicodeEntry]) -> Self {
        UnicodeTable { version, entries }
    }
}

/// Whether `c` can't be stored in a version 1 table, where it is a marker.
///
/// The version 2 markers are bytes that never occur in UTF-8, so every
/// codepoint can be stored there.
pub fn is_reserved_in_v1(c: char) -> bool {
    c as u32 == PSF1_START_SEQ as u32 || c as u32 == PSF1_SEPARATOR as u32
}

/// Whether any codepoint in `entries` can't be stored in a version 1 table.
pub fn has_v1_reserved(entries: &[UnicodeEntry]) -> bool {
    entries.iter().any(|entry| {
        entry
            .codepoints
            .iter()
            .chain(entry.sequences.iter().flatten())
            .any(|c| is_reserved_in_v1(*c))
    })
}

fn write_char(c: char, version: FormatVersion, writer: &mut TableWriter) {
    match version {
        FormatVersion::V1 => {
            let mut buf = [0u16; 2];
            c.encode_utf16(&mut buf).write_into(writer);
        }
        FormatVersion::V2 => {
            let mut buf = [0u8; 4];
            writer.write_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
}

fn write_marker(v1: u16, v2: u8, version: FormatVersion, writer: &mut TableWriter) {
    match version {
        FormatVersion::V1 => v1.write_into(writer),
        FormatVersion::V2 => v2.write_into(writer),
    }
}

fn write_entry(entry: &UnicodeEntry, version: FormatVersion, writer: &mut TableWriter) {
    for c in &entry.codepoints {
        write_char(*c, version, writer);
    }
    for sequence in &entry.sequences {
        write_marker(PSF1_START_SEQ, PSF2_START_SEQ, version, writer);
        for c in sequence {
            write_char(*c, version, writer);
        }
    }
    write_marker(PSF1_SEPARATOR, PSF2_SEPARATOR, version, writer);
}

impl FontWrite for UnicodeTable<'_> {
    fn write_into(&self, writer: &mut TableWriter) {
        for entry in self.entries {
            write_entry(entry, self.version, writer);
        }
    }
}

fn validate_entry(entry: &UnicodeEntry, version: FormatVersion, ctx: &mut ValidationCtx) {
    let reserved = |c: &&char| version == FormatVersion::V1 && is_reserved_in_v1(**c);
    ctx.in_field("codepoints", |ctx| {
        if let Some(c) = entry.codepoints.iter().find(reserved) {
            ctx.report(format!("U+{:04X} is a marker in {version}", *c as u32));
        }
    });
    ctx.in_field("sequences", |ctx| {
        if entry.sequences.iter().any(Vec::is_empty) {
            ctx.report("combining sequences must not be empty");
        }
        if let Some(c) = entry.sequences.iter().flatten().find(reserved) {
            ctx.report(format!("U+{:04X} is a marker in {version}", *c as u32));
        }
    });
}

impl Validate for UnicodeTable<'_> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("UnicodeTable", |ctx| {
            ctx.in_field("entries", |ctx| {
                ctx.in_array(|ctx| {
                    for entry in self.entries {
                        ctx.array_item(|ctx| validate_entry(entry, self.version, ctx))
                    }
                })
            })
        })
    }
}

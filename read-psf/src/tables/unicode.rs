//! The unicode table
//!
//! When the header says so, the glyph bitmaps are followed by one entry per
//! glyph, describing which characters that glyph can render. Each entry has
//! the form
//!
//! ```text
//! <uc>* (<ss> <uc>+)* <term>
//! ```
//!
//! where `<uc>` is a codepoint, `<ss>` starts a combining sequence and
//! `<term>` ends the entry. In version 1 codepoints are UTF-16LE code units
//! and the markers are `0xFFFE` and `0xFFFF`; in version 2 codepoints are
//! UTF-8 and the markers are the bytes `0xFE` and `0xFF`.
//!
//! Both marker values are unicode noncharacters (and, as single bytes, can
//! never occur in UTF-8) so they are never mistaken for text.

use types::{FormatVersion, PSF1_SEPARATOR, PSF1_START_SEQ, PSF2_SEPARATOR, PSF2_START_SEQ};

use crate::{
    font_data::Cursor,
    read::{FontReadWithArgs, ReadArgs},
    FontData, ReadError,
};

/// The characters mapped to a single glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnicodeEntry {
    /// Characters this glyph renders on its own.
    pub codepoints: Vec<char>,
    /// Sequences of characters (usually a base character followed by
    /// combining marks) that this glyph renders as a whole.
    ///
    /// Every sequence is non-empty.
    pub sequences: Vec<Vec<char>>,
}

impl UnicodeEntry {
    /// An entry with only direct codepoints.
    pub fn new(codepoints: impl IntoIterator<Item = char>) -> Self {
        UnicodeEntry {
            codepoints: codepoints.into_iter().collect(),
            sequences: Vec::new(),
        }
    }

    /// Add a combining sequence to this entry.
    pub fn with_sequence(mut self, sequence: impl IntoIterator<Item = char>) -> Self {
        self.sequences.push(sequence.into_iter().collect());
        self
    }

    /// `true` if this entry maps no characters at all.
    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty() && self.sequences.is_empty()
    }
}

/// Everything the unicode table needs to know from the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnicodeTableArgs {
    pub version: FormatVersion,
    pub glyph_count: u32,
}

/// A decoded unicode table.
#[derive(Clone, Debug)]
pub struct UnicodeTable<'a> {
    version: FormatVersion,
    entries: Vec<UnicodeEntry>,
    trailing: FontData<'a>,
}

impl ReadArgs for UnicodeTable<'_> {
    type Args = UnicodeTableArgs;
}

impl<'a> FontReadWithArgs<'a> for UnicodeTable<'a> {
    /// Decode exactly `glyph_count` entries from `data`.
    ///
    /// `data` should begin immediately after the glyph table. Anything left
    /// after the last entry is kept, unparsed, as [`trailing_bytes`].
    ///
    /// [`trailing_bytes`]: UnicodeTable::trailing_bytes
    fn read_with_args(data: FontData<'a>, args: &UnicodeTableArgs) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let entries = (0..args.glyph_count)
            .map(|_| read_entry(&mut cursor, args.version))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UnicodeTable {
            version: args.version,
            entries,
            trailing: cursor.finish(),
        })
    }
}

impl<'a> UnicodeTable<'a> {
    /// The revision this table was encoded with.
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// The number of entries, which is always the number of glyphs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for the glyph at `index`.
    pub fn get(&self, index: usize) -> Option<&UnicodeEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[UnicodeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnicodeEntry> + '_ {
        self.entries.iter()
    }

    /// The index of the first glyph that renders `c` on its own.
    pub fn glyph_for_char(&self, c: char) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.codepoints.contains(&c))
    }

    /// Bytes after the last entry's terminator.
    ///
    /// These are tolerated but carry no meaning.
    pub fn trailing_bytes(&self) -> &'a [u8] {
        self.trailing.as_bytes()
    }

    pub fn into_entries(self) -> Vec<UnicodeEntry> {
        self.entries
    }
}

enum Token {
    Char(char),
    StartSeq,
    Separator,
}

fn malformed(version: FormatVersion, offset: usize, reason: &'static str) -> ReadError {
    ReadError::MalformedUnicodeTable {
        version,
        offset,
        reason,
    }
}

fn read_entry(cursor: &mut Cursor, version: FormatVersion) -> Result<UnicodeEntry, ReadError> {
    let mut entry = UnicodeEntry::default();
    let mut sequence: Option<Vec<char>> = None;
    loop {
        let offset = cursor.file_offset();
        let token = match version {
            FormatVersion::V1 => next_utf16_token(cursor)?,
            FormatVersion::V2 => next_utf8_token(cursor)?,
        };
        match token {
            Token::Char(c) => match sequence.as_mut() {
                Some(sequence) => sequence.push(c),
                None => entry.codepoints.push(c),
            },
            Token::StartSeq => {
                if let Some(done) = sequence.replace(Vec::new()) {
                    push_sequence(&mut entry, done, version, offset)?;
                }
            }
            Token::Separator => {
                if let Some(done) = sequence.take() {
                    push_sequence(&mut entry, done, version, offset)?;
                }
                return Ok(entry);
            }
        }
    }
}

fn push_sequence(
    entry: &mut UnicodeEntry,
    sequence: Vec<char>,
    version: FormatVersion,
    offset: usize,
) -> Result<(), ReadError> {
    if sequence.is_empty() {
        return Err(malformed(version, offset, "empty combining sequence"));
    }
    entry.sequences.push(sequence);
    Ok(())
}

const MISSING_ENTRIES: &str = "table ends before every glyph has an entry";

fn next_utf16_token(cursor: &mut Cursor) -> Result<Token, ReadError> {
    const V1: FormatVersion = FormatVersion::V1;
    let offset = cursor.file_offset();
    if cursor.is_empty() {
        return Err(malformed(V1, offset, MISSING_ENTRIES));
    }
    let unit: u16 = cursor
        .read()
        .map_err(|_| malformed(V1, offset, "odd number of bytes in UTF-16 table"))?;
    match unit {
        PSF1_SEPARATOR => Ok(Token::Separator),
        PSF1_START_SEQ => Ok(Token::StartSeq),
        0xD800..=0xDBFF => {
            let low: u16 = cursor
                .read()
                .map_err(|_| malformed(V1, offset, "truncated surrogate pair"))?;
            char::decode_utf16([unit, low])
                .next()
                .and_then(Result::ok)
                .map(Token::Char)
                .ok_or_else(|| malformed(V1, offset, "unpaired surrogate"))
        }
        _ => char::from_u32(unit as u32)
            .map(Token::Char)
            .ok_or_else(|| malformed(V1, offset, "unpaired surrogate")),
    }
}

fn next_utf8_token(cursor: &mut Cursor) -> Result<Token, ReadError> {
    const V2: FormatVersion = FormatVersion::V2;
    let offset = cursor.file_offset();
    if cursor.is_empty() {
        return Err(malformed(V2, offset, MISSING_ENTRIES));
    }
    let lead: u8 = cursor.read()?;
    let len = match lead {
        PSF2_SEPARATOR => return Ok(Token::Separator),
        PSF2_START_SEQ => return Ok(Token::StartSeq),
        0x00..=0x7F => return Ok(Token::Char(lead as char)),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Err(malformed(V2, offset, "invalid UTF-8 lead byte")),
    };
    let tail = cursor
        .read_bytes(len - 1)
        .map_err(|_| malformed(V2, offset, "truncated UTF-8 sequence"))?;
    let mut buf = [lead, 0, 0, 0];
    buf[1..len].copy_from_slice(tail);
    std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .map(Token::Char)
        .ok_or_else(|| malformed(V2, offset, "invalid UTF-8 sequence"))
}

//! pretty printing implementation

use std::io::Write;

use ansi_term::{Color, Style};
use read_psf::{GlyphRef, GlyphTable, Header, PsfRef, UnicodeEntry};

pub struct Printer<W> {
    is_tty: bool,
    writer: W,
}

impl Printer<std::io::StdoutLock<'static>> {
    pub fn stdout() -> Self {
        Printer::new(std::io::stdout().lock(), atty::is(atty::Stream::Stdout))
    }
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W, is_tty: bool) -> Self {
        Printer { is_tty, writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn print_with_style(
        &mut self,
        style: Style,
        f: impl FnOnce(&mut W) -> std::io::Result<()>,
    ) -> std::io::Result<()> {
        if !self.is_tty {
            return f(&mut self.writer);
        }
        write!(self.writer, "{}", style.prefix())?;
        f(&mut self.writer)?;
        write!(self.writer, "{}", style.suffix())
    }

    fn print_field(&mut self, name: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
        self.print_with_style(Color::Cyan.into(), |w| write!(w, "{name:>14}"))?;
        writeln!(self.writer, ": {value}")
    }

    pub fn print_info(&mut self, font: &PsfRef) -> std::io::Result<()> {
        let header = font.header();
        self.print_field("format", font.format_version())?;
        let fields: Vec<(&str, u32)> = match header {
            Header::V1(v1) => v1.fields().to_vec(),
            Header::V2(v2) => v2.fields().to_vec(),
        };
        for (name, value) in fields {
            self.print_field(name, format_args!("{value} (0x{value:X})"))?;
        }
        self.print_field("glyphs", header.glyph_count())?;
        self.print_field(
            "glyph size",
            format_args!(
                "{}x{} pixels, {} bytes",
                font.width(),
                font.height(),
                header.glyph_size()
            ),
        )?;
        match font.unicode_table() {
            Some(table) => {
                self.print_field("unicode table", format_args!("{} entries", table.len()))?;
                let trailing = table.trailing_bytes().len();
                if trailing > 0 {
                    self.print_field("trailing bytes", trailing)?;
                }
            }
            None => self.print_field("unicode table", "none")?,
        }
        Ok(())
    }

    /// Draw a glyph, one line per row.
    pub fn print_glyph(&mut self, glyph: &GlyphRef) -> std::io::Result<()> {
        for y in 0..glyph.height() {
            self.print_row(glyph, y)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Draw every glyph, `columns` to a band, labelled with the index of the
    /// first glyph in the band.
    pub fn print_grid(&mut self, glyphs: &GlyphTable, columns: usize) -> std::io::Result<()> {
        let glyphs: Vec<_> = glyphs.iter().collect();
        for (band, chunk) in glyphs.chunks(columns.max(1)).enumerate() {
            let height = chunk.first().map_or(0, GlyphRef::height);
            for y in 0..height {
                if y == 0 {
                    let first = band * columns.max(1);
                    self.print_with_style(Style::new().dimmed(), |w| write!(w, "{first:#06x}"))?;
                } else {
                    write!(self.writer, "      ")?;
                }
                for glyph in chunk {
                    write!(self.writer, " ")?;
                    self.print_row(glyph, y)?;
                }
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    fn print_row(&mut self, glyph: &GlyphRef, y: u32) -> std::io::Result<()> {
        let set_style = Style::new().bold().fg(Color::Yellow);
        for x in 0..glyph.width() {
            if glyph.pixel(x, y) {
                self.print_with_style(set_style, |w| w.write_all(b"#"))?;
            } else {
                self.writer.write_all(b".")?;
            }
        }
        Ok(())
    }

    /// Print the characters mapped to the glyph at `index`.
    pub fn print_entry(&mut self, index: usize, entry: &UnicodeEntry) -> std::io::Result<()> {
        write!(self.writer, "{index:#05x}:")?;
        if entry.is_empty() {
            self.print_with_style(Style::new().dimmed(), |w| w.write_all(b" (none)"))?;
        }
        for c in &entry.codepoints {
            write!(self.writer, " {}", CharRepr(*c))?;
        }
        for sequence in &entry.sequences {
            self.print_with_style(Color::Purple.into(), |w| w.write_all(b" seq"))?;
            write!(self.writer, " [")?;
            for (i, c) in sequence.iter().enumerate() {
                if i != 0 {
                    write!(self.writer, " ")?;
                }
                write!(self.writer, "{}", CharRepr(*c))?;
            }
            write!(self.writer, "]")?;
        }
        writeln!(self.writer)
    }
}

/// `U+0041 'A'`, leaving out the glyph for control characters.
struct CharRepr(char);

impl std::fmt::Display for CharRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U+{:04X}", self.0 as u32)?;
        if !self.0.is_control() {
            write!(f, " '{}'", self.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use psf_test_data::psf2;

    fn printed(f: impl FnOnce(&mut Printer<Vec<u8>>) -> std::io::Result<()>) -> String {
        let mut printer = Printer::new(Vec::new(), false);
        f(&mut printer).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn glyph_art() {
        let data = psf2::wide_glyphs();
        let font = PsfRef::new(&data).unwrap();
        let glyph = font.glyph(0).unwrap();
        let text = printed(|p| p.print_glyph(&glyph));
        assert_eq!(text, "#.......#\n.......#.\n");
    }

    #[test]
    fn grid() {
        let data = psf2::wide_glyphs();
        let font = PsfRef::new(&data).unwrap();
        let text = printed(|p| p.print_grid(&font.glyphs(), 16));
        assert_eq!(
            text,
            "0x0000 #.......# #########\n       .......#. #########\n"
        );
        let text = printed(|p| p.print_grid(&font.glyphs(), 1));
        assert_eq!(
            text,
            "0x0000 #.......#\n       .......#.\n0x0001 #########\n       #########\n"
        );
    }

    #[test]
    fn entries() {
        let entry = UnicodeEntry::new(['A', '\n']).with_sequence(['e', '\u{301}']);
        let text = printed(|p| p.print_entry(0x41, &entry));
        assert_eq!(
            text,
            "0x041: U+0041 'A' U+000A seq [U+0065 'e' U+0301 '\u{301}']\n"
        );
        let text = printed(|p| p.print_entry(2, &UnicodeEntry::default()));
        assert_eq!(text, "0x002: (none)\n");
    }

    #[test]
    fn info() {
        let data = psf2::two_glyphs();
        let font = PsfRef::new(&data).unwrap();
        let text = printed(|p| p.print_info(&font));
        assert!(text.contains("        format: PSF2\n"), "{text}");
        assert!(text.contains("    headersize: 32 (0x20)\n"), "{text}");
        assert!(text.contains("unicode table: 2 entries\n"), "{text}");
    }
}

//! Inspect, convert and edit PSF console fonts.
//!
//! ```text
//! psfexplorer info default8x16.psf
//! psfexplorer show default8x16.psf 65
//! psfexplorer show default8x16.psf --char é
//! psfexplorer grid default8x16.psf --columns 32
//! psfexplorer convert default8x16.psf --format 2
//! psfexplorer set-glyph default8x16.psf 95 underscore.txt -o edited.psf
//! ```

use std::path::Path;

use psf_types::FormatVersion;
use read_psf::PsfRef;
use write_psf::Font;

mod art;
mod print;

use print::Printer;

fn main() -> Result<(), Error> {
    let args = flags::Args::from_env().map_err(|e| Error(e.to_string()))?;
    init_logging(args.verbose);
    match args.subcommand {
        flags::ArgsCmd::Info(cmd) => {
            let bytes = read_input(&cmd.input)?;
            let font = PsfRef::new(&bytes).map_err(Error::new)?;
            Printer::stdout().print_info(&font).map_err(Error::new)
        }
        flags::ArgsCmd::Show(cmd) => {
            let bytes = read_input(&cmd.input)?;
            let font = PsfRef::new(&bytes).map_err(Error::new)?;
            let index = glyph_index(&font, cmd.index, cmd.char)?;
            let glyph = font.glyph(index).map_err(Error::new)?;
            let entry = font.unicode_table().and_then(|table| table.get(index));
            let mut printer = Printer::stdout();
            printer.print_glyph(&glyph).map_err(Error::new)?;
            if let Some(entry) = entry {
                printer.print_entry(index, entry).map_err(Error::new)?;
            }
            Ok(())
        }
        flags::ArgsCmd::Grid(cmd) => {
            let bytes = read_input(&cmd.input)?;
            let font = PsfRef::new(&bytes).map_err(Error::new)?;
            let columns = cmd.columns.unwrap_or(16);
            Printer::stdout()
                .print_grid(&font.glyphs(), columns)
                .map_err(Error::new)
        }
        flags::ArgsCmd::Unicode(cmd) => {
            let bytes = read_input(&cmd.input)?;
            let font = PsfRef::new(&bytes).map_err(Error::new)?;
            let table = font
                .unicode_table()
                .ok_or_else(|| Error::new("font has no unicode table"))?;
            let mut printer = Printer::stdout();
            for (index, entry) in table.iter().enumerate() {
                printer.print_entry(index, entry).map_err(Error::new)?;
            }
            Ok(())
        }
        flags::ArgsCmd::Convert(cmd) => {
            let font = Font::open(&cmd.input).map_err(Error::new)?;
            let version = cmd.format.map(FormatArg::into_inner);
            save(&font, &cmd.input, cmd.output.as_deref(), version)
        }
        flags::ArgsCmd::SetGlyph(cmd) => {
            let mut font = Font::open(&cmd.input).map_err(Error::new)?;
            let text = std::fs::read_to_string(&cmd.art)
                .map_err(|e| Error(format!("failed to read '{}': {e}", cmd.art.display())))?;
            let raster = art::parse(&text, font.width(), font.height())?;
            font.replace_glyph(cmd.index, raster).map_err(Error::new)?;
            save(&font, &cmd.input, cmd.output.as_deref(), None)
        }
    }
}

fn init_logging(verbosity: u32) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// The glyph picked on the command line, by index or by the character it draws.
fn glyph_index(font: &PsfRef, index: Option<usize>, c: Option<char>) -> Result<usize, Error> {
    match (index, c) {
        (Some(index), None) => Ok(index),
        (None, Some(c)) => font
            .unicode_table()
            .ok_or_else(|| Error::new("font has no unicode table"))?
            .glyph_for_char(c)
            .ok_or_else(|| Error(format!("no glyph for U+{:04X}", c as u32))),
        _ => Err(Error::new("give either a glyph index or --char")),
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| Error(format!("failed to read '{}': {e}", path.display())))
}

/// Write to `output` if given, otherwise next to `input` without overwriting.
fn save(
    font: &Font,
    input: &Path,
    output: Option<&Path>,
    version: Option<FormatVersion>,
) -> Result<(), Error> {
    let version = version.unwrap_or_else(|| font.preferred_version());
    let path = match output {
        Some(path) => {
            font.save(path, Some(version)).map_err(Error::new)?;
            path.to_owned()
        }
        None => font
            .save_derived(input, Some(version))
            .map_err(Error::new)?,
    };
    log::info!("saved {version} font to '{}'", path.display());
    println!("{}", path.display());
    Ok(())
}

/// A format version given on the command line.
#[derive(Clone, Copy, Debug)]
struct FormatArg(FormatVersion);

impl FormatArg {
    fn into_inner(self) -> FormatVersion {
        self.0
    }
}

impl std::str::FromStr for FormatArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(FormatArg)
            .map_err(|_| format!("invalid format '{s}', expected 1 or 2"))
    }
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use super::FormatArg;
    use std::path::PathBuf;

    xflags::xflags! {
        /// Inspect, convert and edit PSF console fonts
        cmd args {
            /// Log more; repeat for more detail
            repeated -v, --verbose

            /// Print the header and geometry of a font
            cmd info {
                required input: PathBuf
            }

            /// Draw one glyph and list the characters it maps to
            cmd show {
                required input: PathBuf
                optional index: usize
                /// Pick the glyph that draws this character
                optional -c, --char char: char
            }

            /// Draw every glyph in a grid
            cmd grid {
                required input: PathBuf
                /// Glyphs per line (default 16)
                optional --columns columns: usize
            }

            /// List the unicode table
            cmd unicode {
                required input: PathBuf
            }

            /// Re-encode a font, by default next to the input
            cmd convert {
                required input: PathBuf
                /// Write here, replacing any existing file
                optional -o, --output output: PathBuf
                /// Format version to write (1 or 2)
                optional --format format: FormatArg
            }

            /// Replace one glyph with text art ('#' or '0' set, '.' clear)
            cmd set-glyph {
                required input: PathBuf
                required index: usize
                required art: PathBuf
                /// Write here, replacing any existing file
                optional -o, --output output: PathBuf
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psf_test_data::{psf1, psf2};

    #[test]
    fn pick_glyph() {
        let data = psf2::two_glyphs();
        let font = PsfRef::new(&data).unwrap();
        assert_eq!(glyph_index(&font, Some(1), None).unwrap(), 1);
        assert_eq!(glyph_index(&font, None, Some('B')).unwrap(), 1);
        assert!(glyph_index(&font, None, Some('Z')).is_err());
        assert!(glyph_index(&font, None, None).is_err());
        assert!(glyph_index(&font, Some(0), Some('A')).is_err());

        let data = psf1::plain_8x8();
        let font = PsfRef::new(&data).unwrap();
        assert!(glyph_index(&font, None, Some('A')).is_err());
    }
}

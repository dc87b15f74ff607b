//! Saving fonts to disk.

use std::path::Path;

use psf_test_data::{psf1, psf2};
use read_psf::{types::FormatVersion, PsfRef, UnicodeEntry};
use rstest::rstest;
use tempfile::{Builder, TempDir};
use write_psf::{Error, Font};

fn temp_dir() -> TempDir {
    let _ = env_logger::builder().is_test(true).try_init();
    Builder::new().prefix("write_psf_test").tempdir().unwrap()
}

fn write_source(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

#[rstest]
#[case::psf1_plain(psf1::plain_8x8().to_vec())]
#[case::psf1_table(psf1::counting_with_table().to_vec())]
#[case::psf1_512(psf1::five_twelve_8x16().to_vec())]
#[case::psf2_table(psf2::two_glyphs().to_vec())]
#[case::psf2_wide(psf2::wide_glyphs().to_vec())]
#[case::psf2_sequences(psf2::sequences().to_vec())]
fn open_save_open(#[case] data: Vec<u8>) {
    let dir = temp_dir();
    let source = write_source(dir.path(), "font.psf", &data);
    let font = Font::open(&source).unwrap();
    for version in [None, Some(FormatVersion::V2)] {
        let out = dir.path().join("out.psf");
        font.save(&out, version).unwrap();
        let reloaded = Font::open(&out).unwrap();
        assert_eq!(reloaded.width(), font.width());
        assert_eq!(reloaded.height(), font.height());
        assert!(reloaded.glyphs().iter().eq(font.glyphs().iter()));
        assert_eq!(reloaded.unicode_table(), font.unicode_table());
    }
}

#[test]
fn explicit_version_violation_writes_nothing() {
    let dir = temp_dir();
    let font = Font::load(&psf2::wide_glyphs()).unwrap();
    let out = dir.path().join("never.psf");
    let err = font.save(&out, Some(FormatVersion::V1)).unwrap_err();
    assert!(matches!(
        err,
        Error::VersionConstraintViolated {
            version: FormatVersion::V1,
            ..
        }
    ));
    assert!(!out.exists());

    let err = font
        .save_derived(dir.path().join("wide.psf"), Some(FormatVersion::V1))
        .unwrap_err();
    assert!(matches!(err, Error::VersionConstraintViolated { .. }));
    assert!(!dir.path().join("wide.psf1.psf").exists());
}

#[test]
fn failed_save_keeps_existing_file() {
    let dir = temp_dir();
    let out = write_source(dir.path(), "keep.psf", b"precious");
    let mut font = Font::load(&psf1::plain_8x8()).unwrap();
    let mut table = vec![UnicodeEntry::default(); 256];
    table[0] = UnicodeEntry::default().with_sequence(Vec::new());
    font.set_unicode_table(Some(table)).unwrap();
    assert!(matches!(
        font.save(&out, None),
        Err(Error::ValidationFailed(_))
    ));
    assert_eq!(std::fs::read(&out).unwrap(), b"precious");
}

#[test]
fn explicit_path_overwrites() {
    let dir = temp_dir();
    let out = write_source(dir.path(), "out.psf", b"old contents");
    let font = Font::load(&psf2::two_glyphs()).unwrap();
    font.save(&out, None).unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), psf2::two_glyphs().to_vec());
}

#[test]
fn derived_path_never_overwrites() {
    let dir = temp_dir();
    let source = write_source(dir.path(), "console.psf", &psf1::plain_8x8());
    let font = Font::open(&source).unwrap();

    let first = font.save_derived(&source, None).unwrap();
    assert_eq!(first, dir.path().join("console.psf1.psf"));
    assert_eq!(std::fs::read(&first).unwrap(), psf1::plain_8x8().to_vec());

    let mut edited = font.clone();
    edited.replace_glyph(0, vec![0xFF; 8]).unwrap();
    match edited.save_derived(&source, None) {
        Err(Error::FileExists(path)) => assert_eq!(path, first),
        other => panic!("expected FileExists, got {other:?}"),
    }
    // still the original
    assert_eq!(std::fs::read(&first).unwrap(), psf1::plain_8x8().to_vec());

    let second = edited
        .save_derived(&source, Some(FormatVersion::V2))
        .unwrap();
    assert_eq!(second, dir.path().join("console.psf2.psf"));
    let data = std::fs::read(&second).unwrap();
    let reloaded = PsfRef::new(&data).unwrap();
    assert_eq!(reloaded.format_version(), FormatVersion::V2);
    assert_eq!(reloaded.glyph(0).unwrap().bytes(), &[0xFF; 8]);
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn failed_write_leaves_no_partial_file() {
    let dir = temp_dir();
    let font = Font::load(&psf2::two_glyphs()).unwrap();

    // a directory can't be replaced by a file
    let target = dir.path().join("taken.psf");
    std::fs::create_dir(&target).unwrap();
    assert!(matches!(font.save(&target, None), Err(Error::Io(_))));
    assert!(target.is_dir());
    assert_eq!(file_names(dir.path()), ["taken.psf"]);

    let source = write_source(dir.path(), "font.psf", b"source");
    let derived = write_source(dir.path(), "font.psf2.psf", b"keep me");
    assert!(matches!(
        font.save_derived(&source, None),
        Err(Error::FileExists(_))
    ));
    assert_eq!(std::fs::read(&derived).unwrap(), b"keep me");
    assert_eq!(
        file_names(dir.path()),
        ["font.psf", "font.psf2.psf", "taken.psf"]
    );

    font.save(&source, None).unwrap();
    assert_eq!(std::fs::read(&source).unwrap(), psf2::two_glyphs().to_vec());
    assert_eq!(
        file_names(dir.path()),
        ["font.psf", "font.psf2.psf", "taken.psf"]
    );
}

#[test]
fn open_missing_file() {
    let dir = temp_dir();
    assert!(matches!(
        Font::open(dir.path().join("missing.psf")),
        Err(Error::Io(_))
    ));
}

//! End-to-end tests: sprite-library file -> text stream -> sprinkled output.

use std::io::{Cursor, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::NamedTempFile;

use core_sprites::ArtParser;

const SPRITE_LIBRARY: &str = "\
##margin=0

AA
AA

##margin=0
##mirror_x: bd

b
";

fn write_sprite_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn sample_text() -> String {
    let mut lines = Vec::new();
    for i in 0..30 {
        lines.push(format!("line {i:>3} of the document, otherwise unremarkable."));
    }
    lines.join("\n") + "\n"
}

#[test]
fn loads_a_sprite_library_file_from_disk() {
    let file = write_sprite_file(SPRITE_LIBRARY);
    let arts = ArtParser::parse(std::io::BufReader::new(
        std::fs::File::open(file.path()).unwrap(),
    ))
    .unwrap();
    // "AA/AA", the explicit "b", and "b"'s mirror_x variant "d".
    assert_eq!(arts.len(), 3);
}

#[test]
fn invalid_sprite_file_reports_the_offending_line() {
    let file = write_sprite_file("##bogus=1\nX\n");
    let err = ArtParser::parse(std::io::BufReader::new(
        std::fs::File::open(file.path()).unwrap(),
    ))
    .unwrap_err();
    assert_eq!(err.lineno, 1);
    assert!(err.message.contains("Unknown command"));
}

#[test]
fn sprinkling_preserves_every_input_line() {
    let file = write_sprite_file(SPRITE_LIBRARY);
    let arts = ArtParser::parse(std::io::BufReader::new(
        std::fs::File::open(file.path()).unwrap(),
    ))
    .unwrap();

    let text = sample_text();
    let mut rng = StdRng::seed_from_u64(42);
    let mut out = Vec::new();
    sprinkle_bin::run(Cursor::new(text.as_bytes()), &mut out, &arts, 80, &mut rng).unwrap();

    let output = String::from_utf8(out).unwrap();
    assert_eq!(output.lines().count(), 30);
    for (i, line) in output.lines().enumerate() {
        assert!(line.contains(&format!("line {i:>3}")));
    }
}

#[test]
fn same_seed_produces_identical_output() {
    let file = write_sprite_file(SPRITE_LIBRARY);
    let arts = ArtParser::parse(std::io::BufReader::new(
        std::fs::File::open(file.path()).unwrap(),
    ))
    .unwrap();
    let text = sample_text();

    let run_once = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut out = Vec::new();
        sprinkle_bin::run(Cursor::new(text.as_bytes()), &mut out, &arts, 80, &mut rng).unwrap();
        out
    };

    assert_eq!(run_once(99), run_once(99));
}

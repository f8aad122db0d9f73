//! Driver loop: read a text stream, sprinkle sprites into its blank
//! rectangles, write the result (spec.md §5, §6).

use std::io::{BufRead, Write};

use rand::Rng;

use core_blank::BlankFinder;
use core_canvas::{Canvas, expand_tabs};
use core_place::sprinkle_art;

const TAB_STOP: usize = 8;

/// Read `input` line by line, sprinkle sprites from `arts` into blank
/// rectangles as they close off, and write the sprinkled text to `output`.
///
/// Placement and flushing happen every `max_height` lines, where
/// `max_height` is the tallest sprite in `arts`; this bounds the amount of
/// buffered input to a small multiple of that height rather than the whole
/// stream. `arts` must be non-empty.
pub fn run(
    input: impl BufRead,
    output: &mut impl Write,
    arts: &[Canvas],
    soft_max_width: usize,
    rng: &mut impl Rng,
) -> std::io::Result<()> {
    let min_width = arts
        .iter()
        .map(Canvas::width)
        .min()
        .expect("arts must be non-empty");
    let max_height = arts
        .iter()
        .map(Canvas::height)
        .max()
        .expect("arts must be non-empty");

    let mut finder = BlankFinder::new(soft_max_width, min_width, max_height * 5);

    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        finder.add_line(&expand_tabs(&line, TAB_STOP));
        if lineno % max_height == 0 {
            sprinkle_art(&mut finder, arts, rng);
            finder.flush_canvas(output)?;
        }
    }

    finder.end_of_file();
    sprinkle_art(&mut finder, arts, rng);
    finder.flush_canvas(output)
}

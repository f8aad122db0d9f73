//! Scans a single line for candidate blank-rectangle openings.

/// Runs of `' '` at least `min_blank_width` wide, confined to the first
/// `soft_max_width` characters, plus (per spec.md §4.3) a synthetic run
/// covering the unwritten tail of the line out to `soft_max_width`, when
/// there's room for one.
///
/// `line` is already a `Vec<char>` rather than `&str`: callers scan a
/// decoded line once and we index by character, not byte, so multi-byte
/// characters never shift the column math (characters are width-1 by
/// spec, but are not assumed to be single-byte).
pub fn blank_ranges(line: &[char], soft_max_width: usize, min_blank_width: usize) -> Vec<(usize, usize)> {
    let limit = soft_max_width.min(line.len());
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < limit {
        if line[i] == ' ' {
            let start = i;
            while i < limit && line[i] == ' ' {
                i += 1;
            }
            if start + min_blank_width <= i {
                ranges.push((start, i));
            }
        } else {
            i += 1;
        }
    }
    if line.len() + min_blank_width <= soft_max_width {
        ranges.push((line.len(), soft_max_width));
    }
    ranges
}

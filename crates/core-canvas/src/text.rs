//! Small text utility shared by the sprite parser and the driver: tab
//! expansion to fixed-width stops, matching Python's `str.expandtabs()`.

/// Expand tab characters to `tab_stop`-column stops (default 8, per
/// spec.md's "tabs expanded to 8-column stops on ingest").
pub fn expand_tabs(line: &str, tab_stop: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let spaces = tab_stop - (col % tab_stop);
            out.extend(std::iter::repeat(' ').take(spaces));
            col += spaces;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_to_next_stop() {
        assert_eq!(expand_tabs("a\tb", 8), "a       b");
        assert_eq!(expand_tabs("\t", 8), "        ");
        assert_eq!(expand_tabs("1234567\t", 8), "1234567 ");
        assert_eq!(expand_tabs("12345678\t", 8), "12345678        ");
    }

    #[test]
    fn no_tabs_is_identity() {
        assert_eq!(expand_tabs("hello world", 8), "hello world");
    }
}

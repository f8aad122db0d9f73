//! Sprite-library textual format parser.
//!
//! A line-oriented state machine (spec.md §4.2, §9 "Dynamic dispatch ->
//! tagged variant"): `Blank` is the initial state and the state re-entered
//! after a separator; `Meta` parses `#`/`##` lines; `Ascii` collects a
//! sprite's body.

use std::collections::HashMap;
use std::io::BufRead;

use core_canvas::{Canvas, expand_tabs};

use crate::error::ParseError;

const TAB_STOP: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Blank,
    Meta,
    Ascii,
}

pub struct ArtParser {
    state: ParserState,
    next_width: Option<usize>,
    // Remaining rows for a `height=` declaration; -1 marks "count exhausted,
    // awaiting the mandatory closing blank line" the same way the reference
    // implementation's decrement-then-check-for--1 does.
    next_height: Option<i64>,
    margin: usize,
    mirror_x: Option<HashMap<char, char>>,
    mirror_y: Option<HashMap<char, char>>,
    current_art: Vec<String>,
    lineno: usize,
    arts: Vec<Canvas>,
}

impl Default for ArtParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Blank,
            next_width: None,
            next_height: None,
            margin: 1,
            mirror_x: None,
            mirror_y: None,
            current_art: Vec::new(),
            lineno: 0,
            arts: Vec::new(),
        }
    }

    /// Parse a full sprite-definition stream, returning the ordered sprite
    /// library (explicit sprites followed immediately by any mirrored
    /// variants, per spec.md §4.2).
    pub fn parse(reader: impl BufRead) -> Result<Vec<Canvas>, ParseError> {
        let mut parser = Self::new();
        for line in reader.lines() {
            let line = line.map_err(|err| {
                ParseError::new(parser.lineno + 1, format!("I/O error: {err}"), None)
            })?;
            parser.handle_line(&line)?;
        }

        if let Some(h) = parser.next_height {
            if h > 0 {
                return Err(parser.error(
                    format!("Expected {h} more line for fixed-height art"),
                    None,
                ));
            }
        }
        if parser.state == ParserState::Ascii {
            parser.add_art()?;
            parser.next_width = None;
        }
        if parser.next_width.is_some() {
            return Err(parser.error("Expected one more art after width= definition", None));
        }
        Ok(parser.arts)
    }

    fn error(&self, message: impl Into<String>, line: Option<String>) -> ParseError {
        ParseError::new(self.lineno, message, line)
    }

    fn handle_line(&mut self, raw: &str) -> Result<(), ParseError> {
        let line = expand_tabs(raw, TAB_STOP).trim_end().to_string();
        self.lineno += 1;
        match self.state {
            ParserState::Blank => self.state_blank(line),
            ParserState::Meta => self.state_meta(line),
            ParserState::Ascii => self.state_ascii(line),
        }
    }

    fn state_blank(&mut self, line: String) -> Result<(), ParseError> {
        if line.starts_with('#') {
            self.state = ParserState::Meta;
            self.state_meta(line)
        } else if !line.is_empty() {
            self.state = ParserState::Ascii;
            self.state_ascii(line)
        } else {
            Err(self.error("More than one blank line in separator", Some(line)))
        }
    }

    fn state_meta(&mut self, line: String) -> Result<(), ParseError> {
        if let Some(command) = line.strip_prefix("##") {
            self.interpret_command(command.trim())
        } else if line.starts_with('#') {
            Ok(())
        } else if !line.is_empty() {
            Err(self.error("Found non-comment or command in meta block", Some(line)))
        } else {
            self.state = if self.next_height.is_some() {
                ParserState::Ascii
            } else {
                ParserState::Blank
            };
            Ok(())
        }
    }

    fn state_ascii(&mut self, line: String) -> Result<(), ParseError> {
        if let Some(h) = self.next_height {
            let h = h - 1;
            if h == -1 {
                if !line.is_empty() {
                    return Err(
                        self.error("Expected blank line after fixed-height art", Some(line))
                    );
                }
                self.next_height = None;
            } else {
                self.next_height = Some(h);
            }
        }

        if !line.is_empty() || self.next_height.is_some() {
            self.current_art.push(line);
        } else {
            self.add_art()?;
            self.next_width = None;
            self.next_height = None;
            self.state = ParserState::Blank;
            self.current_art.clear();
        }
        Ok(())
    }

    fn interpret_command(&mut self, command: &str) -> Result<(), ParseError> {
        if let Some(val) = self.parse_int_option("width", command, 1)? {
            if self.next_width.is_some() {
                return Err(self.error("width is already defined", Some(command.to_string())));
            }
            self.next_width = Some(val);
        } else if let Some(val) = self.parse_int_option("height", command, 1)? {
            if self.next_height.is_some() {
                return Err(self.error("height is already defined", Some(command.to_string())));
            }
            self.next_height = Some(val as i64);
        } else if let Some(val) = self.parse_int_option("margin", command, 0)? {
            self.margin = val;
        } else if let Some(spec) = command.strip_prefix("mirror_x:") {
            self.mirror_x = Some(self.make_transpose_dict(spec.trim_start())?);
        } else if let Some(spec) = command.strip_prefix("mirror_y:") {
            self.mirror_y = Some(self.make_transpose_dict(spec.trim_start())?);
        } else {
            return Err(self.error("Unknown command", Some(command.to_string())));
        }
        Ok(())
    }

    fn parse_int_option(
        &self,
        name: &str,
        command: &str,
        minimum: usize,
    ) -> Result<Option<usize>, ParseError> {
        let Some(rest) = command.strip_prefix(&format!("{name}=")) else {
            return Ok(None);
        };
        match rest.parse::<usize>() {
            Ok(val) if val >= minimum => Ok(Some(val)),
            Ok(_) => Err(self.error(
                format!("Expected an integer above {minimum}"),
                Some(rest.to_string()),
            )),
            Err(_) => Err(self.error(
                format!("'{rest}' value is not an integer"),
                Some(rest.to_string()),
            )),
        }
    }

    fn make_transpose_dict(&self, definition: &str) -> Result<HashMap<char, char>, ParseError> {
        let mut map = HashMap::new();
        map.insert(' ', ' ');
        let add = |map: &mut HashMap<char, char>, from: char, to: char| -> Result<(), ParseError> {
            if map.contains_key(&from) {
                return Err(self.error(
                    format!("Character {from:?} defined more than once"),
                    Some(definition.to_string()),
                ));
            }
            map.insert(from, to);
            Ok(())
        };
        for token in definition.split(' ') {
            let chars: Vec<char> = token.chars().collect();
            match chars.len() {
                1 => add(&mut map, chars[0], chars[0])?,
                2 => {
                    add(&mut map, chars[0], chars[1])?;
                    add(&mut map, chars[1], chars[0])?;
                }
                _ => {}
            }
        }
        Ok(map)
    }

    fn add_art(&mut self) -> Result<(), ParseError> {
        let mut art = Canvas::from_lines(self.current_art.iter().cloned());
        if art.width() == 0 || art.height() == 0 {
            return Err(self.error("Art has zero-width or zero-height", None));
        }

        if let Some(w) = self.next_width {
            if art.width() > w {
                let longest = self
                    .current_art
                    .iter()
                    .max_by_key(|l| l.chars().count())
                    .cloned();
                return Err(self.error(
                    format!("Specified width ({w}) but art is {} wide", art.width()),
                    longest,
                ));
            }
            art.grow(w, art.height())
                .expect("declared width never shrinks the sprite");
        }

        art.add_margin(self.margin);
        self.arts.push(art.clone());
        self.add_mirrored_variants(&art);
        Ok(())
    }

    /// Try to mirror `art` horizontally and vertically. A mirror is skipped
    /// (not an error) if the installed dictionary is missing some character;
    /// see spec.md §4.2 and the doubly-mirrored open question in §9,
    /// resolved in DESIGN.md.
    fn add_mirrored_variants(&mut self, art: &Canvas) {
        if let Some(dict) = &self.mirror_x {
            let mut mirrored = art.clone();
            if mirrored.mirror_x(|c| dict.get(&c).copied()).is_ok() {
                self.arts.push(mirrored);
            }
        }
        if let Some(dict) = &self.mirror_y {
            let mut mirrored = art.clone();
            if mirrored.mirror_y(|c| dict.get(&c).copied()).is_ok() {
                self.arts.push(mirrored);
            }
        }
    }
}

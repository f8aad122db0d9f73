//! Streaming discovery of maximal blank rectangles (spec.md §4.3).

use std::collections::HashMap;
use std::io::Write;

use core_canvas::{Canvas, Rect};

use crate::ranges::blank_ranges;

fn remember_widest(dict: &mut HashMap<(usize, usize), Rect>, rect: Rect) {
    if let Some(existing) = dict.get(&rect.x_axis()) {
        if existing.height() >= rect.height() {
            return;
        }
    }
    dict.insert(rect.x_axis(), rect);
}

/// Tracks every blank rectangle seen so far in a line-by-line stream,
/// closing rectangles off into `max_blanks` as soon as a line interrupts
/// them, and keeping a trailing window of already-seen lines in `canvas`
/// so sprites can later be stamped into rectangles that are still open.
pub struct BlankFinder {
    soft_max_width: usize,
    min_blank_width: usize,
    max_blank_height: usize,
    current_blanks: Vec<Rect>,
    max_blanks: Vec<Rect>,
    canvas: Canvas,
    current_line_no: usize,
}

impl BlankFinder {
    pub fn new(soft_max_width: usize, min_blank_width: usize, max_blank_height: usize) -> Self {
        Self {
            soft_max_width,
            min_blank_width,
            max_blank_height,
            current_blanks: Vec::new(),
            max_blanks: Vec::new(),
            canvas: Canvas::new(soft_max_width, 0),
            current_line_no: 0,
        }
    }

    pub fn current_line_no(&self) -> usize {
        self.current_line_no
    }

    /// Feed one more line of input. `line` is appended to the trailing
    /// window verbatim (never truncated, even past `soft_max_width`); the
    /// blank search itself only ever looks at the first `soft_max_width`
    /// columns.
    pub fn add_line(&mut self, line: &str) {
        self.current_line_no += 1;
        tracing::trace!(line_no = self.current_line_no, "scanning line for blanks");
        self.canvas
            .add_line(line, true)
            .expect("canvas grows to accommodate lines wider than soft_max_width");

        let chars: Vec<char> = line.chars().collect();
        let found = blank_ranges(&chars, self.soft_max_width, self.min_blank_width);

        let mut last_blanks = std::mem::take(&mut self.current_blanks);
        let mut blanks: HashMap<(usize, usize), Rect> = HashMap::new();

        for (x_start, x_end) in found {
            self.handle_blank(x_start, x_end, &mut last_blanks, &mut blanks);
        }

        // Anything left in `last_blanks` wasn't touched by any blank run on
        // this line: it stops growing here.
        self.max_blanks.append(&mut last_blanks);

        let mut current: Vec<Rect> = Vec::with_capacity(blanks.len());
        for (_, mut blank) in blanks {
            if blank.height() >= self.max_blank_height {
                self.max_blanks.push(blank);
                blank.resize_y(self.max_blank_height - 1, true);
            }
            current.push(blank);
        }
        current.sort_by_key(|r| r.x_start);
        self.current_blanks = current;
    }

    fn handle_blank(
        &mut self,
        x_start: usize,
        x_end: usize,
        last_blanks: &mut Vec<Rect>,
        blanks: &mut HashMap<(usize, usize), Rect>,
    ) {
        let line_rect = Rect::new(x_start, x_end, self.current_line_no, self.current_line_no + 1);
        remember_widest(blanks, line_rect);

        let mut i = 0;
        while i < last_blanks.len() {
            let last = last_blanks[i];
            if x_end <= last.x_start {
                break;
            }

            let intersect_start = x_start.max(last.x_start);
            let intersect_end = x_end.min(last.x_end);

            if (intersect_start, intersect_end) == last.x_axis() {
                last_blanks.remove(i);
                let mut extended = last;
                extended.resize_y(extended.height() + 1, false);
                remember_widest(blanks, extended);
                continue;
            }

            if intersect_start + self.min_blank_width <= intersect_end {
                remember_widest(
                    blanks,
                    Rect::new(intersect_start, intersect_end, last.y_start, self.current_line_no + 1),
                );
            }

            if last.x_end <= x_end {
                last_blanks.remove(i);
                self.max_blanks.push(last);
                continue;
            }

            i += 1;
        }
    }

    /// Maximal blank rectangles that can no longer grow because the
    /// trailing window has moved past them, ready for placement attempts.
    pub fn drain_fillable_blanks(&mut self) -> Vec<Rect> {
        let next_line = self.current_line_no + 1;
        let min_current = self.current_blanks.iter().map(|r| r.y_start).min().unwrap_or(next_line);
        let canvas_start = self.canvas_start();

        if min_current == canvas_start {
            return Vec::new();
        }

        let mut kept = Vec::with_capacity(self.max_blanks.len());
        let mut fillable = Vec::new();
        for rect in self.max_blanks.drain(..) {
            if rect.y_end <= min_current {
                fillable.push(rect);
            } else {
                kept.push(rect);
            }
        }
        self.max_blanks = kept;
        fillable
    }

    /// Attempt to stamp `sprite` into `rect` of the trailing window. `rect`
    /// must match `sprite`'s dimensions exactly; returns whether the stamp
    /// landed (false if any cell in `rect` was already non-blank, including
    /// one filled by an earlier `try_fill_blank` call).
    pub fn try_fill_blank(&mut self, rect: &Rect, sprite: &Canvas) -> bool {
        assert_eq!(
            (rect.width(), rect.height()),
            (sprite.width(), sprite.height()),
            "caller must only offer rectangles matching the sprite's dimensions"
        );
        let shift = self.canvas.height() as isize - 1 - self.current_line_no as isize;
        let mut local = *rect;
        local.shift_y(shift);

        if !self.canvas.is_rect_free(&local) {
            return false;
        }
        self.canvas
            .blit(sprite, local.x_start, local.y_start)
            .expect("is_rect_free already confirmed the rect fits");
        true
    }

    /// Mark every still-open rectangle closed; call once after the last
    /// line of input so `drain_fillable_blanks` can hand them all out.
    pub fn end_of_file(&mut self) {
        self.max_blanks.append(&mut self.current_blanks);
    }

    /// Write out and discard every line of the trailing window that is no
    /// longer needed to grow any tracked rectangle.
    pub fn flush_canvas(&mut self, output: &mut impl Write) -> std::io::Result<()> {
        if self.canvas.height() == 0 {
            return Ok(());
        }
        let next_line = self.current_line_no + 1;
        let min_largest = self.max_blanks.iter().map(|r| r.y_start).min().unwrap_or(next_line);
        let min_current = self.current_blanks.iter().map(|r| r.y_start).min().unwrap_or(next_line);
        let min_line = min_largest.min(min_current);
        let canvas_start = self.canvas_start();

        if canvas_start >= min_line {
            return Ok(());
        }
        let popped = self.canvas.pop_top(min_line - canvas_start);
        for y in 0..popped.height() {
            writeln!(output, "{}", popped.line(y, false).trim_end_matches(' '))?;
        }
        Ok(())
    }

    fn canvas_start(&self) -> usize {
        (self.current_line_no as isize - (self.canvas.height() as isize - 1)) as usize
    }
}

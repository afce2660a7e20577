// Text output: single runs and greedy word wrap.

use tessera_core::{CellPatch, Color, Glyph, ZLevel};

use crate::Grid;

/// Options for [`Grid::print_wrapped`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintOptions {
    pub foreground: Color,
    /// Background for every printed cell; `None` keeps what is there.
    pub background: Option<Color>,
    /// Maximum line width in columns.
    pub wrap: usize,
    /// Last line index to print: wrapping stops once the line index exceeds
    /// it, so up to `max_lines + 1` lines are emitted. `None` prints every line.
    pub max_lines: Option<usize>,
    /// Print with checked writes at this level.
    pub z: Option<ZLevel>,
}

impl PrintOptions {
    pub fn new(foreground: Color, wrap: usize) -> Self {
        Self {
            foreground,
            background: None,
            wrap,
            max_lines: None,
            z: None,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn max_lines(mut self, lines: usize) -> Self {
        self.max_lines = Some(lines);
        self
    }

    pub fn z(mut self, z: ZLevel) -> Self {
        self.z = Some(z);
        self
    }
}

impl Grid {
    /// Print `text` as one unbroken run starting at `(x, y)`, one column per
    /// character. Returns the number of lines printed (0 for empty text).
    pub fn print(&mut self, x: i32, y: i32, text: &str, foreground: Color, background: Option<Color>) -> usize {
        self.print_run(x, y, text, foreground, background, None)
    }

    /// Checked form of [`Grid::print`]: each character cell is one z test.
    pub fn print_z(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        foreground: Color,
        background: Option<Color>,
        z: ZLevel,
    ) -> usize {
        self.print_run(x, y, text, foreground, background, Some(z))
    }

    /// Print `text` word-wrapped to `options.wrap` columns, one line per row
    /// starting at `(x, y)`. Words are split on single spaces and never broken:
    /// a word wider than the wrap width gets a line of its own.
    /// Separators are not written past the last word of a line, so whatever
    /// the row held in those columns stays visible.
    ///
    /// Returns the number of lines emitted.
    pub fn print_wrapped(&mut self, x: i32, y: i32, text: &str, options: &PrintOptions) -> usize {
        if text.is_empty() {
            return 0;
        }

        let words: Vec<&str> = text.split(' ').collect();
        let mut line = String::with_capacity(options.wrap);
        let mut next = 0;
        let mut lines = 0;

        while next < words.len() && options.max_lines.map_or(true, |max| lines <= max) {
            line.clear();
            line.push_str(words[next]);
            let mut columns = words[next].chars().count();
            next += 1;

            while next < words.len() {
                let width = words[next].chars().count();
                if columns + 1 + width > options.wrap {
                    break;
                }
                line.push(' ');
                line.push_str(words[next]);
                columns += 1 + width;
                next += 1;
            }

            self.print_run(
                x,
                offset(y, lines),
                &line,
                options.foreground,
                options.background,
                options.z,
            );
            lines += 1;
        }

        lines
    }

    fn print_run(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        foreground: Color,
        background: Option<Color>,
        z: Option<ZLevel>,
    ) -> usize {
        if text.is_empty() {
            return 0;
        }
        for (column, character) in text.chars().enumerate() {
            let patch = CellPatch {
                glyph: Some(character as Glyph),
                foreground: Some(foreground),
                background,
            };
            let cx = offset(x, column);
            match z {
                Some(z) => {
                    self.set_z(cx, y, patch, z);
                }
                None => self.set(cx, y, patch),
            }
        }
        1
    }
}

fn offset(base: i32, by: usize) -> i32 {
    base.saturating_add(i32::try_from(by).unwrap_or(i32::MAX))
}

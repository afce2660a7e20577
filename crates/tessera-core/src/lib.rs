// Core types shared by every Tessera crate: cells, colors, z levels.

mod color;

pub use color::{Color, CGA};

// ──────────────────────────────────────────────
// Glyphs and z levels
// ──────────────────────────────────────────────

/// Index of a glyph in the atlas (code page position, e.g. CP437).
pub type Glyph = u32;

/// Drawing priority attached to checked writes.
pub type ZLevel = i32;

/// Z value of a cell nothing has claimed this frame; any checked write wins over it.
pub const Z_UNSET: ZLevel = ZLevel::MIN;

// ──────────────────────────────────────────────
// Cell
// ──────────────────────────────────────────────

/// One grid position: glyph plus foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: Glyph,
    pub foreground: Color,
    pub background: Color,
}

impl Cell {
    pub const fn new(glyph: Glyph, foreground: Color, background: Color) -> Self {
        Self {
            glyph,
            foreground,
            background,
        }
    }

    /// Cell holding a character, mapped to its code point.
    pub const fn from_char(character: char, foreground: Color, background: Color) -> Self {
        Self::new(character as Glyph, foreground, background)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: 0,
            foreground: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

/// Partial cell write: only the attributes that are `Some` are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellPatch {
    pub glyph: Option<Glyph>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl CellPatch {
    pub fn glyph(mut self, glyph: Glyph) -> Self {
        self.glyph = Some(glyph);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.glyph.is_none() && self.foreground.is_none() && self.background.is_none()
    }

    /// Apply the present attributes onto `cell`.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(glyph) = self.glyph {
            cell.glyph = glyph;
        }
        if let Some(color) = self.foreground {
            cell.foreground = color;
        }
        if let Some(color) = self.background {
            cell.background = color;
        }
    }
}

impl From<Cell> for CellPatch {
    fn from(cell: Cell) -> Self {
        Self {
            glyph: Some(cell.glyph),
            foreground: Some(cell.foreground),
            background: Some(cell.background),
        }
    }
}

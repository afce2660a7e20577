// Cell grid with z-ordered compositing.
// Out-of-range writes are clipped silently; only construction-time misuse errors.

mod blit;
mod text;

use tessera_core::{Cell, CellPatch, Color, Glyph, ZLevel, Z_UNSET};

pub use blit::blit;
pub use text::PrintOptions;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be greater than zero (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("blit region must be greater than zero (got {width}x{height})")]
    InvalidRegion { width: i32, height: i32 },
}

// ──────────────────────────────────────────────
// Grid
// ──────────────────────────────────────────────

/// Fixed-size row-major grid of cells with a parallel z buffer.
///
/// Two write families share the storage:
/// - unchecked writes (`set_*`) always land and leave the z buffer alone;
/// - checked writes (`set_*_z`) land only when `z >= zbuffer[x, y]` and then
///   record `z` for that cell, so the highest level wins and ties go to the
///   latest write.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    zbuffer: Vec<ZLevel>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        validate_dimensions(width, height)?;
        let len = width * height;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            zbuffer: vec![Z_UNSET; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Current z level of a cell.
    pub fn z_at(&self, x: i32, y: i32) -> Option<ZLevel> {
        self.index(x, y).map(|i| self.zbuffer[i])
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub(crate) fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x + y * self.width)
    }

    /// Reallocate to a new size. Prior contents are discarded even when the
    /// size is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        validate_dimensions(width, height)?;
        log::debug!("Grid resize {}x{} -> {}x{}", self.width, self.height, width, height);
        let len = width * height;
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); len];
        self.zbuffer = vec![Z_UNSET; len];
        Ok(())
    }

    // ── Clearing ────────────────────────────────

    /// Reset every cell to the default and release every z slot.
    pub fn clear(&mut self) {
        self.clear_with(0, Color::BLACK, Color::WHITE, None);
    }

    /// Reset every cell to the given values; z slots become `z` or `Z_UNSET`.
    pub fn clear_with(
        &mut self,
        glyph: Glyph,
        background: Color,
        foreground: Color,
        z: Option<ZLevel>,
    ) {
        self.cells.fill(Cell::new(glyph, foreground, background));
        self.zbuffer.fill(z.unwrap_or(Z_UNSET));
    }

    // ── Core write paths ────────────────────────

    fn write(&mut self, x: i32, y: i32, f: impl FnOnce(&mut Cell)) {
        if let Some(i) = self.index(x, y) {
            f(&mut self.cells[i]);
        }
    }

    fn write_z(&mut self, x: i32, y: i32, z: ZLevel, f: impl FnOnce(&mut Cell)) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if z < self.zbuffer[i] {
            return false;
        }
        self.zbuffer[i] = z;
        f(&mut self.cells[i]);
        true
    }

    /// Visit every in-range cell of a rectangle. Non-positive sizes visit nothing.
    fn for_each_in_rect(&mut self, x: i32, y: i32, w: i32, h: i32, mut f: impl FnMut(&mut Self, i32, i32)) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(clamp_dim(self.width));
        let y1 = y.saturating_add(h).min(clamp_dim(self.height));
        for iy in y0..y1 {
            for ix in x0..x1 {
                f(self, ix, iy);
            }
        }
    }

    // ── Unchecked single-attribute writes ───────

    pub fn set_glyph(&mut self, x: i32, y: i32, glyph: Glyph) {
        self.write(x, y, |cell| cell.glyph = glyph);
    }

    pub fn set_char(&mut self, x: i32, y: i32, character: char) {
        self.set_glyph(x, y, character as Glyph);
    }

    pub fn set_foreground(&mut self, x: i32, y: i32, color: Color) {
        self.write(x, y, |cell| cell.foreground = color);
    }

    pub fn set_background(&mut self, x: i32, y: i32, color: Color) {
        self.write(x, y, |cell| cell.background = color);
    }

    // ── Checked single-attribute writes ─────────
    // Each returns whether the write landed.

    pub fn set_glyph_z(&mut self, x: i32, y: i32, glyph: Glyph, z: ZLevel) -> bool {
        self.write_z(x, y, z, |cell| cell.glyph = glyph)
    }

    pub fn set_char_z(&mut self, x: i32, y: i32, character: char, z: ZLevel) -> bool {
        self.set_glyph_z(x, y, character as Glyph, z)
    }

    pub fn set_foreground_z(&mut self, x: i32, y: i32, color: Color, z: ZLevel) -> bool {
        self.write_z(x, y, z, |cell| cell.foreground = color)
    }

    pub fn set_background_z(&mut self, x: i32, y: i32, color: Color, z: ZLevel) -> bool {
        self.write_z(x, y, z, |cell| cell.background = color)
    }

    // ── Rectangle single-attribute writes ───────

    pub fn set_glyph_rect(&mut self, x: i32, y: i32, w: i32, h: i32, glyph: Glyph) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| grid.set_glyph(ix, iy, glyph));
    }

    pub fn set_foreground_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| grid.set_foreground(ix, iy, color));
    }

    pub fn set_background_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| grid.set_background(ix, iy, color));
    }

    pub fn set_glyph_rect_z(&mut self, x: i32, y: i32, w: i32, h: i32, glyph: Glyph, z: ZLevel) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| {
            grid.set_glyph_z(ix, iy, glyph, z);
        });
    }

    pub fn set_foreground_rect_z(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, z: ZLevel) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| {
            grid.set_foreground_z(ix, iy, color, z);
        });
    }

    pub fn set_background_rect_z(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, z: ZLevel) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| {
            grid.set_background_z(ix, iy, color, z);
        });
    }

    // ── Whole-cell writes ───────────────────────

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.write(x, y, |c| *c = cell);
    }

    /// Replace all three attributes under a single z test.
    pub fn set_cell_z(&mut self, x: i32, y: i32, cell: Cell, z: ZLevel) -> bool {
        self.write_z(x, y, z, |c| *c = cell)
    }

    pub fn set_cell_rect(&mut self, x: i32, y: i32, w: i32, h: i32, cell: Cell) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| grid.set_cell(ix, iy, cell));
    }

    pub fn set_cell_rect_z(&mut self, x: i32, y: i32, w: i32, h: i32, cell: Cell, z: ZLevel) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| {
            grid.set_cell_z(ix, iy, cell, z);
        });
    }

    // ── Partial writes ──────────────────────────

    /// Apply whichever attributes the patch carries.
    pub fn set(&mut self, x: i32, y: i32, patch: CellPatch) {
        self.write(x, y, |cell| patch.apply_to(cell));
    }

    /// Checked partial write: one z test covers every attribute in the patch.
    pub fn set_z(&mut self, x: i32, y: i32, patch: CellPatch, z: ZLevel) -> bool {
        self.write_z(x, y, z, |cell| patch.apply_to(cell))
    }

    pub fn set_rect(&mut self, x: i32, y: i32, w: i32, h: i32, patch: CellPatch) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| grid.set(ix, iy, patch));
    }

    pub fn set_rect_z(&mut self, x: i32, y: i32, w: i32, h: i32, patch: CellPatch, z: ZLevel) {
        self.for_each_in_rect(x, y, w, h, |grid, ix, iy| {
            grid.set_z(ix, iy, patch, z);
        });
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn clamp_dim(dim: usize) -> i32 {
    i32::try_from(dim).unwrap_or(i32::MAX)
}

// Batch geometry: projects a grid into flat per-vertex attribute arrays.
//
// Every cell is one quad of four vertices, corner order
//   1 -- 0
//   |    |
//   2 -- 3
// Positions and indices only change with the grid or cell size; UVs and
// colors are rewritten in full every frame.

use tessera_grid::Grid;

use crate::atlas::AtlasLayout;

pub const VERTICES_PER_CELL: usize = 4;
pub const INDICES_PER_CELL: usize = 6;

/// CPU-side attribute arrays for one grid.
pub struct FrameBatch {
    width: usize,
    height: usize,
    cell_width: u32,
    cell_height: u32,
    positions: Vec<[f32; 2]>,
    indices: Vec<u32>,
    uvs: Vec<[f32; 2]>,
    foreground: Vec<[f32; 3]>,
    background: Vec<[f32; 3]>,
    /// Bumped whenever positions/indices are rebuilt, so uploaders know when
    /// the static buffers are stale.
    geometry_generation: u64,
}

/// Borrowed view of the arrays ready for upload.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub positions: &'a [[f32; 2]],
    pub uvs: &'a [[f32; 2]],
    pub foreground: &'a [[f32; 3]],
    pub background: &'a [[f32; 3]],
    pub indices: &'a [u32],
    pub width: usize,
    pub height: usize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub geometry_generation: u64,
}

impl Frame<'_> {
    /// Index count for one draw pass.
    pub fn element_count(&self) -> usize {
        self.width * self.height * INDICES_PER_CELL
    }

    /// Unscaled pixel size of the whole grid.
    pub fn pixel_size(&self) -> [f32; 2] {
        [
            (self.width as u64 * self.cell_width as u64) as f32,
            (self.height as u64 * self.cell_height as u64) as f32,
        ]
    }
}

impl FrameBatch {
    pub fn new(width: usize, height: usize, cell_width: u32, cell_height: u32) -> Self {
        let mut batch = Self {
            width,
            height,
            cell_width,
            cell_height,
            positions: Vec::new(),
            indices: Vec::new(),
            uvs: Vec::new(),
            foreground: Vec::new(),
            background: Vec::new(),
            geometry_generation: 0,
        };
        batch.rebuild_geometry();
        batch
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Match a new grid size. No-op when unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.rebuild_geometry();
    }

    /// Match a new cell pixel size (atlas reload). No-op when unchanged.
    pub fn set_cell_size(&mut self, cell_width: u32, cell_height: u32) {
        if cell_width == self.cell_width && cell_height == self.cell_height {
            return;
        }
        self.cell_width = cell_width;
        self.cell_height = cell_height;
        self.rebuild_geometry();
    }

    fn rebuild_geometry(&mut self) {
        let cells = self.width * self.height;
        let vertex_count = cells * VERTICES_PER_CELL;
        log::debug!(
            "Rebuilding batch geometry: {}x{} cells of {}x{} px",
            self.width,
            self.height,
            self.cell_width,
            self.cell_height
        );

        self.positions = build_positions(self.width, self.height, self.cell_width, self.cell_height);
        self.indices = build_indices(cells);
        self.uvs = vec![[0.0; 2]; vertex_count];
        self.foreground = vec![[0.0; 3]; vertex_count];
        self.background = vec![[0.0; 3]; vertex_count];
        self.geometry_generation += 1;
    }

    /// Rewrite UVs and colors from the grid. Regrows first if the grid size
    /// no longer matches.
    pub fn update(&mut self, grid: &Grid, atlas: &AtlasLayout) {
        self.resize(grid.width(), grid.height());

        for (cell_index, cell) in grid.cells().iter().enumerate() {
            let i = cell_index * VERTICES_PER_CELL;
            let quad = i..i + VERTICES_PER_CELL;

            self.uvs[quad.clone()].copy_from_slice(&atlas.quad_uvs(cell.glyph));
            self.background[quad.clone()].fill(cell.background.to_array());
            self.foreground[quad].fill(cell.foreground.to_array());
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            positions: &self.positions,
            uvs: &self.uvs,
            foreground: &self.foreground,
            background: &self.background,
            indices: &self.indices,
            width: self.width,
            height: self.height,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            geometry_generation: self.geometry_generation,
        }
    }
}

fn build_positions(width: usize, height: usize, cell_width: u32, cell_height: u32) -> Vec<[f32; 2]> {
    let (cw, ch) = (cell_width as f32, cell_height as f32);
    let mut positions = Vec::with_capacity(width * height * VERTICES_PER_CELL);
    for iy in 0..height {
        for ix in 0..width {
            let x = ix as f32 * cw;
            let y = iy as f32 * ch;
            positions.push([x + cw, y]);
            positions.push([x, y]);
            positions.push([x, y + ch]);
            positions.push([x + cw, y + ch]);
        }
    }
    positions
}

/// Two triangles per quad: (0, 1, 2) and (2, 3, 0).
fn build_indices(cells: usize) -> Vec<u32> {
    if cells.saturating_mul(VERTICES_PER_CELL) > u32::MAX as usize {
        log::warn!("{} cells exceed the 32-bit index range; far quads will not draw", cells);
    }
    let mut indices = Vec::with_capacity(cells * INDICES_PER_CELL);
    for cell in 0..cells {
        let base = quad_base(cell);
        indices.extend_from_slice(&[
            base,
            base.saturating_add(1),
            base.saturating_add(2),
            base.saturating_add(2),
            base.saturating_add(3),
            base,
        ]);
    }
    indices
}

/// First vertex index of a cell's quad, saturating at `u32::MAX`.
fn quad_base(cell: usize) -> u32 {
    u32::try_from(cell.saturating_mul(VERTICES_PER_CELL)).unwrap_or(u32::MAX)
}

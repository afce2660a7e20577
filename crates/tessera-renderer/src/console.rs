// Console: a grid plus everything needed to turn it into a frame.
// Holds no GPU state; pair it with `WgpuRenderer` to draw.

use tessera_grid::{Grid, GridError};

use crate::atlas::{AtlasDescriptor, AtlasLayout};
use crate::batch::{Frame, FrameBatch};
use crate::viewport::{fit_viewport, ResizeMode, Viewport};
use crate::RendererError;

pub struct Console {
    grid: Grid,
    atlas: AtlasLayout,
    batch: FrameBatch,
    scale: f32,
    resize_mode: ResizeMode,
    viewport: Viewport,
}

impl Console {
    pub fn new(width: usize, height: usize, atlas: &AtlasDescriptor) -> Result<Self, RendererError> {
        let grid = Grid::new(width, height)?;
        let atlas = AtlasLayout::new(atlas)?;
        let (cw, ch) = (atlas.descriptor().cell_pixel_width, atlas.descriptor().cell_pixel_height);
        let batch = FrameBatch::new(width, height, cw, ch);
        let viewport = fit_viewport(
            (grid_pixels(width, cw), grid_pixels(height, ch)),
            (width, height),
            (cw, ch),
            1.0,
            ResizeMode::None,
        );
        Ok(Self {
            grid,
            atlas,
            batch,
            scale: 1.0,
            resize_mode: ResizeMode::None,
            viewport,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn atlas(&self) -> &AtlasLayout {
        &self.atlas
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the draw scale. Non-positive or non-finite values are rejected.
    pub fn set_scale(&mut self, scale: f32) -> Result<(), RendererError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RendererError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    pub fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    pub fn set_resize_mode(&mut self, mode: ResizeMode) {
        self.resize_mode = mode;
    }

    /// Reallocate the grid (destructive) and its batch geometry.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        self.grid.resize(width, height)?;
        self.batch.resize(width, height);
        Ok(())
    }

    /// Swap in a new atlas layout. Grid content is untouched; geometry is
    /// rebuilt only if the cell size changed.
    pub fn load_atlas(&mut self, descriptor: &AtlasDescriptor) -> Result<(), RendererError> {
        let atlas = AtlasLayout::new(descriptor)?;
        self.batch
            .set_cell_size(descriptor.cell_pixel_width, descriptor.cell_pixel_height);
        self.atlas = atlas;
        Ok(())
    }

    /// Fit the console to a window of `width x height` pixels according to
    /// the resize mode. In `ResizeCells` mode a changed cell count resizes
    /// (and clears) the grid.
    pub fn fit_window(&mut self, width: u32, height: u32) -> Result<Viewport, GridError> {
        let descriptor = self.atlas.descriptor();
        let viewport = fit_viewport(
            (width, height),
            (self.grid.width(), self.grid.height()),
            (descriptor.cell_pixel_width, descriptor.cell_pixel_height),
            self.scale,
            self.resize_mode,
        );

        if viewport.columns != self.grid.width() || viewport.rows != self.grid.height() {
            log::debug!(
                "Window {}x{} -> grid {}x{} cells",
                width,
                height,
                viewport.columns,
                viewport.rows
            );
            self.resize(viewport.columns, viewport.rows)?;
        }
        if self.resize_mode == ResizeMode::ResizeScale {
            self.scale = viewport.scale;
        }
        self.viewport = viewport;
        Ok(viewport)
    }

    /// Serialize the whole grid into the batch arrays for this frame.
    pub fn build_frame(&mut self) -> Frame<'_> {
        self.batch.update(&self.grid, &self.atlas);
        self.batch.frame()
    }
}

/// Unscaled pixel extent of `cells` cells, saturating at `u32::MAX`.
fn grid_pixels(cells: usize, cell_pixels: u32) -> u32 {
    u32::try_from(cells)
        .unwrap_or(u32::MAX)
        .saturating_mul(cell_pixels)
}

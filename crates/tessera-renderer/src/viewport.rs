// Fitting the grid into a window of arbitrary size.

use serde::{Deserialize, Serialize};

/// What happens when the window size stops matching the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Keep grid and scale; center the grid in the window.
    #[default]
    None,
    /// Grow or shrink the grid to fill the window at the current scale.
    ResizeCells,
    /// Keep the grid; pick the largest integer scale that fits and center.
    ResizeScale,
}

/// Where and how large the grid is drawn inside the window, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    /// Grid size after fitting; differs from the input only for `ResizeCells`.
    pub columns: usize,
    pub rows: usize,
}

/// Compute the viewport for a window of `window` pixels showing a grid of
/// `grid` cells, each `cell` pixels at `scale`.
pub fn fit_viewport(
    window: (u32, u32),
    grid: (usize, usize),
    cell: (u32, u32),
    scale: f32,
    mode: ResizeMode,
) -> Viewport {
    let (win_w, win_h) = window;
    let (cell_w, cell_h) = (cell.0.max(1), cell.1.max(1));

    match mode {
        ResizeMode::None => centered(window, grid, (cell_w, cell_h), scale),
        ResizeMode::ResizeCells => {
            let cell_px_w = (cell_w as f32 * scale).max(1.0);
            let cell_px_h = (cell_h as f32 * scale).max(1.0);
            let columns = ((win_w as f32 / cell_px_w) as usize).max(1);
            let rows = ((win_h as f32 / cell_px_h) as usize).max(1);
            Viewport {
                offset_x: 0,
                offset_y: 0,
                width: (columns as f32 * cell_px_w) as u32,
                height: (rows as f32 * cell_px_h) as u32,
                scale,
                columns,
                rows,
            }
        }
        ResizeMode::ResizeScale => {
            let grid_px_w = (grid.0 as u64 * cell_w as u64).max(1);
            let grid_px_h = (grid.1 as u64 * cell_h as u64).max(1);
            let fit = (win_w as u64 / grid_px_w).min(win_h as u64 / grid_px_h).max(1);
            centered(window, grid, (cell_w, cell_h), fit as f32)
        }
    }
}

fn centered(window: (u32, u32), grid: (usize, usize), cell: (u32, u32), scale: f32) -> Viewport {
    let width = (grid.0 as f32 * cell.0 as f32 * scale) as u32;
    let height = (grid.1 as f32 * cell.1 as f32 * scale) as u32;
    Viewport {
        offset_x: (window.0 as i64 - width as i64) as i32 / 2,
        offset_y: (window.1 as i64 - height as i64) as i32 / 2,
        width,
        height,
        scale,
        columns: grid.0,
        rows: grid.1,
    }
}

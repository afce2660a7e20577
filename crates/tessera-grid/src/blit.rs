// Rectangular cell copies between grids, clipped to both grids' bounds.
// Z buffers are never copied.

use std::ops::Range;

use crate::{Grid, GridError};

/// Copy the `src_w x src_h` region at `(src_x, src_y)` of `src` into `dst` at
/// `(dst_x, dst_y)`. Offsets where either the source or destination cell falls
/// outside its grid are skipped.
#[allow(clippy::too_many_arguments)]
pub fn blit(
    src: &Grid,
    src_x: i32,
    src_y: i32,
    src_w: i32,
    src_h: i32,
    dst: &mut Grid,
    dst_x: i32,
    dst_y: i32,
) -> Result<(), GridError> {
    if src_w <= 0 || src_h <= 0 {
        return Err(GridError::InvalidRegion {
            width: src_w,
            height: src_h,
        });
    }

    let columns = overlap(src_w, src_x, src.width(), dst_x, dst.width());
    let rows = overlap(src_h, src_y, src.height(), dst_y, dst.height());
    if columns.is_empty() || rows.is_empty() {
        return Ok(());
    }

    let span = (columns.end - columns.start) as usize;
    for iy in rows {
        let from = cell_index(src.width(), src_x + columns.start, src_y + iy);
        let to = cell_index(dst.width(), dst_x + columns.start, dst_y + iy);
        dst.cells[to..to + span].copy_from_slice(&src.cells[from..from + span]);
    }
    Ok(())
}

impl Grid {
    /// Method form of [`blit`] with `self` as the source.
    #[allow(clippy::too_many_arguments)]
    pub fn blit_to(
        &self,
        src_x: i32,
        src_y: i32,
        src_w: i32,
        src_h: i32,
        dst: &mut Grid,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<(), GridError> {
        blit(self, src_x, src_y, src_w, src_h, dst, dst_x, dst_y)
    }

    /// Copy a region of this grid onto itself. Overlapping regions read the
    /// cells as they were before the copy.
    pub fn blit_within(
        &mut self,
        src_x: i32,
        src_y: i32,
        src_w: i32,
        src_h: i32,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<(), GridError> {
        let snapshot = self.clone();
        blit(&snapshot, src_x, src_y, src_w, src_h, self, dst_x, dst_y)
    }
}

/// Offsets in `[0, len)` for which both `src + i` and `dst + i` land inside
/// their extents.
fn overlap(len: i32, src: i32, src_extent: usize, dst: i32, dst_extent: usize) -> Range<i32> {
    let (len, src, dst) = (len as i64, src as i64, dst as i64);
    let lo = 0.max(-src).max(-dst);
    let hi = len
        .min(src_extent as i64 - src)
        .min(dst_extent as i64 - dst);
    if hi <= lo {
        return 0..0;
    }
    lo as i32..hi as i32
}

fn cell_index(width: usize, x: i32, y: i32) -> usize {
    x as usize + y as usize * width
}

// Glyph atlas: fixed-column bitmap font layout and glyph -> UV mapping.

use tessera_core::Glyph;

/// Geometry of a decoded atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasDescriptor {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub cell_pixel_width: u32,
    pub cell_pixel_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    #[error("atlas image must be non-empty (got {width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("atlas cell size must be greater than zero (got {width}x{height})")]
    InvalidCellSize { width: u32, height: u32 },
    #[error("atlas cell {cell_width}x{cell_height} does not fit in a {width}x{height} image")]
    CellLargerThanImage {
        cell_width: u32,
        cell_height: u32,
        width: u32,
        height: u32,
    },
    #[error("atlas pixel data has {actual} bytes, expected {expected}")]
    PixelDataSize { expected: usize, actual: usize },
}

/// Mapping parameters derived once per atlas load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasLayout {
    descriptor: AtlasDescriptor,
    columns: u32,
    u_ratio: f32,
    v_ratio: f32,
}

impl AtlasLayout {
    pub fn new(descriptor: &AtlasDescriptor) -> Result<Self, AtlasError> {
        let d = *descriptor;
        if d.pixel_width == 0 || d.pixel_height == 0 {
            return Err(AtlasError::EmptyImage {
                width: d.pixel_width,
                height: d.pixel_height,
            });
        }
        if d.cell_pixel_width == 0 || d.cell_pixel_height == 0 {
            return Err(AtlasError::InvalidCellSize {
                width: d.cell_pixel_width,
                height: d.cell_pixel_height,
            });
        }
        if d.cell_pixel_width > d.pixel_width || d.cell_pixel_height > d.pixel_height {
            return Err(AtlasError::CellLargerThanImage {
                cell_width: d.cell_pixel_width,
                cell_height: d.cell_pixel_height,
                width: d.pixel_width,
                height: d.pixel_height,
            });
        }

        Ok(Self {
            descriptor: d,
            columns: d.pixel_width / d.cell_pixel_width,
            u_ratio: 1.0 / d.pixel_width as f32,
            v_ratio: 1.0 / d.pixel_height as f32,
        })
    }

    pub fn descriptor(&self) -> &AtlasDescriptor {
        &self.descriptor
    }

    /// Glyphs per atlas row.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// UV extent of one glyph cell.
    pub fn cell_uv_size(&self) -> [f32; 2] {
        [
            self.descriptor.cell_pixel_width as f32 * self.u_ratio,
            self.descriptor.cell_pixel_height as f32 * self.v_ratio,
        ]
    }

    /// Top-left UV of a glyph's cell.
    pub fn uv_origin(&self, glyph: Glyph) -> [f32; 2] {
        let [cu, cv] = self.cell_uv_size();
        let col = glyph % self.columns;
        let row = glyph / self.columns;
        [col as f32 * cu, row as f32 * cv]
    }

    /// UVs for the four quad corners, in the same order as the cell geometry:
    /// top-right, top-left, bottom-left, bottom-right.
    pub fn quad_uvs(&self, glyph: Glyph) -> [[f32; 2]; 4] {
        let [u, v] = self.uv_origin(glyph);
        let [cu, cv] = self.cell_uv_size();
        [[u + cu, v], [u, v], [u, v + cv], [u + cu, v + cv]]
    }
}

/// Make the atlas background transparent: every RGBA pixel whose color matches
/// the first pixel's color gets alpha 0.
pub fn apply_color_key(rgba: &mut [u8]) {
    if rgba.len() < 4 {
        return;
    }
    let key = [rgba[0], rgba[1], rgba[2]];
    let mut keyed = 0usize;
    for pixel in rgba.chunks_exact_mut(4) {
        if pixel[..3] == key {
            pixel[3] = 0;
            keyed += 1;
        }
    }
    log::debug!("Atlas color key {:?} cleared {} pixels", key, keyed);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp437_8x8() -> AtlasLayout {
        AtlasLayout::new(&AtlasDescriptor {
            pixel_width: 128,
            pixel_height: 128,
            cell_pixel_width: 8,
            cell_pixel_height: 8,
        })
        .unwrap()
    }

    #[test]
    fn test_columns_and_ratios() {
        let atlas = cp437_8x8();
        assert_eq!(atlas.columns(), 16);
        assert_eq!(atlas.cell_uv_size(), [0.0625, 0.0625]);
    }

    #[test]
    fn test_uv_origin_row_major() {
        let atlas = cp437_8x8();
        assert_eq!(atlas.uv_origin(0), [0.0, 0.0]);
        assert_eq!(atlas.uv_origin(1), [0.0625, 0.0]);
        // '@' = 64 -> column 0, row 4
        assert_eq!(atlas.uv_origin('@' as Glyph), [0.0, 0.25]);
        assert_eq!(atlas.uv_origin(255), [0.9375, 0.9375]);
    }

    #[test]
    fn test_quad_uvs_winding() {
        let atlas = cp437_8x8();
        let uvs = atlas.quad_uvs(17);
        assert_eq!(
            uvs,
            [[0.125, 0.0625], [0.0625, 0.0625], [0.0625, 0.125], [0.125, 0.125]]
        );
    }

    #[test]
    fn test_non_square_atlas() {
        let atlas = AtlasLayout::new(&AtlasDescriptor {
            pixel_width: 160,
            pixel_height: 64,
            cell_pixel_width: 10,
            cell_pixel_height: 16,
        })
        .unwrap();
        assert_eq!(atlas.columns(), 16);
        let [u, v] = atlas.uv_origin(33);
        assert!((u - 0.0625).abs() < 1e-6);
        assert_eq!(v, 0.5);
    }

    #[test]
    fn test_invalid_descriptors() {
        let base = AtlasDescriptor {
            pixel_width: 128,
            pixel_height: 128,
            cell_pixel_width: 8,
            cell_pixel_height: 8,
        };
        assert!(matches!(
            AtlasLayout::new(&AtlasDescriptor { pixel_width: 0, ..base }),
            Err(AtlasError::EmptyImage { .. })
        ));
        assert!(matches!(
            AtlasLayout::new(&AtlasDescriptor { cell_pixel_height: 0, ..base }),
            Err(AtlasError::InvalidCellSize { .. })
        ));
        assert!(matches!(
            AtlasLayout::new(&AtlasDescriptor { cell_pixel_width: 256, ..base }),
            Err(AtlasError::CellLargerThanImage { .. })
        ));
    }

    #[test]
    fn test_color_key_clears_matching_pixels() {
        let mut rgba = vec![
            255, 0, 255, 255, //
            255, 255, 255, 255, //
            255, 0, 255, 255, //
        ];
        apply_color_key(&mut rgba);
        assert_eq!(rgba[3], 0);
        assert_eq!(rgba[7], 255);
        assert_eq!(rgba[11], 0);
    }
}

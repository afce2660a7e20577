// Font bitmaps: decode from disk, or generate a placeholder atlas.

use std::path::Path;

use anyhow::Context;
use tessera_renderer::{apply_color_key, AtlasDescriptor, AtlasLayout};

use crate::settings::ConsoleSettings;

/// Glyphs per atlas row (and rows per atlas) for generated bitmaps.
const GLYPHS_PER_ROW: u32 = 16;

/// Code page 437 full block.
const FULL_BLOCK: u32 = 219;

/// Decoded RGBA pixels plus the atlas geometry.
pub struct FontBitmap {
    pub descriptor: AtlasDescriptor,
    pub rgba: Vec<u8>,
}

/// Load the bitmap named in the settings, falling back to a generated atlas
/// with the same glyph size.
pub fn load_font(settings: &ConsoleSettings) -> FontBitmap {
    let path = Path::new(&settings.bitmap_file);
    match load_bitmap(path, settings.char_width, settings.char_height) {
        Ok(bitmap) => bitmap,
        Err(e) => {
            log::warn!("{:#}; using generated glyphs", e);
            generated_font(settings.char_width, settings.char_height)
        }
    }
}

/// Decode an image file and key out its background color.
pub fn load_bitmap(path: &Path, char_width: u32, char_height: u32) -> anyhow::Result<FontBitmap> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load font bitmap {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgba = rgba.into_raw();
    apply_color_key(&mut rgba);

    let descriptor = AtlasDescriptor {
        pixel_width: width,
        pixel_height: height,
        cell_pixel_width: char_width,
        cell_pixel_height: char_height,
    };
    AtlasLayout::new(&descriptor)
        .with_context(|| format!("Invalid font bitmap {}", path.display()))?;
    log::info!("Loaded font bitmap {} ({}x{})", path.display(), width, height);
    Ok(FontBitmap { descriptor, rgba })
}

/// 16x16 glyph atlas with a coarse 4x4 pattern per glyph. Glyph 0 and space
/// are empty; the full block is solid.
pub fn generated_font(char_width: u32, char_height: u32) -> FontBitmap {
    let (cw, ch) = (char_width.max(1), char_height.max(1));
    let width = cw * GLYPHS_PER_ROW;
    let height = ch * GLYPHS_PER_ROW;
    let mut rgba = vec![0u8; (width * height * 4) as usize];

    for glyph in 0..GLYPHS_PER_ROW * GLYPHS_PER_ROW {
        let pattern = glyph_pattern(glyph);
        let (gx, gy) = ((glyph % GLYPHS_PER_ROW) * cw, (glyph / GLYPHS_PER_ROW) * ch);
        for py in 0..ch {
            for px in 0..cw {
                let bit = (py * 4 / ch) * 4 + px * 4 / cw;
                if pattern & (1 << bit) == 0 {
                    continue;
                }
                let i = (((gy + py) * width + gx + px) * 4) as usize;
                rgba[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
    }

    FontBitmap {
        descriptor: AtlasDescriptor {
            pixel_width: width,
            pixel_height: height,
            cell_pixel_width: cw,
            cell_pixel_height: ch,
        },
        rgba,
    }
}

fn glyph_pattern(glyph: u32) -> u16 {
    match glyph {
        0 | 32 => 0,
        FULL_BLOCK => u16::MAX,
        _ => (glyph.wrapping_mul(0x9E37_79B9) >> 16) as u16 | 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(font: &FontBitmap, x: u32, y: u32) -> u8 {
        font.rgba[((y * font.descriptor.pixel_width + x) * 4 + 3) as usize]
    }

    #[test]
    fn test_generated_font_geometry() {
        let font = generated_font(8, 12);
        assert_eq!(font.descriptor.pixel_width, 128);
        assert_eq!(font.descriptor.pixel_height, 192);
        assert_eq!(font.rgba.len(), 128 * 192 * 4);
        assert!(AtlasLayout::new(&font.descriptor).is_ok());
    }

    #[test]
    fn test_generated_font_blank_and_solid_glyphs() {
        let font = generated_font(8, 8);
        // glyph 0 at (0, 0), space at column 0 row 2
        for (x, y) in [(0, 0), (7, 7), (3, 16 + 3)] {
            assert_eq!(alpha_at(&font, x, y), 0);
        }
        // full block: column 11, row 13
        let (bx, by) = (11 * 8, 13 * 8);
        for y in by..by + 8 {
            for x in bx..bx + 8 {
                assert_eq!(alpha_at(&font, x, y), 255);
            }
        }
    }

    #[test]
    fn test_missing_bitmap_falls_back() {
        let settings = ConsoleSettings {
            bitmap_file: "/nonexistent/font.png".into(),
            char_width: 10,
            char_height: 10,
            ..Default::default()
        };
        let font = load_font(&settings);
        assert_eq!(font.descriptor.cell_pixel_width, 10);
        assert_eq!(font.descriptor.pixel_width, 160);
    }

    #[test]
    fn test_load_bitmap_applies_color_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.png");
        let mut img = image::RgbaImage::from_pixel(32, 32, image::Rgba([255, 0, 255, 255]));
        img.put_pixel(5, 5, image::Rgba([255, 255, 255, 255]));
        img.save(&path).unwrap();

        let font = load_bitmap(&path, 2, 2).unwrap();
        assert_eq!(alpha_at(&font, 0, 0), 0);
        assert_eq!(alpha_at(&font, 5, 5), 255);
        assert_eq!(font.descriptor.pixel_width, 32);
    }
}

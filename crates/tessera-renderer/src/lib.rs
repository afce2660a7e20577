// GPU renderer for the Tessera cell grid (wgpu).
// The CPU side (`Console`, `FrameBatch`) builds flat attribute arrays each
// frame; `WgpuRenderer` uploads them and draws a background pass and a glyph
// pass over the same quads.

mod atlas;
mod batch;
mod console;
mod init;
mod shaders;
mod vertex;
mod viewport;

use std::sync::Arc;

use tessera_core::Color;
use tessera_grid::GridError;

pub use atlas::{apply_color_key, AtlasDescriptor, AtlasError, AtlasLayout};
pub use batch::{Frame, FrameBatch, INDICES_PER_CELL, VERTICES_PER_CELL};
pub use console::Console;
pub use viewport::{fit_viewport, ResizeMode, Viewport};

use vertex::GridUniforms;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RendererError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    #[error("scale must be a positive finite number (got {0})")]
    InvalidScale(f32),
}

// ──────────────────────────────────────────────
// GPU buffers
// ──────────────────────────────────────────────

/// Smallest allocation for a growable buffer.
const MIN_BUFFER_BYTES: usize = 64 * 1024;

/// A GPU buffer that grows (power of two) to fit what is written into it.
pub(crate) struct GpuBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    usage: wgpu::BufferUsages,
    label: &'static str,
}

impl GpuBuffer {
    pub(crate) fn new(device: &wgpu::Device, label: &'static str, usage: wgpu::BufferUsages) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: MIN_BUFFER_BYTES as u64,
            usage,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity: MIN_BUFFER_BYTES,
            usage,
            label,
        }
    }

    /// Ensure the buffer is large enough; grow if needed.
    fn ensure_capacity(&mut self, device: &wgpu::Device, needed: usize) {
        if needed > self.capacity {
            let new_cap = needed.next_power_of_two().max(MIN_BUFFER_BYTES);
            log::debug!("Growing {} to {} bytes", self.label, new_cap);
            self.buffer.destroy();
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: new_cap as u64,
                usage: self.usage,
                mapped_at_creation: false,
            });
            self.capacity = new_cap;
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.ensure_capacity(device, bytes.len());
        queue.write_buffer(&self.buffer, 0, bytes);
    }
}

struct AtlasTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

// ──────────────────────────────────────────────
// WgpuRenderer
// ──────────────────────────────────────────────

pub struct WgpuRenderer {
    background_pipeline: wgpu::RenderPipeline,
    glyph_pipeline: wgpu::RenderPipeline,

    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    atlas_bind_group_layout: wgpu::BindGroupLayout,
    atlas_sampler: wgpu::Sampler,
    atlas: Option<AtlasTexture>,

    // One buffer per attribute; positions and indices only change with geometry.
    position_vb: GpuBuffer,
    uv_vb: GpuBuffer,
    foreground_vb: GpuBuffer,
    background_vb: GpuBuffer,
    index_buffer: GpuBuffer,
    uploaded_geometry: Option<u64>,

    /// Color outside the grid viewport.
    pub clear_color: Color,

    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl WgpuRenderer {
    /// Upload decoded RGBA atlas pixels, replacing any previous atlas.
    pub fn upload_atlas(&mut self, descriptor: &AtlasDescriptor, rgba: &[u8]) -> Result<(), AtlasError> {
        AtlasLayout::new(descriptor)?;
        let expected = descriptor.pixel_width as usize * descriptor.pixel_height as usize * 4;
        if rgba.len() != expected {
            return Err(AtlasError::PixelDataSize {
                expected,
                actual: rgba.len(),
            });
        }

        let size = wgpu::Extent3d {
            width: descriptor.pixel_width,
            height: descriptor.pixel_height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glyph_atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(descriptor.pixel_width * 4),
                rows_per_image: Some(descriptor.pixel_height),
            },
            size,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bg"),
            layout: &self.atlas_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.atlas_sampler),
                },
            ],
        });

        if let Some(old) = self.atlas.replace(AtlasTexture { texture, bind_group }) {
            old.texture.destroy();
        }
        log::info!(
            "Uploaded glyph atlas {}x{} ({}x{} cells)",
            descriptor.pixel_width,
            descriptor.pixel_height,
            descriptor.cell_pixel_width,
            descriptor.cell_pixel_height
        );
        Ok(())
    }

    pub fn has_atlas(&self) -> bool {
        self.atlas.is_some()
    }

    /// Upload the frame's arrays and record both passes into `view`.
    /// Draws: background quads (opaque) → glyph quads (alpha blended over them).
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        target_size: (u32, u32),
        frame: &Frame<'_>,
        viewport: &Viewport,
    ) {
        let uniforms = GridUniforms {
            screen_size: [target_size.0.max(1) as f32, target_size.1.max(1) as f32],
            offset: [viewport.offset_x as f32, viewport.offset_y as f32],
            scale: viewport.scale,
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        // ── Static geometry (only when rebuilt) ──
        if self.uploaded_geometry != Some(frame.geometry_generation) {
            self.position_vb
                .upload(&self.device, &self.queue, bytemuck::cast_slice(frame.positions));
            self.index_buffer
                .upload(&self.device, &self.queue, bytemuck::cast_slice(frame.indices));
            self.uploaded_geometry = Some(frame.geometry_generation);
        }

        // ── Per-frame attributes ──
        self.uv_vb
            .upload(&self.device, &self.queue, bytemuck::cast_slice(frame.uvs));
        self.foreground_vb
            .upload(&self.device, &self.queue, bytemuck::cast_slice(frame.foreground));
        self.background_vb
            .upload(&self.device, &self.queue, bytemuck::cast_slice(frame.background));

        let element_count = u32::try_from(frame.element_count()).unwrap_or(u32::MAX);
        let clear = self.clear_color;

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("grid_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if element_count == 0 {
            return;
        }

        pass.set_pipeline(&self.background_pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_vb.buffer.slice(..));
        pass.set_vertex_buffer(1, self.background_vb.buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..element_count, 0, 0..1);

        let Some(atlas) = self.atlas.as_ref() else {
            log::trace!("No atlas uploaded; skipping glyph pass");
            return;
        };

        pass.set_pipeline(&self.glyph_pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_bind_group(1, &atlas.bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_vb.buffer.slice(..));
        pass.set_vertex_buffer(1, self.uv_vb.buffer.slice(..));
        pass.set_vertex_buffer(2, self.foreground_vb.buffer.slice(..));
        pass.draw_indexed(0..element_count, 0, 0..1);
    }
}

impl Drop for WgpuRenderer {
    fn drop(&mut self) {
        log::debug!("Releasing renderer GPU resources");
        for buffer in [
            &self.position_vb,
            &self.uv_vb,
            &self.foreground_vb,
            &self.background_vb,
            &self.index_buffer,
        ] {
            buffer.buffer.destroy();
        }
        self.uniform_buffer.destroy();
        if let Some(atlas) = self.atlas.take() {
            atlas.texture.destroy();
        }
    }
}

// GPU vertex layouts for the batch arrays.
// Each attribute lives in its own buffer so UVs and colors can be re-uploaded
// every frame while positions stay put.

use bytemuck::{Pod, Zeroable};

/// Slot 0: quad corner position (unscaled px).
pub const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x2,
    }],
};

/// Atlas UV, bound next to positions in the glyph pass.
pub const UV_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x2,
    }],
};

/// RGB color at location 1 (background pass).
pub const BACKGROUND_COLOR_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    }],
};

/// RGB color at location 2 (glyph pass).
pub const FOREGROUND_COLOR_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x3,
    }],
};

/// Uniform block shared by both passes.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct GridUniforms {
    pub screen_size: [f32; 2], // render target size (px)
    pub offset: [f32; 2],      // viewport top-left in the target (px)
    pub scale: f32,
    pub _pad: [f32; 3],
}

// Headless wgpu device and render target.

use std::sync::Arc;

use anyhow::Context;

pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct HeadlessGpu {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    target: wgpu::Texture,
    view: wgpu::TextureView,
    size: (u32, u32),
}

impl HeadlessGpu {
    /// Open the default adapter and an offscreen target of `width x height`.
    /// Returns `Ok(None)` when the machine has no usable adapter.
    pub fn new(width: u32, height: u32) -> anyhow::Result<Option<Self>> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let Some(adapter) = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })) else {
            log::warn!("No GPU adapter found; frames will be built but not drawn");
            return Ok(None);
        };
        log::info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tessera_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let device = Arc::new(device);
        let (target, view) = create_target(&device, width, height);
        Ok(Some(Self {
            device,
            queue: Arc::new(queue),
            target,
            view,
            size: (width.max(1), height.max(1)),
        }))
    }

    pub fn device(&self) -> Arc<wgpu::Device> {
        Arc::clone(&self.device)
    }

    pub fn queue(&self) -> Arc<wgpu::Queue> {
        Arc::clone(&self.queue)
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Recreate the render target for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width.max(1), height.max(1));
        if size == self.size {
            return;
        }
        self.target.destroy();
        let (target, view) = create_target(&self.device, size.0, size.1);
        self.target = target;
        self.view = view;
        self.size = size;
    }

    /// Record one frame with `draw` and wait for the GPU to finish it.
    pub fn submit(&self, draw: impl FnOnce(&mut wgpu::CommandEncoder, &wgpu::TextureView)) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        draw(&mut encoder, &self.view);
        self.queue.submit(std::iter::once(encoder.finish()));
        self.device.poll(wgpu::Maintain::Wait);
    }
}

impl Drop for HeadlessGpu {
    fn drop(&mut self) {
        self.target.destroy();
    }
}

fn create_target(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen_target"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    (target, view)
}

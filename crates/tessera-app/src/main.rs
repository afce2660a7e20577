// Tessera demo: drives a console through a scripted session and renders each
// frame offscreen with wgpu.

mod demo;
mod font;
mod gpu;
mod settings;

use anyhow::Context;
use tessera_input::{Keyboard, Mouse};
use tessera_renderer::{Console, Viewport, WgpuRenderer};

use demo::{Demo, ScriptedInput};
use gpu::HeadlessGpu;

/// Upper bound on frames if the script never quits.
const MAX_FRAMES: u64 = 600;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = settings::load_settings();
    settings.validate().context("invalid settings")?;
    if settings::settings_path().is_some_and(|path| !path.exists()) {
        settings::save_settings(&settings);
    }
    log::info!("Starting {} ({}x{} cells)", settings.title, settings.width, settings.height);

    let font = font::load_font(&settings);
    let mut console = Console::new(settings.width, settings.height, &font.descriptor)?;
    console.set_scale(settings.scale)?;
    console.set_resize_mode(settings.resize_mode);

    let cell = (font.descriptor.cell_pixel_width, font.descriptor.cell_pixel_height);
    let (win_w, win_h) = settings.window_size();
    let viewport = console.fit_window(win_w, win_h)?;

    let mut keyboard = Keyboard::new();
    let mut mouse = Mouse::new(cell.0, cell.1, viewport.scale);
    calibrate_mouse(&mut mouse, cell, &viewport);

    let mut gpu = HeadlessGpu::new(win_w, win_h)?;
    let mut renderer = match gpu.as_ref() {
        Some(gpu) => {
            let mut renderer = WgpuRenderer::new(gpu.device(), gpu.queue(), gpu::TARGET_FORMAT);
            renderer.clear_color = settings.clear_color;
            renderer.upload_atlas(&font.descriptor, &font.rgba)?;
            Some(renderer)
        }
        None => None,
    };

    let mut demo = Demo::new(console.grid())?;
    let mut script = demo::script(cell).into_iter().peekable();
    let mut frames = 0u64;

    while frames < MAX_FRAMES {
        while let Some((_, input)) = script.next_if(|(at, _)| *at <= frames) {
            match input {
                ScriptedInput::Key(press) => keyboard.push(press),
                ScriptedInput::MouseMove(x, y) => mouse.on_move(x, y),
                ScriptedInput::MousePress(button) => mouse.on_press(button),
                ScriptedInput::MouseRelease(button) => mouse.on_release(button),
                ScriptedInput::Resize(w, h) => {
                    let viewport = console.fit_window(w, h)?;
                    calibrate_mouse(&mut mouse, cell, &viewport);
                    if let Some(gpu) = gpu.as_mut() {
                        gpu.resize(w, h);
                    }
                }
            }
        }

        let running = demo
            .update(&mut keyboard, &mut mouse, console.grid_mut())
            .context("demo update failed")?;
        if !running {
            break;
        }

        let viewport = *console.viewport();
        let frame = console.build_frame();
        match (gpu.as_ref(), renderer.as_mut()) {
            (Some(gpu), Some(renderer)) => {
                let target_size = gpu.size();
                gpu.submit(|encoder, view| renderer.render(encoder, view, target_size, &frame, &viewport));
            }
            _ => log::trace!("Built frame {} ({} indices)", frames, frame.element_count()),
        }
        frames += 1;
    }

    log::info!("Rendered {} frames; player ended at {:?}", frames, demo.player());
    if let Some(cell) = demo.inspected() {
        log::info!("Last inspected glyph: {}", cell.glyph);
    }
    // Renderer before device
    drop(renderer);
    drop(gpu);
    Ok(())
}

fn calibrate_mouse(mouse: &mut Mouse, cell: (u32, u32), viewport: &Viewport) {
    mouse.calibrate(cell.0, cell.1, viewport.offset_x, viewport.offset_y, viewport.scale);
}

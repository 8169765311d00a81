mod renderer;
use renderer::{Renderer, ShaderSet, Swapchain};

use std::ffi::{CStr, CString};
use std::ptr;
use std::time::Instant;

use anyhow::{anyhow, Context as _};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

const DIMS: PhysicalSize<u32> = PhysicalSize {
    width: 800,
    height: 600,
};
const TITLE: &str = "LearnOpenGL";
const GL_VERSION: Version = Version { major: 3, minor: 3 };

const EMBEDDED_SHADERS: ShaderSet<'static> = ShaderSet {
    vertex: include_str!("data/triangle.vert"),
    orange: include_str!("data/orange.frag"),
    uniform_color: include_str!("data/uniform_color.frag"),
};

// Relative to the crate root, like `cargo run`.
const SHADER_FILES: ShaderSet<'static> = ShaderSet {
    vertex: "src/data/triangle.vert",
    orange: "src/data/orange.frag",
    uniform_color: "src/data/uniform_color.frag",
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // winit pins the event loop, and with it every GL call, to this thread.
    let event_loop = EventLoop::new();
    let (window, swapchain) = create_window(&event_loop)?;

    renderer::debug::install();

    let renderer = if cfg!(feature = "shader-files") {
        log::info!("loading shaders from {}", SHADER_FILES.vertex);
        Renderer::from_paths(swapchain, &SHADER_FILES)
    } else {
        Renderer::from_sources(swapchain, &EMBEDDED_SHADERS)
    }
    .context("failed to build shader programs")?;

    let mut renderer = Some(renderer);
    let start = Instant::now();
    #[cfg(debug_assertions)]
    let mut fps_counter = fps_counter::FPSCounter::new();

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();

        match event {
            Event::WindowEvent { event, .. } => {
                if closes_window(&event) {
                    log::info!("closing");
                    // Delete GL objects while the context is still current.
                    renderer.take();
                    control_flow.set_exit();
                    return;
                }

                match event {
                    WindowEvent::Resized(size) => {
                        if let Some(renderer) = renderer.as_mut() {
                            renderer.resize(size);
                        }
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        if let Some(renderer) = renderer.as_mut() {
                            renderer.resize(*new_inner_size);
                        }
                    }
                    _ => {}
                }
            }
            Event::MainEventsCleared => window.request_redraw(),
            Event::RedrawRequested(_) => {
                if let Some(r) = renderer.as_mut() {
                    if let Err(err) = r.render(start.elapsed().as_secs_f64()) {
                        log::error!("render failed: {:#}", err);
                        renderer.take();
                        control_flow.set_exit_with_code(1);
                        return;
                    }

                    #[cfg(debug_assertions)]
                    log::debug!("fps: {}", fps_counter.tick());
                }
            }
            _ => {}
        }
    })
}

fn create_window(event_loop: &EventLoop<()>) -> anyhow::Result<(Window, Swapchain)> {
    let wb = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(DIMS)
        .with_min_inner_size(LogicalSize::new(64.0, 64.0));

    let (window, gl_config) = DisplayBuilder::new()
        .with_window_builder(Some(wb))
        .build(event_loop, ConfigTemplateBuilder::new(), |configs| {
            // find_configs fails before the picker runs when nothing matches,
            // so the iterator is never empty here.
            configs
                .reduce(|best, config| {
                    if config.num_samples() > best.num_samples() {
                        config
                    } else {
                        best
                    }
                })
                .expect("glutin offered no framebuffer configs")
        })
        .map_err(|err| anyhow!("failed to create window: {}", err))?;
    let window = window.ok_or_else(|| anyhow!("display builder returned no window"))?;

    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(GL_VERSION)))
        .with_profile(GlProfile::Core)
        .build(Some(window.raw_window_handle()));

    let display = gl_config.display();
    let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
        .context("failed to create an OpenGL 3.3 core context")?;

    let surface_attributes = window.build_surface_attributes(Default::default());
    let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
        .context("failed to create window surface")?;
    let context = not_current
        .make_current(&surface)
        .context("failed to make context current")?;

    gl::load_with(|symbol| match CString::new(symbol) {
        Ok(symbol) => display.get_proc_address(symbol.as_c_str()),
        Err(_) => ptr::null(),
    });
    log::info!(
        "created {}x{} window, GL_VERSION {}",
        DIMS.width,
        DIMS.height,
        gl_version_string()
    );

    let swapchain = Swapchain::new(surface, context, window.inner_size());
    Ok((window, swapchain))
}

fn gl_version_string() -> String {
    unsafe {
        let version = gl::GetString(gl::VERSION);
        if version.is_null() {
            return "unknown".to_owned();
        }
        CStr::from_ptr(version as *const _).to_string_lossy().into_owned()
    }
}

fn closes_window(event: &WindowEvent<'_>) -> bool {
    matches!(
        event,
        WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                input: KeyboardInput {
                    state: ElementState::Pressed,
                    virtual_keycode: Some(VirtualKeyCode::Escape),
                    ..
                },
                ..
            }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{DeviceId, ModifiersState};

    #[allow(deprecated)]
    fn key(keycode: VirtualKeyCode, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(keycode),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        }
    }

    #[test]
    fn escape_press_closes() {
        assert!(closes_window(&key(VirtualKeyCode::Escape, ElementState::Pressed)));
    }

    #[test]
    fn escape_release_does_not_close() {
        assert!(!closes_window(&key(VirtualKeyCode::Escape, ElementState::Released)));
    }

    #[test]
    fn other_keys_do_not_close() {
        assert!(!closes_window(&key(VirtualKeyCode::Space, ElementState::Pressed)));
    }

    #[test]
    fn close_request_closes() {
        assert!(closes_window(&WindowEvent::CloseRequested));
        assert!(!closes_window(&WindowEvent::Focused(true)));
    }

    #[test]
    fn embedded_shaders_match_files() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        for (source, path) in [
            (EMBEDDED_SHADERS.vertex, SHADER_FILES.vertex),
            (EMBEDDED_SHADERS.orange, SHADER_FILES.orange),
            (EMBEDDED_SHADERS.uniform_color, SHADER_FILES.uniform_color),
        ]
        .iter()
        {
            let on_disk = std::fs::read_to_string(root.join(path)).unwrap();
            assert_eq!(*source, on_disk, "{}", path);
        }
    }

    #[test]
    fn color_uniform_is_declared() {
        assert!(EMBEDDED_SHADERS.uniform_color.contains("uniform vec4 ourColor;"));
        assert!(EMBEDDED_SHADERS.vertex.contains("layout (location = 0) in vec3 aPos;"));
    }
}

use winit::dpi::PhysicalSize;

mod buffer;
pub mod debug;
mod error;
mod pipeline;
mod shader;
mod swapchain;
mod vertex;
mod vertex_array;

use error::Error;
use pipeline::Program;
use shader::{Shader, ShaderKind};
pub use swapchain::Swapchain;
use vertex::{LOWER_LEFT, UPPER_RIGHT};
use vertex_array::VertexArray;

const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];
const COLOR_UNIFORM: &str = "ourColor";

pub struct ShaderSet<'a> {
    pub vertex: &'a str,
    pub orange: &'a str,
    pub uniform_color: &'a str,
}

pub struct Renderer {
    frame: u64,
    // GL objects go before the swapchain so they are deleted while the context is current.
    orange: Program,
    uniform_color: Program,
    upper_right: VertexArray,
    lower_left: VertexArray,
    swapchain: Swapchain,
}

impl Renderer {
    pub fn from_sources(swapchain: Swapchain, sources: &ShaderSet<'_>) -> Result<Self, Error> {
        let (orange, uniform_color) = link_programs(
            sources,
            |kind, source| Shader::compile(kind, source, "embedded source"),
            Program::link,
        )?;
        Ok(Self::new(swapchain, orange, uniform_color))
    }

    /// `paths` are read at startup, relative to the working directory.
    pub fn from_paths(swapchain: Swapchain, paths: &ShaderSet<'_>) -> Result<Self, Error> {
        let (orange, uniform_color) = link_programs(
            paths,
            |kind, path| Shader::from_path(kind, path),
            Program::link,
        )?;
        Ok(Self::new(swapchain, orange, uniform_color))
    }

    fn new(swapchain: Swapchain, orange: Program, uniform_color: Program) -> Self {
        let upper_right = VertexArray::new(&UPPER_RIGHT);
        let lower_left = VertexArray::new(&LOWER_LEFT);
        log::info!(
            "renderer ready ({}x{})",
            swapchain.dims.width,
            swapchain.dims.height
        );

        Renderer {
            frame: 0,
            orange,
            uniform_color,
            upper_right,
            lower_left,
            swapchain,
        }
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.swapchain.resize(size);
    }

    /// Draws one frame. `elapsed` is seconds since startup.
    pub fn render(&mut self, elapsed: f64) -> anyhow::Result<()> {
        let [r, g, b, a] = CLEAR_COLOR;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        let green = green_channel(elapsed);
        log::trace!("frame {}: green = {:.3}", self.frame, green);
        let color_location = self.uniform_color.uniform_location(COLOR_UNIFORM)?;

        self.orange.bind();
        self.upper_right.draw();

        self.uniform_color.bind();
        self.uniform_color
            .set_vec4(color_location, [0.0, green, 0.0, 1.0]);
        self.lower_left.draw();
        unsafe { gl::BindVertexArray(0) }

        self.swapchain.present()?;
        self.frame += 1;
        Ok(())
    }
}

// The vertex stage is compiled once and linked into both programs. All three
// shaders are deleted when they drop at the end.
fn link_programs<'a, S, P>(
    set: &ShaderSet<'a>,
    mut compile: impl FnMut(ShaderKind, &'a str) -> Result<S, Error>,
    mut link: impl FnMut(&[&S]) -> Result<P, Error>,
) -> Result<(P, P), Error> {
    let vertex = compile(ShaderKind::Vertex, set.vertex)?;
    let orange = compile(ShaderKind::Fragment, set.orange)?;
    let uniform_color = compile(ShaderKind::Fragment, set.uniform_color)?;

    let orange = link(&[&vertex, &orange])?;
    let uniform_color = link(&[&vertex, &uniform_color])?;
    Ok((orange, uniform_color))
}

/// Oscillates between 0 and 1 with a period of 2π seconds.
pub fn green_channel(elapsed: f64) -> f32 {
    ((elapsed.sin() / 2.0) + 0.5) as f32
}

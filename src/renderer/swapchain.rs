use glutin::context::PossiblyCurrentContext;
use glutin::prelude::*;
use glutin::surface::{Surface, WindowSurface};
use std::num::NonZeroU32;
use winit::dpi::PhysicalSize;

pub struct Swapchain {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    pub dims: PhysicalSize<u32>,
}

impl Swapchain {
    pub fn new(
        surface: Surface<WindowSurface>,
        context: PossiblyCurrentContext,
        dims: PhysicalSize<u32>,
    ) -> Self {
        let mut surface = Swapchain {
            surface,
            context,
            dims,
        };
        surface.resize(dims);
        surface
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        let (width, height) = match framebuffer_extent(size) {
            Some(extent) => extent,
            None => {
                log::debug!("ignoring resize to {}x{}", size.width, size.height);
                return;
            }
        };

        self.surface.resize(&self.context, width, height);
        unsafe { gl::Viewport(0, 0, size.width as i32, size.height as i32) }
        self.dims = size;
    }

    pub fn present(&self) -> glutin::error::Result<()> {
        self.surface.swap_buffers(&self.context)
    }
}

fn framebuffer_extent(size: PhysicalSize<u32>) -> Option<(NonZeroU32, NonZeroU32)> {
    Some((NonZeroU32::new(size.width)?, NonZeroU32::new(size.height)?))
}

use gl::types::{GLsizei, GLuint};

use super::buffer::Buffer;
use super::vertex::Vertex;

pub struct VertexArray {
    id: GLuint,
    // Deleted after the array, when the field drops.
    _buffer: Buffer,
    count: GLsizei,
}

impl VertexArray {
    pub fn new(vertices: &[Vertex]) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
            gl::BindVertexArray(id);
        }

        let buffer = Buffer::new(&Vertex::flatten(vertices));
        let layout = Vertex::LAYOUT;
        unsafe {
            gl::VertexAttribPointer(
                layout.location,
                layout.components,
                gl::FLOAT,
                gl::FALSE,
                layout.stride,
                layout.offset as *const _,
            );
            gl::EnableVertexAttribArray(layout.location);

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        log::debug!(
            "uploaded {} vertices ({} bytes) to vao {}",
            vertices.len(),
            buffer.len,
            id
        );

        VertexArray {
            id,
            _buffer: buffer,
            count: vertices.len() as GLsizei,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
            gl::DrawArrays(gl::TRIANGLES, 0, self.count);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) }
    }
}

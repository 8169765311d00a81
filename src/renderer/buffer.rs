use gl::types::{GLsizeiptr, GLuint};
use std::mem;

pub struct Buffer {
    id: GLuint,
    pub len: usize,
}

impl Buffer {
    /// Leaves the buffer bound to `GL_ARRAY_BUFFER`.
    pub fn new<T: Copy>(content: &[T]) -> Self {
        let buffer_len = byte_len(content);
        assert_ne!(buffer_len, 0);

        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(gl::ARRAY_BUFFER, id);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                buffer_len as GLsizeiptr,
                content.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }

        Buffer {
            id,
            len: buffer_len,
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

fn byte_len<T>(content: &[T]) -> usize {
    content.len() * mem::size_of::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::{Vertex, UPPER_RIGHT};

    #[test]
    fn triangle_byte_length() {
        assert_eq!(byte_len(&UPPER_RIGHT), 36);
        assert_eq!(byte_len::<Vertex>(&[]), 0);
    }
}

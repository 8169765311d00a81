use std::mem;

use gl::types::{GLint, GLsizei, GLuint};

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
}

const fn v(x: f32, y: f32, z: f32) -> Vertex {
    Vertex {
        position: [x, y, z],
    }
}

pub const UPPER_RIGHT: [Vertex; 3] = [
    v(0.5, 0.5, 0.0),  // top right
    v(0.5, -0.5, 0.0), // bottom right
    v(-0.5, 0.5, 0.0), // top left
];

pub const LOWER_LEFT: [Vertex; 3] = [
    v(0.5, -0.5, 0.0),  // bottom right
    v(-0.5, -0.5, 0.0), // bottom left
    v(-0.5, 0.5, 0.0),  // top left
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    pub location: GLuint,
    pub components: GLint,
    pub stride: GLsizei,
    pub offset: usize,
}

impl Vertex {
    pub const LAYOUT: AttributeLayout = AttributeLayout {
        location: 0,
        components: 3,
        stride: mem::size_of::<Vertex>() as GLsizei,
        offset: 0,
    };

    pub fn flatten(vertices: &[Vertex]) -> Vec<f32> {
        vertices.iter().flat_map(|v| v.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(mem::size_of::<Vertex>(), 3 * mem::size_of::<f32>());
        assert_eq!(Vertex::LAYOUT.stride, 12);
        assert_eq!(Vertex::LAYOUT.offset, 0);
        assert_eq!(Vertex::LAYOUT.location, 0);
    }

    #[test]
    fn triangles_flatten_to_whole_vertices() {
        for triangle in [&UPPER_RIGHT, &LOWER_LEFT] {
            let floats = Vertex::flatten(triangle);
            assert_eq!(floats.len() % Vertex::LAYOUT.components as usize, 0);
            assert_eq!(floats.len() / 3, 3);
        }
    }

    #[test]
    fn triangles_share_the_diagonal() {
        assert!(LOWER_LEFT.contains(&UPPER_RIGHT[1]));
        assert!(LOWER_LEFT.contains(&UPPER_RIGHT[2]));
        assert!(!LOWER_LEFT.contains(&UPPER_RIGHT[0]));
    }

    #[test]
    fn flatten_keeps_order() {
        assert_eq!(
            &Vertex::flatten(&UPPER_RIGHT)[..6],
            &[0.5, 0.5, 0.0, 0.5, -0.5, 0.0]
        );
    }
}

//! Quad → vertex conversion for GPU upload
//!
//! Converts positioned glyph quads into indexed triangles. Each quad
//! generates 4 vertices and 6 indices (2 triangles).

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Vec2;
use crate::render::GlyphQuad;

/// Vertex data for text rendering
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TextVertex {
    /// Position in text-local space
    pub position: [f32; 2],
    /// UV texture coordinates (image rows top to bottom)
    pub uv: [f32; 2],
}

/// Triangles for `quads` drawn at `origin`
///
/// Winding is counter-clockwise with +Y up.
pub fn quads_to_vertices(quads: &[GlyphQuad], origin: Vec2) -> (Vec<TextVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(quads.len() * 4);
    let mut indices = Vec::with_capacity(quads.len() * 6);

    for quad in quads {
        let base_index = vertices.len() as u32;
        vertices.extend_from_slice(&quad_vertices(quad, origin));
        indices.extend_from_slice(&[
            base_index, base_index + 1, base_index + 2, // First triangle
            base_index, base_index + 2, base_index + 3, // Second triangle
        ]);
    }

    (vertices, indices)
}

/// Raw bytes of a vertex slice, ready for a vertex buffer
pub fn vertex_bytes(vertices: &[TextVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

fn quad_vertices(quad: &GlyphQuad, origin: Vec2) -> [TextVertex; 4] {
    let quad = quad.translated(origin);
    let min = quad.position;
    let max = min + quad.size;

    [
        // Bottom-left
        TextVertex { position: [min.x, min.y], uv: [0.0, 1.0] },
        // Bottom-right
        TextVertex { position: [max.x, min.y], uv: [1.0, 1.0] },
        // Top-right
        TextVertex { position: [max.x, max.y], uv: [1.0, 0.0] },
        // Top-left
        TextVertex { position: [min.x, max.y], uv: [0.0, 0.0] },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(x: f32, y: f32) -> GlyphQuad {
        GlyphQuad {
            texture: None,
            position: Vec2::new(x, y),
            size: Vec2::new(10.0, 20.0),
        }
    }

    #[test]
    fn test_text_vertex_size() {
        assert_eq!(
            std::mem::size_of::<TextVertex>(),
            std::mem::size_of::<f32>() * 4 // 2 position + 2 uv
        );
    }

    #[test]
    fn test_quads_to_vertices() {
        let (vertices, indices) = quads_to_vertices(&[quad(0.0, 0.0), quad(10.0, -7.0)], Vec2::new(5.0, 5.0));

        assert_eq!(vertices.len(), 8);
        assert_eq!(indices, [0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(vertices[0].position, [5.0, 5.0]);
        assert_eq!(vertices[2].position, [15.0, 25.0]);
        assert_eq!(vertices[4].position, [15.0, -2.0]);
    }

    #[test]
    fn test_vertex_bytes() {
        let (vertices, _) = quads_to_vertices(&[quad(0.0, 0.0)], Vec2::zeros());
        assert_eq!(vertex_bytes(&vertices).len(), 4 * std::mem::size_of::<TextVertex>());
    }
}

#![expect(unsafe_code)]

use glow::HasContext as _;

use crate::{check_for_gl_error, painter::PainterError};

// ----------------------------------------------------------------------------

#[derive(Debug)]
pub(crate) struct BufferInfo {
    pub location: u32,
    pub vector_size: i32,
    pub data_type: u32, // e.g. GL_FLOAT
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

// ----------------------------------------------------------------------------

/// A GL vertex array object together with the buffers it records.
///
/// OpenGL 3.3 core always has VAOs, and requires one to be bound for any draw call.
pub(crate) struct VertexArrayObject {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
}

impl VertexArrayObject {
    /// Records the attribute layout of `vbo` and the element buffer `ebo`.
    ///
    /// An empty `buffer_infos` is allowed: the VAO then feeds no attributes.
    pub(crate) fn new(
        gl: &glow::Context,
        vbo: glow::Buffer,
        ebo: glow::Buffer,
        buffer_infos: &[BufferInfo],
    ) -> Result<Self, PainterError> {
        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|err| PainterError::CreateObject("vertex array", err))?;
            check_for_gl_error!(gl, "create_vertex_array");

            // Store state in the VAO:
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));

            for attribute in buffer_infos {
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.vector_size,
                    attribute.data_type,
                    attribute.normalized,
                    attribute.stride,
                    attribute.offset,
                );
                check_for_gl_error!(gl, "vertex_attrib_pointer_f32");
                gl.enable_vertex_attrib_array(attribute.location);
                check_for_gl_error!(gl, "enable_vertex_attrib_array");
            }

            // The element buffer binding is part of the VAO state, the array buffer binding is not.
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self { vao, vbo, ebo })
        }
    }

    pub(crate) fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
        }
        check_for_gl_error!(gl, "bind_vertex_array");
    }

    pub(crate) fn unbind(gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(None);
        }
    }

    pub(crate) fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}

#![expect(unsafe_code)]

use glow::HasContext as _;

use crate::{
    check_for_gl_error,
    frame::{DrawCall, FramePlan},
    mesh::{IndexFormat, LineMesh},
    misc_util::{compile_shader, link_program},
    vao::{BufferInfo, VertexArrayObject},
};

const GLSL_VERSION: &str = "#version 330\n";
const VERT_SRC: &str = include_str!("shader/vertex.glsl");
const FRAG_SRC: &str = include_str!("shader/fragment.glsl");

/// Name of the transform uniform in the vertex shader.
pub const MVP_UNIFORM: &str = "u_mvp";

/// Name of the position attribute in the vertex shader.
pub const POSITION_ATTRIBUTE: &str = "a_pos";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PainterError {
    #[error("failed to create GL {0}: {1}")]
    CreateObject(&'static str, String),

    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link shader program: {0}")]
    Link(String),
}

/// OpenGL painter for a single [`LineMesh`].
///
/// The mesh is uploaded once, in [`Painter::new`], and never modified.
///
/// This struct must be destroyed with [`Painter::destroy`] before dropping, to ensure OpenGL
/// objects have been properly deleted and are not leaked.
pub struct Painter {
    program: glow::Program,
    u_mvp: Option<glow::UniformLocation>,
    vao: VertexArrayObject,
    index_format: IndexFormat,
    index_count: u32,
    destroyed: bool,
}

impl Painter {
    /// Compiles the shaders, links them and uploads `mesh`.
    ///
    /// Requires an OpenGL 3.3 core (or newer) context to be current.
    ///
    /// # Errors
    /// If a shader fails to compile, the program fails to link,
    /// or a GL object can't be created.
    pub fn new(gl: &glow::Context, mesh: &LineMesh) -> Result<Self, PainterError> {
        unsafe {
            log::debug!(
                "GL version: {:?}, GLSL version: {:?}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION)
            );
        }

        let program = create_program(gl)?;

        let (u_mvp, a_pos) = unsafe {
            (
                gl.get_uniform_location(program, MVP_UNIFORM),
                gl.get_attrib_location(program, POSITION_ATTRIBUTE),
            )
        };
        if u_mvp.is_none() {
            log::warn!("Uniform {MVP_UNIFORM:?} not found; the transform will not be uploaded");
        }

        let buffer_infos = if let Some(location) = a_pos {
            vec![BufferInfo {
                location,
                vector_size: 3,
                data_type: glow::FLOAT,
                normalized: false,
                stride: 0,
                offset: 0,
            }]
        } else {
            log::warn!("Attribute {POSITION_ATTRIBUTE:?} not found; no positions will reach the shader");
            vec![]
        };

        let (vbo, ebo) = unsafe {
            let vbo = gl
                .create_buffer()
                .map_err(|err| PainterError::CreateObject("vertex buffer", err))?;
            let ebo = gl
                .create_buffer()
                .map_err(|err| PainterError::CreateObject("element buffer", err))?;

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, mesh.position_bytes(), glow::STATIC_DRAW);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            (vbo, ebo)
        };

        let vao = VertexArrayObject::new(gl, vbo, ebo, &buffer_infos)?;

        // The element buffer can only be bound through a VAO in a core context.
        vao.bind(gl);
        unsafe {
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                mesh.indices().as_bytes(),
                glow::STATIC_DRAW,
            );
        }
        VertexArrayObject::unbind(gl);
        check_for_gl_error!(gl, "upload mesh");

        log::debug!(
            "Uploaded {} vertices and {} {:?} indices",
            mesh.vertex_count(),
            mesh.indices().len(),
            mesh.index_format()
        );

        Ok(Self {
            program,
            u_mvp,
            vao,
            index_format: mesh.index_format(),
            index_count: u32::try_from(mesh.indices().len()).unwrap_or(u32::MAX),
            destroyed: false,
        })
    }

    pub fn index_format(&self) -> IndexFormat {
        self.index_format
    }

    /// Executes `plan` into the currently bound framebuffer.
    pub fn paint(&self, gl: &glow::Context, plan: &FramePlan) {
        debug_assert!(!self.destroyed, "painting with a destroyed painter");

        unsafe {
            if plan.depth_test {
                gl.enable(glow::DEPTH_TEST);
            } else {
                gl.disable(glow::DEPTH_TEST);
            }

            let [x, y, width, height] = plan.viewport();
            gl.viewport(x, y, width, height);

            let [r, g, b, a] = plan.clear_color;
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.uniform_matrix_4_f32_slice(self.u_mvp.as_ref(), false, &plan.mvp.to_cols_array());
        }

        self.vao.bind(gl);
        for draw_call in &plan.draw_calls {
            self.draw(gl, draw_call);
        }
        VertexArrayObject::unbind(gl);

        check_for_gl_error!(gl, "paint");
    }

    fn draw(&self, gl: &glow::Context, draw_call: &DrawCall) {
        log::trace!("{draw_call:?}");

        match *draw_call {
            DrawCall::Indexed {
                topology,
                count,
                primitive_restart,
            } => unsafe {
                if primitive_restart {
                    gl.enable(glow::PRIMITIVE_RESTART_FIXED_INDEX);
                }
                gl.draw_elements(
                    topology.gl_mode(),
                    count.min(self.index_count) as i32,
                    self.index_format.gl_type(),
                    0,
                );
                if primitive_restart {
                    gl.disable(glow::PRIMITIVE_RESTART_FIXED_INDEX);
                }
            },
            DrawCall::Arrays {
                topology,
                first,
                count,
            } => unsafe {
                gl.draw_arrays(topology.gl_mode(), first as i32, count as i32);
            },
        }
    }

    /// Deletes the program, the vertex array and its buffers.
    ///
    /// The same context that created the painter must be current.
    pub fn destroy(&mut self, gl: &glow::Context) {
        if self.destroyed {
            return;
        }
        unsafe {
            gl.delete_program(self.program);
        }
        self.vao.destroy(gl);
        self.destroyed = true;
    }
}

impl Drop for Painter {
    fn drop(&mut self) {
        if !self.destroyed {
            log::warn!("You forgot to call destroy() on the line painter. Resources will leak!");
        }
    }
}

fn create_program(gl: &glow::Context) -> Result<glow::Program, PainterError> {
    let vert = compile_shader(gl, ShaderStage::Vertex, &format!("{GLSL_VERSION}{VERT_SRC}"))?;
    let frag = match compile_shader(gl, ShaderStage::Fragment, &format!("{GLSL_VERSION}{FRAG_SRC}")) {
        Ok(frag) => frag,
        Err(err) => {
            unsafe { gl.delete_shader(vert) };
            return Err(err);
        }
    };

    let program = link_program(gl, [&vert, &frag]);

    unsafe {
        if let Ok(program) = &program {
            gl.detach_shader(*program, vert);
            gl.detach_shader(*program, frag);
        }
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    program
}

#[test]
fn test_shader_sources() {
    for source in [VERT_SRC, FRAG_SRC] {
        assert!(!source.contains("#version"), "the version line is prepended");
    }
    assert!(VERT_SRC.contains(MVP_UNIFORM));
    assert!(VERT_SRC.contains(POSITION_ATTRIBUTE));
    assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
    assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
}

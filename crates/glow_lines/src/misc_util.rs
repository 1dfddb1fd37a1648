#![expect(unsafe_code)]

use glow::HasContext as _;

use crate::painter::{PainterError, ShaderStage};

pub(crate) fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, PainterError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(|err| PainterError::CreateObject("shader", err))?;

        gl.shader_source(shader, source);

        gl.compile_shader(shader);

        if gl.get_shader_compile_status(shader) {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            Err(PainterError::Compile { stage, log })
        }
    }
}

pub(crate) fn link_program<'a, T: IntoIterator<Item = &'a glow::Shader>>(
    gl: &glow::Context,
    shaders: T,
) -> Result<glow::Program, PainterError> {
    unsafe {
        let program = gl
            .create_program()
            .map_err(|err| PainterError::CreateObject("program", err))?;

        for shader in shaders {
            gl.attach_shader(program, *shader);
        }

        gl.link_program(program);

        if gl.get_program_link_status(program) {
            Ok(program)
        } else {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            Err(PainterError::Link(log))
        }
    }
}

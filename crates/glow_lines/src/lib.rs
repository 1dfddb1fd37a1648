//! Line painting with [`glow`](https://github.com/grovesNL/glow), built to exercise
//! primitive restart on an OpenGL 3.3 core context.
//!
//! The GPU-free parts ([`LineMesh`], [`FramePlan`], [`transform`] and [`topology`])
//! describe everything a frame does, so they can be tested without a context.
//! [`Painter`] turns a [`FramePlan`] into GL calls.

#![expect(clippy::undocumented_unsafe_blocks)]

pub mod frame;
pub mod mesh;
pub mod painter;
pub mod topology;
pub mod transform;

pub use glow;

pub use frame::{DrawCall, FramePlan, Topology};
pub use mesh::{IndexFormat, Indices, LineMesh, MeshError};
pub use painter::{Painter, PainterError, ShaderStage};

mod misc_util;
mod vao;

/// Check for OpenGL error and report it using `log::error`.
///
/// Only active in debug builds!
///
/// ``` no_run
/// # let glow_context = todo!();
/// use glow_lines::check_for_gl_error;
/// check_for_gl_error!(glow_context);
/// check_for_gl_error!(glow_context, "during painting");
/// ```
#[macro_export]
macro_rules! check_for_gl_error {
    ($gl: expr) => {{
        if cfg!(debug_assertions) {
            $crate::check_for_gl_error_impl($gl, file!(), line!(), "")
        }
    }};
    ($gl: expr, $context: literal) => {{
        if cfg!(debug_assertions) {
            $crate::check_for_gl_error_impl($gl, file!(), line!(), $context)
        }
    }};
}

#[doc(hidden)]
pub fn check_for_gl_error_impl(gl: &glow::Context, file: &str, line: u32, context: &str) {
    use glow::HasContext as _;
    #[expect(unsafe_code)]
    let error_code = unsafe { gl.get_error() };
    if error_code == glow::NO_ERROR {
        return;
    }

    let error_str = gl_error_name(error_code);
    if context.is_empty() {
        log::error!("GL error, at {file}:{line}: {error_str} (0x{error_code:X})");
    } else {
        log::error!("GL error, at {file}:{line} ({context}): {error_str} (0x{error_code:X})");
    }
}

/// Symbolic name of a `glGetError` code.
pub fn gl_error_name(error_code: u32) -> &'static str {
    match error_code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "<unknown>",
    }
}

#[test]
fn test_gl_error_name() {
    assert_eq!(gl_error_name(glow::INVALID_OPERATION), "GL_INVALID_OPERATION");
    assert_eq!(gl_error_name(glow::NO_ERROR), "GL_NO_ERROR");
    assert_eq!(gl_error_name(0x1234), "<unknown>");
}

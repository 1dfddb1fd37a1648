//! Everything one frame does, as data.
//!
//! [`FramePlan::new`] makes every per-frame decision; [`crate::Painter::paint`]
//! only executes it. This keeps the draw-call sequence testable without a GL context.

use glam::Mat4;

use crate::{
    mesh::{Indices, LineMesh},
    topology, transform,
};

/// Background colour: dark green.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.3, 0.0, 1.0];

/// Number of vertices in the non-indexed draw.
pub const UNINDEXED_VERTEX_COUNT: u32 = 2;

/// Line primitive topologies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// `GL_LINES`: every two vertices form an independent segment.
    Lines,

    /// `GL_LINE_STRIP`: every vertex connects to the previous one.
    LineStrip,
}

impl Topology {
    pub fn gl_mode(self) -> u32 {
        match self {
            Self::Lines => glow::LINES,
            Self::LineStrip => glow::LINE_STRIP,
        }
    }

    fn segments(self, vertices: &[u32], restart: Option<u32>) -> Vec<[u32; 2]> {
        match self {
            Self::Lines => topology::line_list_segments(vertices, restart),
            Self::LineStrip => topology::line_strip_segments(vertices, restart),
        }
    }
}

/// One draw call issued by the painter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCall {
    /// `glDrawElements` over the first `count` indices of the element buffer.
    Indexed {
        topology: Topology,
        count: u32,

        /// Enable `GL_PRIMITIVE_RESTART_FIXED_INDEX` around this call.
        primitive_restart: bool,
    },

    /// `glDrawArrays` over `count` vertices starting at `first`.
    Arrays {
        topology: Topology,
        first: u32,
        count: u32,
    },
}

impl DrawCall {
    /// The segments the rasterizer will draw for this call.
    ///
    /// Non-indexed draws ignore `indices` entirely.
    pub fn segments(&self, indices: &Indices) -> Vec<[u32; 2]> {
        match *self {
            Self::Indexed {
                topology,
                count,
                primitive_restart,
            } => {
                let restart = primitive_restart.then(|| indices.format().restart_index());
                let indices = indices.to_u32();
                let used = &indices[..(count as usize).min(indices.len())];
                topology.segments(used, restart)
            }
            Self::Arrays {
                topology,
                first,
                count,
            } => {
                // Past `u32::MAX` GL would read out of range anyway.
                let vertices: Vec<u32> = (first..first.saturating_add(count)).collect();
                topology.segments(&vertices, None)
            }
        }
    }
}

/// The complete recipe of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Framebuffer size in physical pixels; also the viewport.
    pub framebuffer_size: [u32; 2],

    pub aspect_ratio: f32,

    pub clear_color: [f32; 4],

    /// Depth testing is switched off every frame.
    pub depth_test: bool,

    pub mvp: Mat4,

    /// Issued in order.
    pub draw_calls: Vec<DrawCall>,
}

impl FramePlan {
    pub fn new(framebuffer_size: [u32; 2], mesh: &LineMesh) -> Self {
        let aspect_ratio = transform::aspect_ratio(framebuffer_size);
        let index_count = u32::try_from(mesh.indices().len()).unwrap_or(u32::MAX);

        Self {
            framebuffer_size,
            aspect_ratio,
            clear_color: CLEAR_COLOR,
            depth_test: false,
            mvp: transform::mvp(aspect_ratio),
            draw_calls: vec![
                DrawCall::Indexed {
                    topology: Topology::LineStrip,
                    count: index_count,
                    primitive_restart: true,
                },
                DrawCall::Arrays {
                    topology: Topology::Lines,
                    first: 0,
                    count: UNINDEXED_VERTEX_COUNT,
                },
            ],
        }
    }

    /// `[x, y, width, height]` for `glViewport`.
    pub fn viewport(&self) -> [i32; 4] {
        let [width, height] = self.framebuffer_size;
        [
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        ]
    }

    /// Segments drawn by each draw call, in order.
    pub fn segments(&self, mesh: &LineMesh) -> Vec<Vec<[u32; 2]>> {
        self.draw_calls
            .iter()
            .map(|draw_call| draw_call.segments(mesh.indices()))
            .collect()
    }
}

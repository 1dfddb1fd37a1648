//! Bootstrap and frame loop, driven by the winit event loop.

#![expect(unsafe_code)]

use glow_lines::{FramePlan, LineMesh, Painter};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

use crate::{
    error::{Error, Result},
    frame_loop::FrameLoop,
    gl_window::GlutinWindowContext,
    options::SmokeOptions,
};

/// State that exists once the window and context are up.
///
/// Field order is drop order: painter, then GL functions, then the context itself.
struct Running {
    painter: Painter,
    gl: glow::Context,
    gl_window: GlutinWindowContext,
}

pub struct SmokeApp {
    options: SmokeOptions,
    mesh: LineMesh,
    frame_loop: FrameLoop,
    running: Option<Running>,
    return_result: Result,
}

impl SmokeApp {
    pub fn new(options: SmokeOptions, mesh: LineMesh) -> Self {
        Self {
            options,
            mesh,
            frame_loop: FrameLoop::default(),
            running: None,
            return_result: Ok(()),
        }
    }

    fn init_run_state(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let gl_window = GlutinWindowContext::new(event_loop, &self.options)?;

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s| gl_window.get_proc_address(s))
        };

        let painter = Painter::new(&gl, &self.mesh)?;

        Ok(Running {
            painter,
            gl,
            gl_window,
        })
    }

    fn paint(&mut self) {
        let Some(running) = &self.running else {
            return;
        };
        if !self.frame_loop.begin_frame() {
            return;
        }

        let plan = FramePlan::new(running.gl_window.framebuffer_size(), &self.mesh);
        running.painter.paint(&running.gl, &plan);
        self.frame_loop.end_frame(running.gl_window.swap_buffers());

        // Render continuously; vsync paces us.
        running.gl_window.window().request_redraw();
    }

    fn exit_with_error(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        log::error!("Exiting because of error: {err}");
        self.return_result = Err(err);
        self.frame_loop.request_close();
        event_loop.exit();
    }

    fn destroy(&mut self) {
        if let Some(mut running) = self.running.take() {
            log::debug!("Destroying GL resources");
            running.painter.destroy(&running.gl);
        }
    }
}

impl ApplicationHandler for SmokeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || !self.frame_loop.is_running() {
            return;
        }

        match self.init_run_state(event_loop) {
            Ok(running) => {
                running.gl_window.window().request_redraw();
                self.running = Some(running);
            }
            Err(err) => self.exit_with_error(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.request_close();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(running) = &self.running {
                    running.gl_window.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.paint(),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.destroy();
    }
}

/// Runs the smoke test until the window is closed.
///
/// # Errors
/// If the event loop, window, context or painter can't be created.
pub fn run(options: SmokeOptions) -> Result {
    let mesh = LineMesh::zigzag(options.index_format);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SmokeApp::new(options, mesh);
    log::trace!("Entering the winit event loop (run_app)…");
    event_loop.run_app(&mut app)?;

    log::debug!(
        "Window closed after {} frames ({} failed to present)",
        app.frame_loop.frames_rendered(),
        app.frame_loop.failed_presents()
    );
    app.return_result
}

/// Everything that can stop the smoke test before the window is closed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The windowing system could not be initialized.
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// No GL config matched, or the window could not be created alongside it.
    #[error("found no glutin configs matching {0:?}: {1}")]
    NoGlutinConfigs(glutin::config::ConfigTemplate, Box<dyn std::error::Error>),

    /// The display builder returned a config but no window.
    #[error("the window was not created")]
    NoWindow,

    #[error("failed to get the window handle: {0}")]
    WindowHandle(#[from] raw_window_handle::HandleError),

    /// Context or surface creation, or making the context current.
    #[error("glutin error: {0}")]
    Glutin(#[from] glutin::error::Error),

    /// Shader compilation, program linking or GL object creation.
    #[error(transparent)]
    Painter(#[from] glow_lines::PainterError),
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

//! The window and its OpenGL context, created together through `glutin-winit`.

#![expect(unsafe_code)]

use std::num::NonZeroU32;

use glutin::{
    config::{ConfigTemplateBuilder, GlConfig as _},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext as _,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay as _, GlDisplay as _},
    surface::{GlSurface as _, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use raw_window_handle::HasWindowHandle as _;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::Window,
};

use crate::{
    error::{Error, Result},
    options::SmokeOptions,
};

/// A window with a current core-profile GL context on its surface.
///
/// Fields drop in declaration order: the surface and context go before the window.
pub struct GlutinWindowContext {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    gl_config: glutin::config::Config,
    window: Window,
}

impl GlutinWindowContext {
    /// Creates the window, a core-profile context of `options.gl_version`,
    /// and makes it current.
    ///
    /// # Errors
    /// Any failure here is fatal for the smoke test: there is no fallback API or retry.
    pub fn new(event_loop: &ActiveEventLoop, options: &SmokeOptions) -> Result<Self> {
        let [width, height] = options.inner_size;
        let window_attributes = Window::default_attributes()
            .with_title(options.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let config_template_builder = ConfigTemplateBuilder::new()
            .prefer_hardware_accelerated(None)
            .with_depth_size(0)
            .with_stencil_size(0)
            .with_transparency(false);

        log::debug!("Looking for a GL config matching {config_template_builder:?}");

        // Creates the window too.
        let (window, gl_config) = glutin_winit::DisplayBuilder::new()
            .with_preference(glutin_winit::ApiPreference::FallbackEgl)
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, config_template_builder.clone(), |mut configs| {
                // glutin only calls the picker with at least one config.
                let config = configs.next().expect("config picker called with no configs");
                log::debug!("Picked GL config {config:?}");
                config
            })
            .map_err(|err| Error::NoGlutinConfigs(config_template_builder.build(), err))?;
        let window = window.ok_or(Error::NoWindow)?;

        let gl_display = gl_config.display();
        log::debug!(
            "GL display {} ready, features: {:?}",
            gl_display.version_string(),
            gl_display.supported_features()
        );

        let raw_window_handle = window.window_handle()?.as_raw();

        let (major, minor) = options.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));
        log::debug!("Requesting a core context: {context_attributes:?}");
        let not_current_gl_context =
            unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let (width_px, height_px): (u32, u32) = window.inner_size().into();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width_px).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height_px).unwrap_or(NonZeroU32::MIN),
        );
        log::trace!("Window surface: {surface_attributes:?}");
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes)? };

        let gl_context = not_current_gl_context.make_current(&gl_surface)?;

        let swap_interval = if options.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = gl_surface.set_swap_interval(&gl_context, swap_interval) {
            log::warn!("Could not set swap interval {swap_interval:?}: {err}");
        }

        Ok(Self {
            gl_surface,
            gl_context,
            gl_config,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Size of the drawable area in physical pixels.
    ///
    /// May differ from the logical window size on scaled displays.
    pub fn framebuffer_size(&self) -> [u32; 2] {
        let PhysicalSize { width, height } = self.window.inner_size();
        [width, height]
    }

    pub fn resize(&self, physical_size: PhysicalSize<u32>) {
        self.gl_surface.resize(
            &self.gl_context,
            NonZeroU32::new(physical_size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(physical_size.height).unwrap_or(NonZeroU32::MIN),
        );
    }

    /// Presents the back buffer.
    ///
    /// # Errors
    /// If the surface or context was lost.
    pub fn swap_buffers(&self) -> glutin::error::Result<()> {
        self.gl_surface.swap_buffers(&self.gl_context)
    }

    pub fn get_proc_address(&self, addr: &std::ffi::CStr) -> *const std::ffi::c_void {
        self.gl_config.display().get_proc_address(addr)
    }
}

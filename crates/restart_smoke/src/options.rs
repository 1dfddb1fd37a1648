use glow_lines::IndexFormat;

/// Options controlling the window, the GL context and the mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmokeOptions {
    /// Window title.
    pub title: String,

    /// Initial inner size of the window, in logical pixels.
    pub inner_size: [u32; 2],

    /// Present once per vertical blank (swap interval 1).
    ///
    /// Default: `true`.
    pub vsync: bool,

    /// Requested OpenGL core-profile version, `(major, minor)`.
    pub gl_version: (u8, u8),

    /// Width of the indices, and with it the restart sentinel.
    pub index_format: IndexFormat,
}

impl Default for SmokeOptions {
    fn default() -> Self {
        Self {
            title: "Hello World".to_owned(),
            inner_size: [640, 480],
            vsync: true,
            gl_version: (3, 3),
            index_format: IndexFormat::U16,
        }
    }
}

#[test]
fn test_default_options() {
    let options = SmokeOptions::default();
    assert_eq!(options.title, "Hello World");
    assert_eq!(options.inner_size, [640, 480]);
    assert!(options.vsync);
    assert_eq!(options.gl_version, (3, 3));
    assert_eq!(options.index_format.restart_index(), 0xFFFF);
}

//! Opens a 640×480 window with an OpenGL 3.3 core context and, every frame,
//! draws a line strip split by primitive-restart indices followed by a plain
//! `GL_LINES` draw. Meant for checking a driver by eye.
//!
//! Run with `RUST_LOG=debug` to see context and GL details.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![expect(clippy::undocumented_unsafe_blocks)]

mod app;
mod error;
mod frame_loop;
mod gl_window;
mod options;

use std::process::ExitCode;

use options::SmokeOptions;

/// What `exit(-1)` looks like to the parent process on Unix.
///
/// On Windows `exit(-1)` reports `0xFFFF_FFFF`, but [`ExitCode`] only carries a `u8`,
/// so fatal errors report 255 there too.
const FATAL_EXIT_CODE: u8 = 255;

fn main() -> ExitCode {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    match app::run(SmokeOptions::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

#[test]
fn fatal_exit_code_is_minus_one_truncated() {
    assert_eq!(FATAL_EXIT_CODE, (-1_i32).to_le_bytes()[0]);
}

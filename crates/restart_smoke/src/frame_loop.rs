/// Where the frame loop is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Running,

    /// The window asked to close. Final: no more frames are rendered.
    Terminated,
}

/// The render loop as a two-state machine, with frame counters.
#[derive(Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    frames_rendered: u64,
    failed_presents: u64,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn failed_presents(&self) -> u64 {
        self.failed_presents
    }

    /// The should-close signal.
    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("Terminating after {} frames", self.frames_rendered);
            self.state = LoopState::Terminated;
        }
    }

    /// Returns `true` if a frame may be rendered now, and counts it.
    pub fn begin_frame(&mut self) -> bool {
        match self.state {
            LoopState::Running => {
                self.frames_rendered += 1;
                log::trace!("Frame {}", self.frames_rendered);
                true
            }
            LoopState::Terminated => false,
        }
    }

    /// Records whether the frame reached the screen.
    ///
    /// A failed present is logged and otherwise ignored: only closing the window ends the loop.
    pub fn end_frame<E: std::fmt::Display>(&mut self, presented: Result<(), E>) {
        if let Err(err) = presented {
            self.failed_presents += 1;
            log::error!("swap_buffers failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_before_first_frame_renders_nothing() {
        let mut frame_loop = FrameLoop::default();
        frame_loop.request_close();

        assert!(!frame_loop.is_running());
        assert!(!frame_loop.begin_frame());
        assert_eq!(frame_loop.frames_rendered(), 0);
    }

    #[test]
    fn counts_frames_until_closed() {
        let mut frame_loop = FrameLoop::default();
        assert!(frame_loop.is_running());

        for _ in 0..3 {
            assert!(frame_loop.begin_frame());
        }
        frame_loop.request_close();
        frame_loop.request_close();

        assert!(!frame_loop.begin_frame());
        assert_eq!(frame_loop.frames_rendered(), 3);
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn failed_present_keeps_running() {
        let mut frame_loop = FrameLoop::default();

        assert!(frame_loop.begin_frame());
        frame_loop.end_frame(Err("surface lost"));
        assert!(frame_loop.is_running());

        assert!(frame_loop.begin_frame());
        frame_loop.end_frame(Ok::<(), &str>(()));

        assert_eq!(frame_loop.frames_rendered(), 2);
        assert_eq!(frame_loop.failed_presents(), 1);
    }
}

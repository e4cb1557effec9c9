use crate::clock::FrameClock;
use orbview_common::ColorSpace;
use std::collections::VecDeque;

/// Longest dt handed to control updates. A stalled frame resumes smoothly
/// instead of producing one giant inertia step; there is no catch-up.
const MAX_FRAME_DT: f32 = 0.1;

/// An external mutation request, applied only at the start of a tick.
///
/// Resize events and debug-panel changes arrive asynchronously relative to
/// the frame cadence; queueing them keeps the single-threaded interleaving
/// contract explicit: nothing mutates camera or scene state mid-frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    /// Window size changed: logical dimensions plus device-pixel ratio.
    Resize {
        logical_width: f64,
        logical_height: f64,
        scale_factor: f64,
    },
    /// Reinterpret the final rendered color.
    SetOutputColorSpace(ColorSpace),
    /// Reinterpret the base texture's stored color.
    SetTextureColorSpace(ColorSpace),
    /// Halt the loop after the current tick.
    Stop,
}

/// Receiver side of a tick: the application applies commands, advances
/// control state, and renders.
pub trait FrameHandler {
    fn apply(&mut self, command: ViewerCommand);
    fn update(&mut self, dt: f32);
    fn render(&mut self);
}

/// Render-loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Before `start`: scene composition and initial sizing happen here.
    Idle,
    /// Ticking once per scheduled frame.
    Running,
    /// After `stop`. Terminal.
    Stopped,
}

/// The per-frame driver.
///
/// One `tick` executes, strictly in order: drain queued commands, sample the
/// clock, update controls with the elapsed time, render. The host schedules
/// the next tick (winit redraw request); cadence is entirely the host's.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    clock: FrameClock,
    queue: VecDeque<ViewerCommand>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            clock: FrameClock::start(),
            queue: VecDeque::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Queue an external mutation for the next tick. Commands queue in any
    /// state so a resize arriving before `start` is not lost.
    pub fn push(&mut self, command: ViewerCommand) {
        self.queue.push_back(command);
    }

    /// Idle -> Running. Resets the clock so the first tick's dt measures
    /// from here, not from construction.
    pub fn start(&mut self) {
        if self.state != LoopState::Idle {
            return;
        }
        self.clock.reset();
        self.state = LoopState::Running;
        tracing::debug!("frame loop running");
    }

    /// Running -> Stopped. Idempotent.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Stopped;
            tracing::debug!("frame loop stopped");
        }
    }

    /// Execute one frame. Returns false (and does nothing) unless Running.
    pub fn tick<H: FrameHandler>(&mut self, handler: &mut H) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        while let Some(command) = self.queue.pop_front() {
            if command == ViewerCommand::Stop {
                self.stop();
                return false;
            }
            handler.apply(command);
        }

        let dt = self.clock.elapsed().min(MAX_FRAME_DT);
        handler.update(dt);
        handler.render();
        true
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the order of handler calls for assertions.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl FrameHandler for Recorder {
        fn apply(&mut self, command: ViewerCommand) {
            self.events.push(format!("apply:{command:?}"));
        }

        fn update(&mut self, dt: f32) {
            assert!(dt >= 0.0);
            self.events.push("update".into());
        }

        fn render(&mut self) {
            self.events.push("render".into());
        }
    }

    #[test]
    fn tick_is_noop_while_idle() {
        let mut frame_loop = FrameLoop::new();
        let mut handler = Recorder::default();
        assert!(!frame_loop.tick(&mut handler));
        assert!(handler.events.is_empty());
        assert_eq!(frame_loop.state(), LoopState::Idle);
    }

    #[test]
    fn commands_drain_before_update_and_render() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.push(ViewerCommand::Resize {
            logical_width: 1024.0,
            logical_height: 768.0,
            scale_factor: 1.0,
        });
        frame_loop.push(ViewerCommand::SetOutputColorSpace(
            orbview_common::ColorSpace::Linear,
        ));
        frame_loop.start();

        let mut handler = Recorder::default();
        assert!(frame_loop.tick(&mut handler));

        assert_eq!(handler.events.len(), 4);
        assert!(handler.events[0].starts_with("apply:Resize"));
        assert!(handler.events[1].starts_with("apply:SetOutputColorSpace"));
        assert_eq!(handler.events[2], "update");
        assert_eq!(handler.events[3], "render");
    }

    #[test]
    fn commands_queued_mid_run_apply_on_next_tick() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();

        let mut handler = Recorder::default();
        frame_loop.tick(&mut handler);
        assert_eq!(handler.events, vec!["update", "render"]);

        frame_loop.push(ViewerCommand::SetTextureColorSpace(
            orbview_common::ColorSpace::NoColor,
        ));
        frame_loop.tick(&mut handler);
        assert!(handler.events[2].starts_with("apply:SetTextureColorSpace"));
    }

    #[test]
    fn stop_command_halts_without_rendering() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        frame_loop.push(ViewerCommand::Stop);

        let mut handler = Recorder::default();
        assert!(!frame_loop.tick(&mut handler));
        assert!(handler.events.is_empty());
        assert_eq!(frame_loop.state(), LoopState::Stopped);

        // Terminal: restart is not possible.
        frame_loop.start();
        assert!(!frame_loop.tick(&mut handler));
    }

    #[test]
    fn explicit_stop_transition() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        assert_eq!(frame_loop.state(), LoopState::Running);
        frame_loop.stop();
        assert_eq!(frame_loop.state(), LoopState::Stopped);

        let mut handler = Recorder::default();
        assert!(!frame_loop.tick(&mut handler));
    }
}

//! Frame lifecycle core: the clock, viewport sizer, and render-loop state
//! machine that drive the viewer.
//!
//! # Invariants
//! - All external mutation (resize, panel changes) flows through the command
//!   queue and is applied at the start of a tick, never mid-frame.
//! - Within a tick: commands drain, then controls update, then one render.
//! - The viewport never hands a degenerate size or non-finite aspect ratio
//!   downstream.

pub mod clock;
pub mod frame;
pub mod viewport;

pub use clock::FrameClock;
pub use frame::{FrameHandler, FrameLoop, LoopState, ViewerCommand};
pub use viewport::Viewport;

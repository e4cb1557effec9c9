//! Shared leaf types used by every layer of the viewer.
//!
//! # Invariants
//! - Types here carry no behavior beyond construction and display.
//! - Nothing in this crate depends on the GPU or windowing stack.

pub mod types;

pub use types::{AssetPolicy, ColorSpace, SurfaceSize};

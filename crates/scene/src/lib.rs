//! Scene composition for the viewer.
//!
//! Building a scene is two-phase: [`compose`] produces an immutable
//! [`SceneDescription`] with no I/O, then [`Scene::load`] resolves assets
//! against an [`orbview_common::AssetPolicy`]. The split keeps composition
//! unit-testable without touching the filesystem or starting a loop.
//!
//! # Invariants
//! - The scene graph is built once and never rebuilt; only color-space tags
//!   mutate afterwards.
//! - Asset failure under the default policy leaves the slot empty rather
//!   than aborting.

pub mod camera;
pub mod compose;
pub mod scene;

pub use camera::OrbitCamera;
pub use compose::{DirectionalLight, Material, SceneDescription, SphereParams, compose};
pub use scene::{Scene, SceneError};

//! wgpu render backend for the viewer.
//!
//! Renders a lit, textured sphere under an environment cube map, with the
//! sky box drawn from the same cube map. Color-space conversion is done in
//! the fragment shader under uniform control so the debug panel can toggle
//! it per frame.
//!
//! # Invariants
//! - The renderer never mutates scene or camera state.
//! - The surface format is non-sRGB; gamma encoding happens in the shader.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::ViewerRenderer;
pub use mesh::{SphereVertex, sphere_mesh};

use glam::Vec3;
use orbview_common::ColorSpace;
use std::path::{Path, PathBuf};

/// A single directional light.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    /// Normalized direction from the lit surface toward the light.
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).normalize()
    }
}

/// Surface material for the sphere.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub base_color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
}

/// Sphere tessellation parameters.
#[derive(Debug, Clone, Copy)]
pub struct SphereParams {
    pub radius: f32,
    pub sectors: u32,
    pub stacks: u32,
}

/// Immutable description of the scene: everything needed to instantiate it,
/// with no I/O performed yet. Asset slots are paths, not pixels.
#[derive(Debug, Clone)]
pub struct SceneDescription {
    pub background: Vec3,
    pub light: DirectionalLight,
    pub sphere: SphereParams,
    pub material: Material,
    pub texture_path: PathBuf,
    pub texture_color_space: ColorSpace,
    pub environment_dir: PathBuf,
    pub environment_extension: String,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
}

/// Compose the viewer's scene relative to an assets root. Pure; the
/// returned description is instantiated by [`crate::Scene::load`].
pub fn compose(assets_root: &Path) -> SceneDescription {
    SceneDescription {
        background: Vec3::ZERO,
        light: DirectionalLight {
            color: Vec3::ONE,
            intensity: std::f32::consts::PI,
            position: Vec3::new(5.0, 20.0, 5.0),
            target: Vec3::ZERO,
        },
        sphere: SphereParams {
            radius: 1.0,
            sectors: 32,
            stacks: 32,
        },
        material: Material {
            base_color: Vec3::ONE,
            roughness: 0.0,
            metalness: 0.0,
        },
        texture_path: assets_root.join("textures/mid-grey.png"),
        texture_color_space: ColorSpace::Srgb,
        environment_dir: assets_root.join("skybox/cubemaps/rosendal_park_sunset"),
        environment_extension: "png".into(),
        camera_eye: Vec3::new(2.0, 1.0, 2.0),
        camera_target: Vec3::ZERO,
        camera_fov: 70.0_f32.to_radians(),
        camera_near: 0.1,
        camera_far: 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_is_pure_and_rooted() {
        let desc = compose(Path::new("/assets"));
        assert!(desc.texture_path.starts_with("/assets"));
        assert!(desc.environment_dir.starts_with("/assets"));
        assert_eq!(desc.texture_color_space, ColorSpace::Srgb);
        assert_eq!(desc.sphere.sectors, 32);
        assert!((desc.camera_fov - 70.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn light_direction_is_normalized() {
        let desc = compose(Path::new("."));
        let dir = desc.light.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.y > 0.0);
    }
}

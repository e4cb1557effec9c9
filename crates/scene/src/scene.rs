use crate::camera::OrbitCamera;
use crate::compose::SceneDescription;
use orbview_assets::{AssetError, CubeMapData, TextureData};
use orbview_common::{AssetPolicy, ColorSpace};

/// Errors from scene instantiation. Only produced under
/// [`AssetPolicy::Strict`]; the default policy degrades instead.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to load {slot}: {source}")]
    AssetLoad {
        slot: &'static str,
        #[source]
        source: AssetError,
    },
}

/// The instantiated scene: resolved assets plus the mutable color-space
/// state the debug panel drives.
///
/// Built once at startup and never rebuilt. After that, the only mutations
/// are the two color-space setters.
#[derive(Debug)]
pub struct Scene {
    pub description: SceneDescription,
    pub base_texture: Option<TextureData>,
    pub environment: Option<CubeMapData>,
    pub texture_color_space: ColorSpace,
    pub output_color_space: ColorSpace,
}

impl Scene {
    /// Resolve the description's asset slots and build the runtime scene.
    ///
    /// Under `Degrade`, a failed load logs a warning and leaves the slot
    /// `None`: a missing cube map falls back to the flat background color, a
    /// missing texture leaves the sphere untextured. Under `Strict` the
    /// first failure is returned.
    pub fn load(description: SceneDescription, policy: AssetPolicy) -> Result<Self, SceneError> {
        let base_texture = resolve(
            "base texture",
            policy,
            orbview_assets::load_texture(&description.texture_path),
        )?;
        let environment = resolve(
            "environment cube map",
            policy,
            orbview_assets::load_cube_map(
                &description.environment_dir,
                &description.environment_extension,
            ),
        )?;

        // The panel's default for the texture tag is whatever the loader
        // inferred; the description's tag wins when a texture is present.
        let texture_color_space = base_texture
            .as_ref()
            .map(|_| description.texture_color_space)
            .unwrap_or(ColorSpace::Srgb);

        Ok(Self {
            description,
            base_texture,
            environment,
            texture_color_space,
            output_color_space: ColorSpace::Srgb,
        })
    }

    /// Build the camera the description specifies.
    pub fn camera(&self) -> OrbitCamera {
        let mut camera =
            OrbitCamera::from_eye(self.description.camera_eye, self.description.camera_target);
        camera.fov = self.description.camera_fov;
        camera.near = self.description.camera_near;
        camera.far = self.description.camera_far;
        camera
    }

    pub fn set_output_color_space(&mut self, color_space: ColorSpace) {
        self.output_color_space = color_space;
    }

    pub fn set_texture_color_space(&mut self, color_space: ColorSpace) {
        self.texture_color_space = color_space;
    }
}

fn resolve<T>(
    slot: &'static str,
    policy: AssetPolicy,
    result: Result<T, AssetError>,
) -> Result<Option<T>, SceneError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(source) => match policy {
            AssetPolicy::Degrade => {
                tracing::warn!("failed to load {slot}: {source}");
                Ok(None)
            }
            AssetPolicy::Strict => Err(SceneError::AssetLoad { slot, source }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use std::path::Path;

    #[test]
    fn missing_assets_degrade_by_default() {
        let desc = compose(Path::new("/nonexistent"));
        let scene = Scene::load(desc, AssetPolicy::Degrade).unwrap();
        assert!(scene.base_texture.is_none());
        assert!(scene.environment.is_none());
        // Defaults survive degradation.
        assert_eq!(scene.output_color_space, ColorSpace::Srgb);
        assert_eq!(scene.texture_color_space, ColorSpace::Srgb);
    }

    #[test]
    fn missing_assets_fail_under_strict() {
        let desc = compose(Path::new("/nonexistent"));
        let err = Scene::load(desc, AssetPolicy::Strict).unwrap_err();
        assert!(matches!(err, SceneError::AssetLoad { .. }));
    }

    #[test]
    fn camera_matches_description() {
        let desc = compose(Path::new("/nonexistent"));
        let scene = Scene::load(desc, AssetPolicy::Degrade).unwrap();
        let camera = scene.camera();
        assert!((camera.fov - 70.0_f32.to_radians()).abs() < 1e-6);
        assert!((camera.near - 0.1).abs() < 1e-6);
        let eye = camera.position();
        assert!((eye - glam::Vec3::new(2.0, 1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn color_space_setters_touch_nothing_else() {
        let desc = compose(Path::new("/nonexistent"));
        let mut scene = Scene::load(desc, AssetPolicy::Degrade).unwrap();
        scene.set_output_color_space(ColorSpace::Linear);
        assert_eq!(scene.output_color_space, ColorSpace::Linear);
        assert_eq!(scene.texture_color_space, ColorSpace::Srgb);

        scene.set_texture_color_space(ColorSpace::NoColor);
        assert_eq!(scene.texture_color_space, ColorSpace::NoColor);
        assert_eq!(scene.output_color_space, ColorSpace::Linear);
    }
}

//! Texture and cube-map loading.
//!
//! Assets are identified by filesystem path; decoded pixel data is handed to
//! the renderer as tightly-packed RGBA8. Cube maps follow the fixed
//! six-face naming convention `px nx py ny pz nz` plus a shared extension.
//!
//! # Invariants
//! - All six cube faces must be square and identically sized.
//! - Loaders never touch the GPU; upload is the renderer's job.

use orbview_common::ColorSpace;
use std::path::Path;

/// Face basenames in the order the GPU expects cube-map layers:
/// +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACE_NAMES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("cube face {face} is {width}x{height}, expected square faces of matching size")]
    FaceMismatch {
        face: &'static str,
        width: u32,
        height: u32,
    },
}

/// A decoded 2-D texture, tightly packed RGBA8.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    /// Color space the loader infers for 8-bit image files.
    pub color_space: ColorSpace,
}

/// A decoded cube map: six square RGBA8 faces of identical size, ordered
/// per [`CUBE_FACE_NAMES`].
#[derive(Debug, Clone)]
pub struct CubeMapData {
    pub size: u32,
    pub faces: [Vec<u8>; 6],
}

/// Load and decode a 2-D texture.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData, AssetError> {
    let path = path.as_ref();
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    tracing::debug!(path = %path.display(), width, height, "loaded texture");
    Ok(TextureData {
        width,
        height,
        pixels: img.into_raw(),
        // 8-bit color images are conventionally gamma-encoded.
        color_space: ColorSpace::Srgb,
    })
}

/// Load the six faces of a cube map from `dir`, named by the fixed
/// convention with the given extension (for example `"png"`).
pub fn load_cube_map(dir: impl AsRef<Path>, extension: &str) -> Result<CubeMapData, AssetError> {
    let dir = dir.as_ref();
    let mut faces: [Vec<u8>; 6] = Default::default();
    let mut size = 0u32;

    for (i, name) in CUBE_FACE_NAMES.into_iter().enumerate() {
        let path = dir.join(format!("{name}.{extension}"));
        let img = image::open(&path)?.to_rgba8();
        let (width, height) = img.dimensions();
        if width != height || (size != 0 && width != size) {
            return Err(AssetError::FaceMismatch {
                face: name,
                width,
                height,
            });
        }
        size = width;
        faces[i] = img.into_raw();
    }

    tracing::debug!(dir = %dir.display(), size, "loaded cube map");
    Ok(CubeMapData { size, faces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        img.save(path).unwrap();
    }

    #[test]
    fn load_texture_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mid-grey.png");
        write_png(&path, 4, 2, [128, 128, 128, 255]);

        let tex = load_texture(&path).unwrap();
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.pixels.len(), 4 * 2 * 4);
        assert_eq!(&tex.pixels[..4], &[128, 128, 128, 255]);
        assert_eq!(tex.color_space, ColorSpace::Srgb);
    }

    #[test]
    fn load_texture_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_texture(dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_) | AssetError::Decode(_)));
    }

    #[test]
    fn load_cube_map_all_faces() {
        let dir = tempfile::tempdir().unwrap();
        for name in CUBE_FACE_NAMES {
            write_png(&dir.path().join(format!("{name}.png")), 8, 8, [0, 0, 255, 255]);
        }

        let cube = load_cube_map(dir.path(), "png").unwrap();
        assert_eq!(cube.size, 8);
        for face in &cube.faces {
            assert_eq!(face.len(), 8 * 8 * 4);
        }
    }

    #[test]
    fn load_cube_map_missing_face_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Write five of six faces.
        for name in &CUBE_FACE_NAMES[..5] {
            write_png(&dir.path().join(format!("{name}.png")), 8, 8, [0, 0, 0, 255]);
        }
        assert!(load_cube_map(dir.path(), "png").is_err());
    }

    #[test]
    fn load_cube_map_rejects_mismatched_faces() {
        let dir = tempfile::tempdir().unwrap();
        for name in &CUBE_FACE_NAMES[..5] {
            write_png(&dir.path().join(format!("{name}.png")), 8, 8, [0, 0, 0, 255]);
        }
        write_png(&dir.path().join("nz.png"), 16, 16, [0, 0, 0, 255]);

        let err = load_cube_map(dir.path(), "png").unwrap_err();
        assert!(matches!(err, AssetError::FaceMismatch { face: "nz", .. }));
    }
}

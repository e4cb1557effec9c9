use serde::{Deserialize, Serialize};

/// How stored color values are interpreted before use in shading.
///
/// `NoColor` leaves texel values untouched, `Linear` treats them as already
/// linear, `Srgb` gamma-decodes them on sample. The renderer's output side
/// only distinguishes `Linear` from `Srgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSpace {
    NoColor,
    Linear,
    Srgb,
}

impl ColorSpace {
    /// Human-readable label used by the debug panel.
    pub fn label(self) -> &'static str {
        match self {
            ColorSpace::NoColor => "No color",
            ColorSpace::Linear => "Linear SRGB",
            ColorSpace::Srgb => "SRGB",
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do when a texture or cube-map fails to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetPolicy {
    /// Leave the visual slot empty and keep running.
    #[default]
    Degrade,
    /// Treat any load failure as a startup error.
    Strict,
}

/// Physical render-target size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_space_labels() {
        assert_eq!(ColorSpace::Srgb.label(), "SRGB");
        assert_eq!(ColorSpace::Linear.to_string(), "Linear SRGB");
        assert_eq!(ColorSpace::NoColor.label(), "No color");
    }

    #[test]
    fn asset_policy_defaults_to_degrade() {
        assert_eq!(AssetPolicy::default(), AssetPolicy::Degrade);
    }

    #[test]
    fn surface_size_equality() {
        assert_eq!(SurfaceSize::new(800, 600), SurfaceSize::new(800, 600));
        assert_ne!(SurfaceSize::new(800, 600), SurfaceSize::new(600, 800));
    }
}

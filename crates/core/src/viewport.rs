use orbview_common::SurfaceSize;

/// Tracks the window's logical size and device-pixel ratio, and derives the
/// physical render-target size and camera aspect ratio from them.
///
/// The physical size is always `logical * scale_factor`, recomputed in one
/// step on every accepted resize, so the renderer and camera never observe
/// a half-applied update. A resize with a zero dimension is rejected and
/// leaves the previous state intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    logical_width: f64,
    logical_height: f64,
    scale_factor: f64,
}

impl Viewport {
    pub fn new(logical_width: f64, logical_height: f64, scale_factor: f64) -> Self {
        debug_assert!(logical_width > 0.0 && logical_height > 0.0);
        Self {
            logical_width,
            logical_height,
            scale_factor: scale_factor.max(f64::MIN_POSITIVE),
        }
    }

    /// Apply a window resize. Returns the new physical target size, or
    /// `None` when either dimension is degenerate (the update is skipped).
    pub fn resize(
        &mut self,
        logical_width: f64,
        logical_height: f64,
        scale_factor: f64,
    ) -> Option<SurfaceSize> {
        if logical_width <= 0.0 || logical_height <= 0.0 || scale_factor <= 0.0 {
            tracing::debug!(
                logical_width,
                logical_height,
                scale_factor,
                "skipping degenerate resize"
            );
            return None;
        }
        self.logical_width = logical_width;
        self.logical_height = logical_height;
        self.scale_factor = scale_factor;
        Some(self.physical_size())
    }

    /// Render-target size in device pixels: logical size scaled by the
    /// device-pixel ratio.
    pub fn physical_size(&self) -> SurfaceSize {
        let w = (self.logical_width * self.scale_factor).round() as u32;
        let h = (self.logical_height * self.scale_factor).round() as u32;
        SurfaceSize::new(w.max(1), h.max(1))
    }

    /// Aspect ratio of the logical viewport. Always finite and positive.
    pub fn aspect_ratio(&self) -> f32 {
        (self.logical_width / self.logical_height) as f32
    }

    pub fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_is_logical_times_scale() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        assert_eq!(vp.physical_size(), SurfaceSize::new(800, 600));
        assert!((vp.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);

        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.physical_size(), SurfaceSize::new(1600, 1200));
        // Scale factor does not change the aspect ratio.
        assert!((vp.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn resize_mid_session() {
        let mut vp = Viewport::new(800.0, 600.0, 1.0);
        let size = vp.resize(1024.0, 768.0, 1.0).unwrap();
        assert_eq!(size, SurfaceSize::new(1024, 768));
        assert!((vp.aspect_ratio() - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut vp = Viewport::new(800.0, 600.0, 1.0);
        let first = vp.resize(1024.0, 768.0, 1.5).unwrap();
        let state = vp.clone();
        let second = vp.resize(1024.0, 768.0, 1.5).unwrap();
        assert_eq!(first, second);
        assert_eq!(vp, state);
    }

    #[test]
    fn degenerate_resize_is_skipped() {
        let mut vp = Viewport::new(800.0, 600.0, 1.0);
        assert!(vp.resize(1024.0, 0.0, 1.0).is_none());
        assert!(vp.resize(0.0, 768.0, 1.0).is_none());
        // Previous state intact, aspect still finite.
        assert_eq!(vp.physical_size(), SurfaceSize::new(800, 600));
        assert!(vp.aspect_ratio().is_finite());
        assert!((vp.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn fractional_scale_rounds_to_device_pixels() {
        let vp = Viewport::new(1000.0, 500.0, 1.25);
        assert_eq!(vp.physical_size(), SurfaceSize::new(1250, 625));
    }
}

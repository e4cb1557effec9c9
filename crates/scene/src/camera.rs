use glam::{Mat4, Vec3};

/// Orbit camera: the eye rides a sphere around a fixed target point.
///
/// Pointer drag feeds [`OrbitCamera::rotate`], which accumulates angular
/// velocity; [`OrbitCamera::update`] integrates it with exponential damping
/// so a released drag coasts to a stop.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
    /// Damping rate per second; higher stops faster.
    pub damping: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 100.0;
const PITCH_LIMIT: f32 = 1.553; // just short of 89 degrees

impl Default for OrbitCamera {
    fn default() -> Self {
        // Matches the composed scene: eye (2, 1, 2) looking at the origin.
        Self::from_eye(Vec3::new(2.0, 1.0, 2.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Place the camera at `eye` orbiting `target`.
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let yaw = offset.z.atan2(offset.x);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        Self {
            target,
            distance,
            yaw,
            pitch,
            fov: 70.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.005,
            damping: 8.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    /// Eye position derived from the orbit parameters.
    pub fn position(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        );
        self.target + dir * self.distance
    }

    /// Feed a pointer-drag delta, in pixels, as an angular impulse.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity += dx * self.sensitivity;
        self.pitch_velocity += dy * self.sensitivity;
    }

    /// Move the eye toward or away from the target.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Advance the orbit by `dt` seconds: integrate the pending angular
    /// velocity and let it decay.
    pub fn update(&mut self, dt: f32) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let decay = (-self.damping * dt).exp();
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
    }

    /// Update the projection aspect ratio. Non-finite or non-positive
    /// values are ignored; the viewport sizer should never produce them,
    /// this is the backstop.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_recovers_the_composed_eye() {
        let cam = OrbitCamera::default();
        let eye = cam.position();
        assert!((eye - Vec3::new(2.0, 1.0, 2.0)).length() < 1e-5);
        assert!((cam.distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn view_projection_is_finite() {
        let cam = OrbitCamera::default();
        let vp = cam.view_projection();
        for col in 0..4 {
            assert!(vp.col(col).is_finite());
        }
    }

    #[test]
    fn drag_then_coast() {
        let mut cam = OrbitCamera::default();
        let start_yaw = cam.yaw;
        cam.rotate(100.0, 0.0);
        cam.update(1.0 / 60.0);
        assert!(cam.yaw != start_yaw);

        // With no further input the velocity decays toward zero.
        let yaw_after_first = cam.yaw;
        for _ in 0..300 {
            cam.update(1.0 / 60.0);
        }
        let residual = cam.yaw - yaw_after_first;
        cam.update(1.0 / 60.0);
        assert!((cam.yaw - yaw_after_first - residual).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped_away_from_the_poles() {
        let mut cam = OrbitCamera::default();
        for _ in 0..100 {
            cam.rotate(0.0, 1000.0);
            cam.update(1.0 / 60.0);
        }
        assert!(cam.pitch <= PITCH_LIMIT);
        assert!(cam.view_matrix().col(0).is_finite());
    }

    #[test]
    fn set_aspect_rejects_degenerate_values() {
        let mut cam = OrbitCamera::default();
        let before = cam.aspect;
        cam.set_aspect(f32::NAN);
        cam.set_aspect(f32::INFINITY);
        cam.set_aspect(0.0);
        cam.set_aspect(-1.0);
        assert_eq!(cam.aspect, before);

        cam.set_aspect(800.0 / 600.0);
        assert!((cam.aspect - 1.333_333_3).abs() < 1e-6);
    }

    #[test]
    fn zoom_stays_within_bounds() {
        let mut cam = OrbitCamera::default();
        for _ in 0..1000 {
            cam.zoom(5.0);
        }
        assert!(cam.distance >= MIN_DISTANCE);
        for _ in 0..1000 {
            cam.zoom(-5.0);
        }
        assert!(cam.distance <= MAX_DISTANCE);
    }
}

//! First-person camera orientation.

use glam::Vec3;

/// Pitch is clamped just short of vertical to keep the view ray away from
/// the poles.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.001;

/// First-person camera: a position plus yaw/pitch angles in radians.
///
/// Yaw 0 looks along +X and increases toward +Z; pitch 0 is level and
/// positive pitch looks up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Camera {
    /// Create a camera at `position`, looking along -Z.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
        }
    }

    /// Set the view angles, clamping pitch short of straight up/down.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_orientation_looks_along_negative_z() {
        let camera = Camera::new(Vec3::ZERO);
        let forward = camera.forward();
        assert_relative_eq!(forward.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(forward.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(forward.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_orientation(0.0, -10.0);
        let forward = camera.forward();

        // Nearly straight down, but never degenerate.
        assert!(forward.y < -0.999);
        assert!(forward.x.hypot(forward.z) > 0.0);
    }

    #[test]
    fn forward_is_unit_length() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_orientation(1.3, 0.7);
        assert_relative_eq!(camera.forward().length(), 1.0, epsilon = 1e-6);
    }
}

//! Orbit camera for 3D visualization

use nalgebra::{Matrix4, Perspective3, Vector3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use vtpview_core::Point3f;

/// A camera orbiting a target point.
///
/// The eye position is derived from yaw/pitch/distance around the target;
/// `reset` restores the framing computed at construction time.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Point3f,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    min_distance: f32,
    home: (Point3f, f32, f32, f32),
}

impl OrbitCamera {
    /// Create a camera orbiting `target` at the given distance
    pub fn new(target: Point3f, distance: f32) -> Self {
        let distance = distance.max(1e-4);
        Self {
            target,
            distance,
            yaw: FRAC_PI_4,
            pitch: 0.3,
            fov: FRAC_PI_4,
            aspect_ratio: 1.0,
            near: distance * 1e-3,
            far: distance * 1e3,
            min_distance: distance * 1e-3,
            home: (target, distance, FRAC_PI_4, 0.3),
        }
    }

    /// Create a camera framing the given axis-aligned bounds.
    ///
    /// Falls back to a unit framing for empty bounds, so an empty dataset
    /// still opens a usable window.
    pub fn framing(bounds: Option<(Point3f, Point3f)>) -> Self {
        match bounds {
            Some((min, max)) => {
                let center = Point3f::new(
                    (min.x + max.x) * 0.5,
                    (min.y + max.y) * 0.5,
                    (min.z + max.z) * 0.5,
                );
                let radius = ((max - min).norm() * 0.5).max(1e-4);
                // Back off far enough that the bounding sphere fits the view
                let distance = radius / (FRAC_PI_4 * 0.5).tan() * 1.2;
                Self::new(center, distance)
            }
            None => Self::new(Point3f::origin(), 5.0),
        }
    }

    /// Eye position derived from the orbit parameters
    pub fn eye(&self) -> Point3f {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vector3::new(x, y, z)
    }

    /// Rotate around the target, clamping pitch short of the poles
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
    }

    /// Move the target in the view plane; deltas are in pixels
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward).normalize();

        let speed = self.distance * 0.002;
        self.target += right * (-delta_x * speed);
        self.target += up * (delta_y * speed);
    }

    /// Zoom toward or away from the target
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).max(self.min_distance);
    }

    /// Restore the framing computed at construction
    pub fn reset(&mut self) {
        let (target, distance, yaw, pitch) = self.home;
        self.target = target;
        self.distance = distance;
        self.yaw = yaw;
        self.pitch = pitch;
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye(), &self.target, &Vector3::y())
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far).into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eye_sits_at_distance() {
        let camera = OrbitCamera::new(Point3f::new(1.0, 2.0, 3.0), 10.0);
        let eye = camera.eye();
        assert_relative_eq!((eye - camera.target).norm(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut camera = OrbitCamera::new(Point3f::origin(), 7.0);
        camera.orbit(1.3, -0.4);
        assert_relative_eq!((camera.eye() - camera.target).norm(), 7.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_clamps_short_of_poles() {
        let mut camera = OrbitCamera::new(Point3f::origin(), 5.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch < FRAC_PI_2);
        camera.orbit(0.0, -20.0);
        assert!(camera.pitch > -FRAC_PI_2);
    }

    #[test]
    fn test_zoom_stays_positive() {
        let mut camera = OrbitCamera::new(Point3f::origin(), 5.0);
        for _ in 0..1000 {
            camera.zoom(5.0);
        }
        assert!(camera.distance >= camera.min_distance);
        assert!(camera.distance > 0.0);
    }

    #[test]
    fn test_pan_moves_target_not_distance() {
        let mut camera = OrbitCamera::new(Point3f::origin(), 5.0);
        camera.pan(30.0, -12.0);
        assert!(camera.target != Point3f::origin());
        assert_relative_eq!((camera.eye() - camera.target).norm(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut camera = OrbitCamera::new(Point3f::origin(), 5.0);
        let home_eye = camera.eye();
        camera.orbit(0.7, 0.2);
        camera.pan(50.0, 50.0);
        camera.zoom(3.0);
        camera.reset();
        assert_relative_eq!((camera.eye() - home_eye).norm(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_framing_centers_on_bounds() {
        let bounds = Some((Point3f::new(0.0, 0.0, 0.0), Point3f::new(2.0, 4.0, 6.0)));
        let camera = OrbitCamera::framing(bounds);
        assert_relative_eq!(camera.target.x, 1.0);
        assert_relative_eq!(camera.target.y, 2.0);
        assert_relative_eq!(camera.target.z, 3.0);
        assert!(camera.distance > 0.0);
    }

    #[test]
    fn test_framing_empty_bounds() {
        let camera = OrbitCamera::framing(None);
        assert_eq!(camera.target, Point3f::origin());
        assert_eq!(camera.distance, 5.0);
    }
}

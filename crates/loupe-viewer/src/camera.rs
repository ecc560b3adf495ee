//! Active camera: a position/target pair plus change notifications

use glam::Mat4;
use loupe_core::Vec3;

/// Camera with a look-at target.
///
/// Fields are mutated freely by whoever drives the camera (the scroll
/// tweens write `position` and `target` directly); the renderer only
/// reacts once it is *notified* through [`Camera::position_updated`] or
/// [`Camera::target_updated`].
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position
    pub position: Vec3,
    /// Target point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,

    changed: bool,
    position_notifications: u64,
    target_notifications: u64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            changed: false,
            position_notifications: 0,
            target_notifications: 0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify that `position` was changed externally.
    ///
    /// With `notify`, the change is flagged for the next rendered frame.
    pub fn position_updated(&mut self, notify: bool) {
        self.position_notifications += 1;
        if notify {
            self.changed = true;
        }
    }

    /// Notify that `target` was changed externally.
    pub fn target_updated(&mut self, notify: bool) {
        self.target_notifications += 1;
        if notify {
            self.changed = true;
        }
    }

    /// Whether a notified change is waiting for the renderer
    pub fn has_pending_change(&self) -> bool {
        self.changed
    }

    /// Consume the pending-change flag
    pub fn take_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Total `position_updated` calls
    pub fn position_notifications(&self) -> u64 {
        self.position_notifications
    }

    /// Total `target_updated` calls
    pub fn target_notifications(&self) -> u64 {
        self.target_notifications
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f32 {
        self.position.distance(&self.target)
    }

    /// Unit vector from position toward target
    pub fn forward_vector(&self) -> Vec3 {
        let f: glam::Vec3 = (self.target - self.position).into();
        f.normalize_or_zero().into()
    }

    /// Right-handed view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position.into(), self.target.into(), self.up.into())
    }

    /// Perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_are_counted_and_flagged() {
        let mut cam = Camera::new();
        assert!(!cam.has_pending_change());

        cam.position_updated(true);
        cam.target_updated(true);
        assert_eq!(cam.position_notifications(), 1);
        assert_eq!(cam.target_notifications(), 1);
        assert!(cam.take_change());
        assert!(!cam.take_change());
    }

    #[test]
    fn silent_notification_does_not_flag() {
        let mut cam = Camera::new();
        cam.position_updated(false);
        assert_eq!(cam.position_notifications(), 1);
        assert!(!cam.has_pending_change());
    }

    #[test]
    fn forward_points_at_target() {
        let mut cam = Camera::new();
        cam.position = Vec3::new(0.0, 0.0, 5.0);
        cam.target = Vec3::ZERO;
        assert!(cam.forward_vector().approx_eq(&Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert!((cam.distance() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn view_matrix_moves_target_onto_negative_z() {
        let mut cam = Camera::new();
        cam.position = Vec3::new(2.02, 0.75, -6.70);
        cam.target = Vec3::new(-1.29, 0.25, -0.27);
        let target_view = cam.view_matrix().transform_point3(cam.target.into());
        assert!(target_view.x.abs() < 1e-4);
        assert!(target_view.y.abs() < 1e-4);
        assert!((target_view.z + cam.distance()).abs() < 1e-4);
    }
}

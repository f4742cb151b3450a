use glam::Mat4;

pub const DEFAULT_FOV: f32 = 75.0;
pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 4.0;

/// Perspective projection parameters; the view comes from the owning node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            zoom: 1.0,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached projection; call after changing any field
    pub fn update_projection_matrix(&mut self) {
        let half = (self.fov.to_radians() * 0.5).tan() / self.zoom.max(f32::EPSILON);
        let fov_y = 2.0 * half.atan();
        let aspect = if self.aspect.is_finite() && self.aspect > 0.0 { self.aspect } else { 1.0 };
        self.projection = Mat4::perspective_rh_gl(fov_y, aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.update_projection_matrix();
    }

    /// Effective vertical field of view in degrees after zoom
    pub fn effective_fov(&self) -> f32 {
        2.0 * ((self.fov.to_radians() * 0.5).tan() / self.zoom).atan().to_degrees()
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV, 1.0, 0.1, 100.0)
    }
}

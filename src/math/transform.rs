//! Node transforms: position, Euler rotation with explicit axis order, and scale.
//!
//! Rotation order follows the usual scene-graph convention: for order `ABC`
//! the rotation matrix is `R_A * R_B * R_C`, so `C` is applied first in
//! object space.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Axis order for Euler rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EulerOrder {
    #[default]
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

impl EulerOrder {
    pub const ALL: [EulerOrder; 6] = [
        EulerOrder::XYZ,
        EulerOrder::XZY,
        EulerOrder::YXZ,
        EulerOrder::YZX,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
    ];

    /// Axis indices in multiplication order (0 = X, 1 = Y, 2 = Z)
    const fn axes(self) -> [usize; 3] {
        match self {
            EulerOrder::XYZ => [0, 1, 2],
            EulerOrder::XZY => [0, 2, 1],
            EulerOrder::YXZ => [1, 0, 2],
            EulerOrder::YZX => [1, 2, 0],
            EulerOrder::ZXY => [2, 0, 1],
            EulerOrder::ZYX => [2, 1, 0],
        }
    }
}

/// Euler angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub order: EulerOrder,
}

impl Euler {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, order: EulerOrder::XYZ }
    }

    pub const fn with_order(x: f32, y: f32, z: f32, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Change the order label without touching the angles
    pub fn set_order(&mut self, order: EulerOrder) -> &mut Self {
        self.order = order;
        self
    }

    /// Change the order while keeping the same orientation
    pub fn reorder(&mut self, order: EulerOrder) -> &mut Self {
        let matrix = Mat3::from_quat(self.to_quat());
        *self = Self::from_rotation_matrix(&matrix, order);
        self
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_quat(self) -> Quat {
        let angles = [self.x, self.y, self.z];
        let axis_quat = |axis: usize| match axis {
            0 => Quat::from_rotation_x(angles[0]),
            1 => Quat::from_rotation_y(angles[1]),
            _ => Quat::from_rotation_z(angles[2]),
        };
        let [a, b, c] = self.order.axes();
        axis_quat(a) * axis_quat(b) * axis_quat(c)
    }

    /// Extract angles from a pure rotation matrix
    pub fn from_rotation_matrix(m: &Mat3, order: EulerOrder) -> Self {
        const GIMBAL: f32 = 0.999_999_9;

        // m_rc: row r, column c
        let m11 = m.x_axis.x;
        let m21 = m.x_axis.y;
        let m31 = m.x_axis.z;
        let m12 = m.y_axis.x;
        let m22 = m.y_axis.y;
        let m32 = m.y_axis.z;
        let m13 = m.z_axis.x;
        let m23 = m.z_axis.y;
        let m33 = m.z_axis.z;

        let (x, y, z) = match order {
            EulerOrder::XYZ => {
                let y = m13.clamp(-1.0, 1.0).asin();
                if m13.abs() < GIMBAL {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            EulerOrder::YXZ => {
                let x = (-m23.clamp(-1.0, 1.0)).asin();
                if m23.abs() < GIMBAL {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            EulerOrder::ZXY => {
                let x = m32.clamp(-1.0, 1.0).asin();
                if m32.abs() < GIMBAL {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            EulerOrder::ZYX => {
                let y = (-m31.clamp(-1.0, 1.0)).asin();
                if m31.abs() < GIMBAL {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            EulerOrder::YZX => {
                let z = m21.clamp(-1.0, 1.0).asin();
                if m21.abs() < GIMBAL {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            EulerOrder::XZY => {
                let z = (-m12.clamp(-1.0, 1.0)).asin();
                if m12.abs() < GIMBAL {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        Self { x, y, z, order }
    }
}

/// Local transform of a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Euler,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Euler::default(),
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    pub fn quaternion(&self) -> Quat {
        self.rotation.to_quat()
    }

    /// Local matrix: translate * rotate * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    /// Point the local -Z axis at `target`, keeping the current Euler order.
    /// Positions are taken in the parent's space.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) -> &mut Self {
        let mut z = self.position - target;
        if z.length_squared() < f32::EPSILON {
            z = Vec3::Z;
        }
        z = z.normalize();

        let mut x = up.cross(z);
        if x.length_squared() < f32::EPSILON {
            // up parallel to view direction, nudge z
            let nudged = if up.z.abs() > 0.9 { z + Vec3::new(1e-4, 0.0, 0.0) } else { z + Vec3::new(0.0, 0.0, 1e-4) };
            x = up.cross(nudged.normalize());
        }
        x = x.normalize();
        let y = z.cross(x);

        let basis = Mat3::from_cols(x, y, z);
        self.rotation = Euler::from_rotation_matrix(&basis, self.rotation.order);
        self
    }
}

/// Vector and matrix primitives shared by every stage of the pipeline
use nalgebra::{Matrix2, Matrix3, Rotation3, Vector2, Vector3};

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Mat2 = Matrix2<f32>;
pub type Mat3 = Matrix3<f32>;

/// Rotation about the X axis (radians)
pub fn rotation_x(angle: f32) -> Mat3 {
    Rotation3::new(Vec3::new(angle, 0.0, 0.0)).into_inner()
}

/// Rotation about the Y axis (radians)
pub fn rotation_y(angle: f32) -> Mat3 {
    Rotation3::new(Vec3::new(0.0, angle, 0.0)).into_inner()
}

/// Rotation about the Z axis (radians)
pub fn rotation_z(angle: f32) -> Mat3 {
    Rotation3::new(Vec3::new(0.0, 0.0, angle)).into_inner()
}

/// Precompose an Euler triple into a single rotation matrix.
///
/// The rotations act on a column vector in the order Z, then X, then Y,
/// so the product is `Ry * Rx * Rz`.
pub fn euler_zxy(angles: &Vec3) -> Mat3 {
    rotation_y(angles.y) * rotation_x(angles.x) * rotation_z(angles.z)
}

/// Signed area of `abc`. Positive for counter-clockwise winding in a y-up
/// frame.
pub fn signed_area(a: &Vec2, b: &Vec2, c: &Vec2) -> f32 {
    let edges = Mat2::from_columns(&[a - c, b - c]);
    edges.determinant() / 2.0
}

/// Inclusive point-in-triangle test that accepts both windings.
///
/// Points exactly on an edge are inside.
pub fn triangle_contains(a: &Vec2, b: &Vec2, c: &Vec2, p: &Vec2) -> bool {
    let abp = signed_area(a, b, p);
    let bcp = signed_area(b, c, p);
    let cap = signed_area(c, a, p);

    (abp >= 0.0 && bcp >= 0.0 && cap >= 0.0) || (abp <= 0.0 && bcp <= 0.0 && cap <= 0.0)
}

/// Integer pixel bounds, half-open on the max side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Floor of the minimum and ceiling of the maximum over three points
    pub fn of_triangle(a: &Vec2, b: &Vec2, c: &Vec2) -> Self {
        Self {
            min_x: a.x.min(b.x).min(c.x).floor() as i32,
            min_y: a.y.min(b.y).min(c.y).floor() as i32,
            max_x: a.x.max(b.x).max(c.x).ceil() as i32,
            max_y: a.y.max(b.y).max(c.y).ceil() as i32,
        }
    }

    /// Intersect with `[0, width) x [0, height)`
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        Self {
            min_x: self.min_x.max(0),
            min_y: self.min_y.max(0),
            max_x: self.max_x.min(width.min(i32::MAX as u32) as i32),
            max_y: self.max_y.min(height.min(i32::MAX as u32) as i32),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }
}

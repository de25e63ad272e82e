/// Node-local transforms and their composition down the scene tree
use crate::geometry::{Triangle, Vertex};
use crate::math::{euler_zxy, Mat3, Vec3};

/// Translation, rotation and uniform scale.
///
/// Points are rotated, then scaled, then translated. Composition multiplies
/// rotations and scales and adds translations; a child's translation is not
/// rotated by its ancestors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Mat3,
    pub scale: f32,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Mat3::identity(),
            scale: 1.0,
        }
    }

    /// Rotation from Euler angles applied Z, then X, then Y
    pub fn set_euler(&mut self, angles: &Vec3) {
        self.rotation = euler_zxy(angles);
    }

    /// Accumulate a child's local transform onto this (parent) transform
    pub fn then(&self, local: &Transform) -> Transform {
        Transform {
            translation: self.translation + local.translation,
            rotation: self.rotation * local.rotation,
            scale: self.scale * local.scale,
        }
    }

    pub fn apply_point(&self, point: &Vec3) -> Vec3 {
        (self.rotation * point) * self.scale + self.translation
    }

    /// Normals are only rotated
    pub fn apply_normal(&self, normal: &Vec3) -> Vec3 {
        self.rotation * normal
    }

    pub fn apply_triangle(&self, triangle: &Triangle) -> Triangle {
        let [v0, v1, v2] = triangle.vertices.map(|vertex| Vertex {
            position: self.apply_point(&vertex.position),
            normal: vertex.normal.map(|normal| self.apply_normal(&normal)),
        });
        Triangle::new(v0, v1, v2)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let transform = Transform::default();
        let point = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(transform.apply_point(&point), point);
    }

    #[test]
    fn test_rotate_then_scale_then_translate() {
        let mut transform = Transform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            scale: 2.0,
            ..Transform::identity()
        };
        transform.set_euler(&Vec3::new(0.0, 0.0, FRAC_PI_2));

        // x rotates onto y, doubles, then shifts along x
        let moved = transform.apply_point(&Vec3::x());
        assert_relative_eq!(moved, Vec3::new(10.0, 2.0, 0.0), epsilon = 1e-5);

        let normal = transform.apply_normal(&Vec3::x());
        assert_relative_eq!(normal, Vec3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_composition_multiplies_scale_and_adds_translation() {
        let parent = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            scale: 2.0,
            ..Transform::identity()
        };
        let child = Transform {
            translation: Vec3::new(-1.0, 0.5, 0.0),
            scale: 3.0,
            ..Transform::identity()
        };

        let world = parent.then(&child);
        assert_relative_eq!(world.scale, 6.0);
        assert_relative_eq!(world.translation, Vec3::new(0.0, 2.5, 3.0));
        assert_relative_eq!(world.apply_point(&Vec3::x()), Vec3::new(6.0, 2.5, 3.0));
    }

    #[test]
    fn test_composition_multiplies_rotations_parent_first() {
        let mut parent = Transform::identity();
        parent.set_euler(&Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let mut child = Transform::identity();
        child.set_euler(&Vec3::new(0.0, 0.0, FRAC_PI_2));

        // Child spins x onto y, then the parent tips y onto z
        let world = parent.then(&child);
        assert_relative_eq!(world.apply_point(&Vec3::x()), Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_child_translation_is_not_rotated_by_parent() {
        let mut parent = Transform::identity();
        parent.set_euler(&Vec3::new(0.0, 0.0, FRAC_PI_2));
        let child = Transform {
            translation: Vec3::new(5.0, 0.0, 0.0),
            ..Transform::identity()
        };

        let world = parent.then(&child);
        assert_eq!(world.translation, Vec3::new(5.0, 0.0, 0.0));
        // The child's geometry still turns with the parent
        assert_relative_eq!(world.apply_point(&Vec3::x()), Vec3::new(5.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_triangle_normals_ignore_scale_and_translation() {
        let transform = Transform {
            translation: Vec3::new(0.0, 0.0, 5.0),
            scale: 4.0,
            ..Transform::identity()
        };
        let triangle = Triangle::new(
            Vertex { position: Vec3::x(), normal: Some(Vec3::z()) },
            Vertex::new(Vec3::y()),
            Vertex::new(Vec3::zeros()),
        );

        let moved = transform.apply_triangle(&triangle);
        assert_eq!(moved.vertices[0].position, Vec3::new(4.0, 0.0, 5.0));
        assert_eq!(moved.vertices[0].normal, Some(Vec3::z()));
        assert_eq!(moved.vertices[1].normal, None);
        assert_eq!(moved.vertices[2].position, Vec3::new(0.0, 0.0, 5.0));
    }
}

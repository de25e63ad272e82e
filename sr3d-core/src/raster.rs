/// Triangle scan conversion into a caller-owned ARGB pixel buffer
use crate::color::Color;
use crate::error::RenderError;
use crate::geometry::Triangle;
use crate::math::{triangle_contains, BoundingBox, Vec2};
use crate::projection::Camera;
use crate::transform::Transform;

/// A row-major pixel buffer borrowed for one frame
pub struct Target<'a> {
    pixels: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> Target<'a> {
    /// Wrap `pixels`, which must hold at least `width * height` values
    pub fn new(pixels: &'a mut [u32], width: u32, height: u32) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize;
        if pixels.len() < expected {
            return Err(RenderError::BufferTooSmall {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// A target sized to the camera's viewport
    pub fn for_camera(pixels: &'a mut [u32], camera: &Camera) -> Result<Self, RenderError> {
        Self::new(pixels, camera.width(), camera.height())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        let len = self.width as usize * self.height as usize;
        self.pixels[..len].fill(color.0);
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color(self.pixels[self.index(x, y)]))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// What happened to a single triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOutcome {
    Drawn { pixels: usize },
    /// At least one vertex was on or behind the camera plane
    BehindCamera,
    /// The bounding box missed the target
    OffScreen,
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces_drawn: usize,
    pub faces_culled: usize,
    pub pixels_written: usize,
}

impl RenderStats {
    pub fn record(&mut self, outcome: FaceOutcome) {
        match outcome {
            FaceOutcome::Drawn { pixels } => {
                self.faces_drawn += 1;
                self.pixels_written += pixels;
            }
            FaceOutcome::BehindCamera | FaceOutcome::OffScreen => self.faces_culled += 1,
        }
    }
}

/// Transform, project and fill one triangle.
///
/// A triangle with any vertex behind the camera is dropped whole; there is
/// no near-plane clipping.
pub fn render_face(
    triangle: &Triangle,
    camera: &Camera,
    transform: &Transform,
    color: Color,
    target: &mut Target,
) -> FaceOutcome {
    let world = transform.apply_triangle(triangle);

    let mut projected = [Vec2::zeros(); 3];
    for (screen, vertex) in projected.iter_mut().zip(&world.vertices) {
        match camera.project_point(&vertex.position) {
            Some(point) => *screen = point,
            None => return FaceOutcome::BehindCamera,
        }
    }

    let [a, b, c] = projected;
    rasterize_triangle(&a, &b, &c, color, target)
}

/// Fill every pixel whose center lies inside or on the edge of `abc`.
///
/// Both windings are accepted. Later fills overwrite earlier ones.
pub fn rasterize_triangle(a: &Vec2, b: &Vec2, c: &Vec2, color: Color, target: &mut Target) -> FaceOutcome {
    let bbox = BoundingBox::of_triangle(a, b, c).clamp_to(target.width, target.height);
    if bbox.is_empty() {
        return FaceOutcome::OffScreen;
    }

    let mut pixels = 0;
    for y in bbox.min_y..bbox.max_y {
        for x in bbox.min_x..bbox.max_x {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if triangle_contains(a, b, c, &center) {
                let idx = target.index(x as u32, y as u32);
                target.pixels[idx] = color.0;
                pixels += 1;
            }
        }
    }

    FaceOutcome::Drawn { pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;
    use crate::math::Vec3;
    use std::f32::consts::FRAC_PI_2;

    const W: u32 = 16;
    const H: u32 = 16;

    fn buffer() -> Vec<u32> {
        vec![Color::BLACK.0; (W * H) as usize]
    }

    #[test]
    fn test_target_checks_size() {
        let mut small = vec![0u32; 10];
        assert_eq!(
            Target::new(&mut small, 4, 4).err(),
            Some(RenderError::BufferTooSmall { expected: 16, actual: 10 })
        );
    }

    #[test]
    fn test_containment() {
        let mut pixels = buffer();
        let mut target = Target::new(&mut pixels, W, H).unwrap();
        let outcome = rasterize_triangle(
            &Vec2::new(0.0, 0.0),
            &Vec2::new(10.0, 0.0),
            &Vec2::new(0.0, 10.0),
            Color::RED,
            &mut target,
        );

        assert!(matches!(outcome, FaceOutcome::Drawn { pixels } if pixels > 0));
        assert_eq!(target.get(1, 1), Some(Color::RED));
        assert_eq!(target.get(9, 9), Some(Color::BLACK));
        // Nothing outside the bounding box
        assert_eq!(target.get(12, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_both_windings_fill_the_same_pixels() {
        let (a, b, c) = (Vec2::new(2.0, 1.0), Vec2::new(13.0, 4.0), Vec2::new(5.0, 14.0));

        let mut first = buffer();
        let mut target = Target::new(&mut first, W, H).unwrap();
        let ccw = rasterize_triangle(&a, &b, &c, Color::RED, &mut target);

        let mut second = buffer();
        let mut target = Target::new(&mut second, W, H).unwrap();
        let cw = rasterize_triangle(&a, &c, &b, Color::RED, &mut target);

        assert_eq!(ccw, cw);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clipped_to_target_and_offscreen() {
        let mut pixels = buffer();
        let mut target = Target::new(&mut pixels, W, H).unwrap();

        let outcome = rasterize_triangle(
            &Vec2::new(-100.0, -100.0),
            &Vec2::new(100.0, -100.0),
            &Vec2::new(0.0, 100.0),
            Color::GREEN,
            &mut target,
        );
        assert_eq!(outcome, FaceOutcome::Drawn { pixels: (W * H) as usize });

        let outcome = rasterize_triangle(
            &Vec2::new(20.0, 20.0),
            &Vec2::new(30.0, 20.0),
            &Vec2::new(20.0, 30.0),
            Color::BLUE,
            &mut target,
        );
        assert_eq!(outcome, FaceOutcome::OffScreen);
        assert!(pixels.iter().all(|&p| p == Color::GREEN.0));
    }

    #[test]
    fn test_later_fill_overwrites() {
        let mut pixels = buffer();
        let mut target = Target::new(&mut pixels, W, H).unwrap();
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(0.0, 16.0));

        rasterize_triangle(&a, &b, &c, Color::RED, &mut target);
        rasterize_triangle(&a, &b, &c, Color::BLUE, &mut target);
        assert_eq!(target.get(2, 2), Some(Color::BLUE));
    }

    #[test]
    fn test_render_face_discards_triangle_behind_camera() {
        let mut camera = Camera::new(FRAC_PI_2, 0.01, 1.0);
        camera.update_viewport(W, H).unwrap();

        let triangle = Triangle::new(
            Vertex::new(Vec3::new(-1.0, 5.0, -1.0)),
            Vertex::new(Vec3::new(1.0, 5.0, -1.0)),
            Vertex::new(Vec3::new(0.0, -1.0, 1.0)),
        );

        let mut pixels = buffer();
        let mut target = Target::new(&mut pixels, W, H).unwrap();
        let outcome = render_face(&triangle, &camera, &Transform::identity(), Color::RED, &mut target);

        assert_eq!(outcome, FaceOutcome::BehindCamera);
        assert!(pixels.iter().all(|&p| p == Color::BLACK.0));
    }

    #[test]
    fn test_render_face_applies_transform() {
        let mut camera = Camera::new(FRAC_PI_2, 0.01, 1.0);
        camera.update_viewport(W, H).unwrap();

        // A small triangle behind the camera, moved in front by the transform
        let triangle = Triangle::new(
            Vertex::new(Vec3::new(-1.0, -10.0, -1.0)),
            Vertex::new(Vec3::new(1.0, -10.0, -1.0)),
            Vertex::new(Vec3::new(0.0, -10.0, 1.0)),
        );
        let transform = Transform {
            translation: Vec3::new(0.0, 15.0, 0.0),
            ..Transform::identity()
        };

        let mut pixels = buffer();
        let mut target = Target::new(&mut pixels, W, H).unwrap();
        let outcome = render_face(&triangle, &camera, &transform, Color::RED, &mut target);

        assert!(matches!(outcome, FaceOutcome::Drawn { pixels } if pixels > 0));
        assert_eq!(target.get(W / 2, H / 2), Some(Color::RED));
    }

    #[test]
    fn test_stats_record() {
        let mut stats = RenderStats::default();
        stats.record(FaceOutcome::Drawn { pixels: 12 });
        stats.record(FaceOutcome::BehindCamera);
        stats.record(FaceOutcome::OffScreen);
        assert_eq!(
            stats,
            RenderStats {
                faces_drawn: 1,
                faces_culled: 2,
                pixels_written: 12
            }
        );
    }
}

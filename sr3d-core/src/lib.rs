/// SR3D Core Library - CPU-only scene graph, camera and triangle rasterizer
///
/// This library provides everything between a geometry file and a filled
/// pixel buffer: the mesh loader, the scene graph with hierarchical
/// transforms, the pitch/yaw camera and the bounding-box triangle rasterizer.

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use color::Color;
pub use error::{CameraError, LoadError, RenderError, SceneError};
pub use geometry::{Corner, Face, Mesh, Triangle, Vertex};
pub use input::{MoveKey, MovementKeys};
pub use math::{Mat2, Mat3, Vec2, Vec3};
pub use projection::{Camera, CameraConfig};
pub use raster::{RenderStats, Target};
pub use scene::{NodeId, NodeKind, Scene};
pub use transform::Transform;

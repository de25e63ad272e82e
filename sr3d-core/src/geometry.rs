/// Indexed triangle meshes and the triangles handed to the rasterizer
use crate::error::{IndexKind, ParseErrorKind};
use crate::math::{Vec2, Vec3};

/// One corner of a face: a vertex index and optional texture/normal indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl Corner {
    pub fn new(vertex: usize) -> Self {
        Self {
            vertex,
            texcoord: None,
            normal: None,
        }
    }

    pub fn with_attributes(vertex: usize, texcoord: usize, normal: usize) -> Self {
        Self {
            vertex,
            texcoord: Some(texcoord),
            normal: Some(normal),
        }
    }
}

/// A triangle face defined by three corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub corners: [Corner; 3],
}

impl Face {
    pub fn new(c0: Corner, c1: Corner, c2: Corner) -> Self {
        Self {
            corners: [c0, c1, c2],
        }
    }
}

/// A resolved vertex: position plus the normal, if the corner named one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Option<Vec3>,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
        }
    }
}

/// Three resolved vertices, ready for transformation and projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Fan-triangulate a polygon outline around its first point
    pub fn fan(points: &[Vec3]) -> impl Iterator<Item = Triangle> + '_ {
        points.windows(2).skip(1).map(move |pair| {
            Triangle::new(
                Vertex::new(points[0]),
                Vertex::new(pair[0]),
                Vertex::new(pair[1]),
            )
        })
    }
}

/// An indexed triangle mesh.
///
/// Every face index is validated when the face is pushed, so lookups through
/// [`Mesh::triangle`] never go out of bounds.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn push_vertex(&mut self, position: Vec3) {
        self.vertices.push(position);
    }

    pub fn push_normal(&mut self, normal: Vec3) {
        self.normals.push(normal);
    }

    pub fn push_texcoord(&mut self, texcoord: Vec2) {
        self.texcoords.push(texcoord);
    }

    /// Append a face after checking each index against what exists so far.
    /// Out-of-range indices are reported 1-based.
    pub fn push_face(&mut self, face: Face) -> Result<(), ParseErrorKind> {
        for corner in &face.corners {
            check_index(IndexKind::Vertex, Some(corner.vertex), self.vertices.len())?;
            check_index(IndexKind::Texcoord, corner.texcoord, self.texcoords.len())?;
            check_index(IndexKind::Normal, corner.normal, self.normals.len())?;
        }
        self.faces.push(face);
        Ok(())
    }

    pub fn corner_position(&self, corner: &Corner) -> Vec3 {
        self.vertices[corner.vertex]
    }

    pub fn corner_normal(&self, corner: &Corner) -> Option<Vec3> {
        corner.normal.map(|index| self.normals[index])
    }

    pub fn triangle(&self, face: &Face) -> Triangle {
        let [c0, c1, c2] = face.corners.map(|corner| Vertex {
            position: self.corner_position(&corner),
            normal: self.corner_normal(&corner),
        });
        Triangle::new(c0, c1, c2)
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|face| self.triangle(face))
    }

    /// Create a cube centered on the origin, one normal per side
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.push_vertex(Vec3::new(x, y, z));
        }

        let sides: [(Vec3, [[usize; 3]; 2]); 6] = [
            // Front
            (Vec3::z(), [[4, 5, 6], [4, 6, 7]]),
            // Back
            (-Vec3::z(), [[0, 3, 2], [0, 2, 1]]),
            // Top
            (Vec3::y(), [[3, 7, 6], [3, 6, 2]]),
            // Bottom
            (-Vec3::y(), [[0, 1, 5], [0, 5, 4]]),
            // Right
            (Vec3::x(), [[1, 2, 6], [1, 6, 5]]),
            // Left
            (-Vec3::x(), [[0, 4, 7], [0, 7, 3]]),
        ];

        for (normal, triangles) in sides {
            mesh.push_normal(normal);
            let n = mesh.normals.len() - 1;
            for [a, b, c] in triangles {
                let corner = |v| Corner {
                    vertex: v,
                    texcoord: None,
                    normal: Some(n),
                };
                mesh.faces.push(Face::new(corner(a), corner(b), corner(c)));
            }
        }

        mesh
    }
}

fn check_index(kind: IndexKind, index: Option<usize>, len: usize) -> Result<(), ParseErrorKind> {
    match index {
        Some(index) if index >= len => Err(ParseErrorKind::IndexOutOfRange {
            kind,
            index: index + 1,
            len,
        }),
        _ => Ok(()),
    }
}

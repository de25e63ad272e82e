/// Hierarchical scene of groups, mesh instances and polygons.
///
/// Nodes live in a slot map owned by [`Scene`] and are addressed by
/// [`NodeId`]. A node's parent is stored as an id, and a group's children as
/// an ordered id list; the order of that list is the draw order. Ids of
/// removed nodes are detected rather than reused.
use std::sync::Arc;

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::color::Color;
use crate::error::{RenderError, SceneError};
use crate::geometry::{Mesh, Triangle};
use crate::math::Vec3;
use crate::projection::Camera;
use crate::raster::{render_face, RenderStats, Target};
use crate::transform::Transform;

new_key_type! {
    pub struct NodeId;
}

/// Payload carried by a node
#[derive(Debug, Clone)]
pub enum NodeKind {
    Group { children: Vec<NodeId> },
    /// Shared reference to a mesh; removing the node never frees the mesh
    Mesh { mesh: Arc<Mesh>, color: Color },
    /// Planar outline owned by the node, drawn as a fan from its first vertex
    Polygon { vertices: Vec<Vec3>, color: Color },
}

#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    transform: Transform,
    kind: NodeKind,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Group { children } => children,
            _ => &[],
        }
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(self.node(id)?.children())
    }

    pub fn transform(&self, id: NodeId) -> Result<&Transform, SceneError> {
        Ok(&self.node(id)?.transform)
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self.nodes.get(id).and_then(|node| node.parent),
        }
    }

    pub fn add_group(&mut self, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        self.insert(parent, NodeKind::Group { children: Vec::new() })
    }

    pub fn add_mesh_instance(&mut self, parent: Option<NodeId>, mesh: Arc<Mesh>) -> Result<NodeId, SceneError> {
        self.insert(
            parent,
            NodeKind::Mesh {
                mesh,
                color: Color::default(),
            },
        )
    }

    /// Add a polygon outline of three or more vertices
    pub fn add_polygon(&mut self, parent: Option<NodeId>, vertices: Vec<Vec3>) -> Result<NodeId, SceneError> {
        if vertices.len() < 3 {
            return Err(SceneError::DegeneratePolygon(vertices.len()));
        }
        self.insert(
            parent,
            NodeKind::Polygon {
                vertices,
                color: Color::default(),
            },
        )
    }

    fn insert(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Result<NodeId, SceneError> {
        if let Some(parent) = parent {
            self.group_children_mut(parent)?;
        }

        let id = self.nodes.insert(Node {
            parent,
            transform: Transform::identity(),
            kind,
        });
        if let Some(parent) = parent {
            self.group_children_mut(parent)?.push(id);
        }

        debug!("added {:?} under {:?}", id, parent);
        Ok(id)
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<(), SceneError> {
        self.node_mut(id)?.transform.translation = position;
        Ok(())
    }

    /// Store Euler angles (radians) as a rotation applied Z, then X, then Y
    pub fn set_rotation(&mut self, id: NodeId, angles: Vec3) -> Result<(), SceneError> {
        self.node_mut(id)?.transform.set_euler(&angles);
        Ok(())
    }

    pub fn set_scale(&mut self, id: NodeId, scale: f32) -> Result<(), SceneError> {
        self.node_mut(id)?.transform.scale = scale;
        Ok(())
    }

    pub fn set_color(&mut self, id: NodeId, new_color: Color) -> Result<(), SceneError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Mesh { color, .. } | NodeKind::Polygon { color, .. } => {
                *color = new_color;
                Ok(())
            }
            NodeKind::Group { .. } => Err(SceneError::NotDrawable),
        }
    }

    /// Move `id` to the end of `new_parent`'s children, or make it a root.
    ///
    /// Fails with [`SceneError::Cycle`] when `new_parent` is `id` itself or
    /// one of its descendants.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), SceneError> {
        let old_parent = self.node(id)?.parent;

        if let Some(parent) = new_parent {
            self.group_children_mut(parent)?;
            if parent == id || self.ancestors(parent).any(|ancestor| ancestor == id) {
                return Err(SceneError::Cycle);
            }
        }

        self.detach(id, old_parent);
        self.node_mut(id)?.parent = new_parent;
        if let Some(parent) = new_parent {
            self.group_children_mut(parent)?.push(id);
        }

        debug!("reparented {:?}: {:?} -> {:?}", id, old_parent, new_parent);
        Ok(())
    }

    /// Detach `id` and destroy it along with its whole subtree
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        let parent = self.node(id)?.parent;
        self.detach(id, parent);

        // Collect parents before children, then free in reverse
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get(next) {
                stack.extend_from_slice(node.children());
                order.push(next);
            }
        }
        for node in order.iter().rev() {
            self.nodes.remove(*node);
        }

        debug!("removed {:?} and {} descendants", id, order.len() - 1);
        Ok(())
    }

    /// Draw every node below `root` into `pixels`, depth-first in child order.
    ///
    /// `root` contributes no geometry and its own transform is not applied.
    /// Triangles are painted in traversal order with no depth test, so later
    /// siblings cover earlier ones.
    pub fn render(&self, root: NodeId, camera: &Camera, pixels: &mut [u32]) -> Result<RenderStats, RenderError> {
        let mut target = Target::for_camera(pixels, camera)?;
        let children = match &self.node(root)?.kind {
            NodeKind::Group { children } => children,
            _ => return Err(SceneError::NotAGroup.into()),
        };

        let mut stats = RenderStats::default();
        let mut stack: Vec<(NodeId, Transform)> = children
            .iter()
            .rev()
            .map(|&child| (child, Transform::identity()))
            .collect();

        while let Some((id, parent_transform)) = stack.pop() {
            let node = self.node(id)?;
            let world = parent_transform.then(&node.transform);

            match &node.kind {
                NodeKind::Group { children } => {
                    stack.extend(children.iter().rev().map(|&child| (child, world)));
                }
                NodeKind::Mesh { mesh, color } => {
                    for triangle in mesh.triangles() {
                        stats.record(render_face(&triangle, camera, &world, *color, &mut target));
                    }
                }
                NodeKind::Polygon { vertices, color } => {
                    for triangle in Triangle::fan(vertices) {
                        stats.record(render_face(&triangle, camera, &world, *color, &mut target));
                    }
                }
            }
        }

        trace!(
            "frame: {} faces drawn, {} culled, {} pixels",
            stats.faces_drawn,
            stats.faces_culled,
            stats.pixels_written
        );
        Ok(stats)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(id).ok_or(SceneError::UnknownNode)
    }

    fn group_children_mut(&mut self, id: NodeId) -> Result<&mut Vec<NodeId>, SceneError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Group { children } => Ok(children),
            _ => Err(SceneError::NotAGroup),
        }
    }

    /// Remove `id` from its parent's child list, keeping sibling order
    fn detach(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(parent) = parent {
            if let Ok(children) = self.group_children_mut(parent) {
                children.retain(|&child| child != id);
            }
        }
    }
}

pub struct Ancestors<'a> {
    scene: &'a Scene,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.scene.nodes.get(current).and_then(|node| node.parent);
        Some(current)
    }
}

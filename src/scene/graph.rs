//! Arena-backed scene tree.
//!
//! Nodes live in slots addressed by generational [`NodeId`]s. Removing a node
//! releases its whole subtree and bumps the slot generation, so stale ids
//! never resolve to a recycled node.

use std::collections::HashSet;

use glam::Mat4;

use super::node::Node;
use crate::camera::PerspectiveCamera;
use crate::error::SceneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

#[derive(Debug, Clone)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    len: usize,
}

impl SceneGraph {
    /// Create a graph holding only the root group
    pub fn new() -> Self {
        let root = NodeId { index: 0, generation: 0 };
        Self {
            slots: vec![Slot {
                generation: 0,
                entry: Some(Entry {
                    node: Node::group().named("scene"),
                    parent: None,
                    children: Vec::new(),
                }),
            }],
            free: Vec::new(),
            root,
            len: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.entry(id).map(|e| &e.node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.entry_mut(id).map(|e| &mut e.node)
    }

    /// Like `get_mut` but reports a missing node as an error
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.get_mut(id).ok_or(SceneError::NodeNotFound(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.entry(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Insert `node` as the last child of `parent`
    pub fn add(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        Ok(self.insert(parent, node))
    }

    /// Insert under the root
    pub fn spawn(&mut self, node: Node) -> NodeId {
        self.insert(self.root, node)
    }

    /// Remove `id` and every descendant; returns the number of released nodes
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        if !self.contains(id) {
            return Err(SceneError::NodeNotFound(id));
        }

        self.detach(id);

        let doomed: Vec<NodeId> = self.descendants(id).collect();
        for node in &doomed {
            let slot = &mut self.slots[node.index as usize];
            slot.entry = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node.index);
        }
        self.len -= doomed.len();
        Ok(doomed.len())
    }

    /// Move `child` under `new_parent`, detaching it from its old parent first
    pub fn attach(&mut self, child: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if child == self.root {
            return Err(SceneError::RootImmutable);
        }
        if !self.contains(child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if !self.contains(new_parent) {
            return Err(SceneError::NodeNotFound(new_parent));
        }
        if self.is_ancestor_or_self(child, new_parent) {
            return Err(SceneError::CycleDetected { child, parent: new_parent });
        }

        self.detach(child);
        if let Some(entry) = self.entry_mut(child) {
            entry.parent = Some(new_parent);
        }
        if let Some(entry) = self.entry_mut(new_parent) {
            entry.children.push(child);
        }
        Ok(())
    }

    /// Pre-order depth-first walk starting at (and including) `id`
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        Descendants { graph: self, stack }
    }

    /// All live nodes in pre-order from the root
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.descendants(self.root)
            .filter_map(move |id| self.get(id).map(|node| (id, node)))
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    /// Local-to-world matrix; identity for missing nodes
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.entry(current) {
                Some(entry) => {
                    matrix = entry.node.transform.matrix() * matrix;
                    cursor = entry.parent;
                }
                None => break,
            }
        }
        matrix
    }

    /// Visible only if the node and every ancestor are visible
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.entry(current) {
                Some(entry) if entry.node.visible => cursor = entry.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn camera(&self, id: NodeId) -> Result<&PerspectiveCamera, SceneError> {
        self.get(id)
            .ok_or(SceneError::NodeNotFound(id))?
            .as_camera()
            .ok_or(SceneError::NotACamera(id))
    }

    pub fn camera_mut(&mut self, id: NodeId) -> Result<&mut PerspectiveCamera, SceneError> {
        self.get_mut(id)
            .ok_or(SceneError::NodeNotFound(id))?
            .as_camera_mut()
            .ok_or(SceneError::NotACamera(id))
    }

    /// Verify the tree invariant: one root, consistent links, all reachable, acyclic
    pub fn check_invariants(&self) -> Result<(), SceneError> {
        let root_entry = self
            .entry(self.root)
            .ok_or_else(|| SceneError::Invariant("root missing".into()))?;
        if root_entry.parent.is_some() {
            return Err(SceneError::Invariant("root has a parent".into()));
        }

        let mut seen = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(SceneError::Invariant(format!("{id:?} reached twice")));
            }
            let entry = self
                .entry(id)
                .ok_or_else(|| SceneError::Invariant(format!("dangling child {id:?}")))?;
            for &child in &entry.children {
                let child_parent = self.entry(child).and_then(|c| c.parent);
                if child_parent != Some(id) {
                    return Err(SceneError::Invariant(format!(
                        "{child:?} listed under {id:?} but points at {child_parent:?}"
                    )));
                }
                stack.push(child);
            }
        }

        let live = self.slots.iter().filter(|s| s.entry.is_some()).count();
        if live != seen.len() || live != self.len {
            return Err(SceneError::Invariant(format!(
                "{live} live nodes, {} reachable, {} counted",
                seen.len(),
                self.len
            )));
        }
        Ok(())
    }

    fn insert(&mut self, parent: NodeId, node: Node) -> NodeId {
        let entry = Entry { node, parent: Some(parent), children: Vec::new() };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(entry);
                NodeId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, entry: Some(entry) });
                NodeId { index, generation: 0 }
            }
        };

        if let Some(parent_entry) = self.entry_mut(parent) {
            parent_entry.children.push(id);
        }
        self.len += 1;
        id
    }

    fn entry(&self, id: NodeId) -> Option<&Entry> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.entry_mut(id).and_then(|e| e.parent.take());
        if let Some(parent) = parent {
            if let Some(parent_entry) = self.entry_mut(parent) {
                parent_entry.children.retain(|&c| c != id);
            }
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Descendants<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // reverse so the first child is visited first
        self.stack.extend(self.graph.children(id).iter().rev().copied());
        Some(id)
    }
}

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::layout_engine::{Axis, LayoutKind};

slotmap::new_key_type! {
    /// Handle to a container somewhere in the layout tree.
    pub struct NodeId;
}

/// Integer pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Rect { Rect { x, y, width, height } }

    pub fn size(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    pub fn set_size(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Width => self.width = value,
            Axis::Height => self.height = value,
        }
    }

    pub fn pos(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Width => self.x,
            Axis::Height => self.y,
        }
    }

    pub fn set_pos(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Width => self.x = value,
            Axis::Height => self.y = value,
        }
    }
}

/// A node of the layout tree: a split/stack container, or a window when it
/// has no children.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Floating windows attached to this container (normally a workspace
    /// root). They are kept out of `children` so sibling and group math
    /// never sees them.
    pub(crate) floating: Vec<NodeId>,
    pub layout: LayoutKind,
    /// Number of children in the master group. Meaningful for auto layouts.
    pub master_count: usize,
    /// Target number of slave groups. Meaningful for auto layouts.
    pub slave_group_count: usize,
    pub rect: Rect,
    pub is_floating: bool,
    /// Floating-only target size, clamped before it is committed.
    pub desired_width: i32,
    pub desired_height: i32,
}

impl Container {
    pub fn parent(&self) -> Option<NodeId> { self.parent }

    pub fn child_count(&self) -> usize { self.children.len() }

    pub(crate) fn desired(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Width => self.desired_width,
            Axis::Height => self.desired_height,
        }
    }

    pub(crate) fn set_desired(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Width => self.desired_width = value,
            Axis::Height => self.desired_height = value,
        }
    }
}

/// Arena that owns every container. The tree is owned top-down from its
/// roots; `parent` links are non-owning backrefs.
#[derive(Default, Serialize, Deserialize)]
pub struct LayoutTree {
    map: SlotMap<NodeId, Container>,
}

impl LayoutTree {
    pub fn new() -> LayoutTree { LayoutTree::default() }

    /// Create a root container for a workspace covering `rect`.
    pub fn create_workspace(&mut self, rect: Rect) -> NodeId {
        self.map.insert(Container { rect, ..Default::default() })
    }

    /// Append a new child after `parent`'s existing children. Child order is
    /// position along the parent's major axis and must be preserved.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        let id = self.map.insert(Container {
            parent: Some(parent),
            ..Default::default()
        });
        self.map[parent].children.push(id);
        id
    }

    /// Attach a floating window to `parent`. Floating windows take no part
    /// in sibling layout math and keep the geometry they are given.
    pub fn add_floating(&mut self, parent: NodeId, rect: Rect) -> NodeId {
        let id = self.map.insert(Container {
            parent: Some(parent),
            is_floating: true,
            rect,
            desired_width: rect.width,
            desired_height: rect.height,
            ..Default::default()
        });
        self.map[parent].floating.push(id);
        id
    }

    pub fn contains(&self, node: NodeId) -> bool { self.map.contains_key(node) }

    pub fn get(&self, node: NodeId) -> Option<&Container> { self.map.get(node) }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Container> { self.map.get_mut(node) }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.map.get(node).and_then(|c| c.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.map.get(node).map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    pub fn floating_windows(&self, node: NodeId) -> &[NodeId] {
        self.map.get(node).map(|c| c.floating.as_slice()).unwrap_or(&[])
    }

    /// Position of `node` in its parent's child list.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.map[parent].children.iter().position(|&c| c == node)
    }

    /// Returns an iterator over all ancestors of the current node, including itself.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut next = self.map.contains_key(node).then_some(node);
        std::iter::from_fn(move || {
            let current = next;
            next = current.and_then(|n| self.map.get(n).and_then(|c| c.parent));
            current
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Container)> + '_ { self.map.iter() }

    pub fn len(&self) -> usize { self.map.len() }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }
}

impl Index<NodeId> for LayoutTree {
    type Output = Container;

    fn index(&self, index: NodeId) -> &Self::Output { &self.map[index] }
}

impl IndexMut<NodeId> for LayoutTree {
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output { &mut self.map[index] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_preserves_order() {
        let mut tree = LayoutTree::new();
        let ws = tree.create_workspace(Rect::new(0, 0, 800, 600));
        let a = tree.add_child(ws);
        let b = tree.add_child(ws);
        let c = tree.add_child(ws);

        assert_eq!(tree.children(ws), &[a, b, c]);
        assert_eq!(tree.index_in_parent(b), Some(1));
        assert_eq!(tree.parent(a), Some(ws));
        assert_eq!(tree.parent(ws), None);
    }

    #[test]
    fn ancestors_include_self_up_to_root() {
        let mut tree = LayoutTree::new();
        let ws = tree.create_workspace(Rect::new(0, 0, 800, 600));
        let mid = tree.add_child(ws);
        let leaf = tree.add_child(mid);

        let chain: Vec<_> = tree.ancestors(leaf).collect();
        assert_eq!(chain, vec![leaf, mid, ws]);
    }

    #[test]
    fn ancestors_of_unknown_node_is_empty() {
        let tree = LayoutTree::new();
        assert_eq!(tree.ancestors(NodeId::default()).count(), 0);
    }

    #[test]
    fn floating_child_keeps_requested_rect() {
        let mut tree = LayoutTree::new();
        let ws = tree.create_workspace(Rect::new(0, 0, 800, 600));
        let float = tree.add_floating(ws, Rect::new(100, 80, 300, 200));

        assert!(tree[float].is_floating);
        assert_eq!(tree[float].rect, Rect::new(100, 80, 300, 200));
        assert_eq!(tree[float].desired_width, 300);
        assert_eq!(tree[float].desired_height, 200);
        assert!(tree.children(ws).is_empty());
        assert_eq!(tree.floating_windows(ws), &[float]);
        assert_eq!(tree.parent(float), Some(ws));
    }

    #[test]
    fn rect_axis_accessors() {
        let mut rect = Rect::new(10, 20, 300, 400);
        assert_eq!(rect.size(Axis::Width), 300);
        assert_eq!(rect.pos(Axis::Height), 20);

        rect.set_size(Axis::Height, 450);
        rect.set_pos(Axis::Width, 15);
        assert_eq!(rect, Rect::new(15, 20, 300, 450));
    }
}

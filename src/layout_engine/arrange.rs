//! Collaborators the resize distributor delegates to: recursive size
//! propagation, workspace arrangement, floating clamping and the geometry
//! commit hook. Resizing is two explicit phases: `recursive_resize` only
//! changes sizes, then `arrange_workspace` recomputes positions.

use tracing::trace;

use crate::layout_engine::engine::LayoutEngine;
use crate::layout_engine::groups;
use crate::layout_engine::{Axis, LayoutKind, ResizeEdge};
use crate::model::tree::{NodeId, Rect};

impl LayoutEngine {
    /// Rescale a subtree from one edge. The amount is divided among the
    /// children of containers that split along the resize axis and passed
    /// through unchanged otherwise; pixel deltas are truncated when applied.
    /// Positions are not touched.
    pub fn recursive_resize(&mut self, node: NodeId, amount: f64, edge: ResizeEdge) {
        let axis = edge.axis();
        let kind = {
            let container = &mut self.tree[node];
            let size = container.rect.size(axis);
            container.rect.set_size(axis, size + amount as i32);
            container.layout
        };
        let children = self.tree[node].children.clone();
        if children.is_empty() {
            self.update_geometry(node);
            return;
        }
        let splits_axis = kind.orientation() == Some(axis.orientation());
        let share = if splits_axis { amount / children.len() as f64 } else { amount };
        for child in children {
            self.recursive_resize(child, share, edge);
        }
    }

    /// Recompute absolute geometry for every tiled container in the
    /// workspace. Floating windows keep their own geometry.
    pub fn arrange_workspace(&mut self, workspace: NodeId) {
        let rect = self.tree[workspace].rect;
        self.arrange_container(workspace, rect);
    }

    fn arrange_container(&mut self, node: NodeId, rect: Rect) {
        self.tree[node].rect = rect;
        let kind = self.tree[node].layout;
        let children = self.tree[node].children.clone();
        if children.is_empty() {
            self.update_geometry(node);
            return;
        }
        match kind {
            LayoutKind::Horizontal => self.arrange_split(&children, rect, Axis::Width),
            LayoutKind::Vertical => self.arrange_split(&children, rect, Axis::Height),
            LayoutKind::Tabbed | LayoutKind::Stacked => {
                for child in children {
                    self.arrange_container(child, rect);
                }
            }
            LayoutKind::AutoLeft | LayoutKind::AutoRight => {
                self.arrange_auto(node, rect, Axis::Width)
            }
            LayoutKind::AutoTop | LayoutKind::AutoBottom => {
                self.arrange_auto(node, rect, Axis::Height)
            }
        }
    }

    /// Children keep their relative shares along `axis` and fill the parent
    /// rect exactly; the last child absorbs rounding leftovers.
    fn arrange_split(&mut self, children: &[NodeId], rect: Rect, axis: Axis) {
        let total: f64 =
            children.iter().map(|&child| self.tree[child].rect.size(axis).max(1) as f64).sum();
        let span = rect.size(axis);
        let end = rect.pos(axis) + span;
        let mut offset = rect.pos(axis);
        for (i, &child) in children.iter().enumerate() {
            let size = if i + 1 == children.len() {
                end - offset
            } else {
                let share = self.tree[child].rect.size(axis).max(1) as f64 / total;
                (span as f64 * share).round() as i32
            };
            let mut child_rect = rect;
            child_rect.set_pos(axis, offset);
            child_rect.set_size(axis, size);
            self.arrange_container(child, child_rect);
            offset += size;
        }
    }

    /// Auto layouts cut one strip per group along the major axis, in
    /// major-axis group order, and stack each group's members along the
    /// minor axis.
    fn arrange_auto(&mut self, node: NodeId, rect: Rect, major: Axis) {
        let (ranges, children) = {
            let container = &self.tree[node];
            let len = container.children.len();
            let master = container.master_count.min(len);

            let mut ranges: Vec<(usize, usize)> = Vec::new();
            if master > 0 {
                ranges.push((0, master));
            }
            let mut i = master;
            while i < len {
                let end = groups::next_group_index(container, i).clamp(i + 1, len);
                ranges.push((i, end));
                i = end;
            }
            if master > 0 && !container.layout.master_first() {
                ranges.rotate_left(1);
            }
            (ranges, container.children.clone())
        };

        let strip_sizes: Vec<f64> = ranges
            .iter()
            .map(|&(start, end)| {
                children[start..end]
                    .iter()
                    .map(|&child| self.tree[child].rect.size(major).max(1) as f64)
                    .fold(1.0, f64::max)
            })
            .collect();
        let total: f64 = strip_sizes.iter().sum();
        let span = rect.size(major);
        let end_pos = rect.pos(major) + span;
        let mut offset = rect.pos(major);
        for (i, &(start, end)) in ranges.iter().enumerate() {
            let size = if i + 1 == ranges.len() {
                end_pos - offset
            } else {
                (span as f64 * strip_sizes[i] / total).round() as i32
            };
            let mut strip = rect;
            strip.set_pos(major, offset);
            strip.set_size(major, size);
            self.arrange_split(&children[start..end], strip, major.other());
            offset += size;
        }
    }

    /// Clamp a floating window's desired size to the configured bounds. A
    /// zero maximum leaves that side unbounded.
    pub fn clamp_floating_size(&mut self, node: NodeId) {
        let settings = &self.settings;
        let container = &mut self.tree[node];
        container.desired_width = container.desired_width.max(settings.floating_minimum_width);
        if settings.floating_maximum_width > 0 {
            container.desired_width = container.desired_width.min(settings.floating_maximum_width);
        }
        container.desired_height = container.desired_height.max(settings.floating_minimum_height);
        if settings.floating_maximum_height > 0 {
            container.desired_height =
                container.desired_height.min(settings.floating_maximum_height);
        }
    }

    /// Commit a container's geometry to the display layer. Display plumbing
    /// lives outside this crate; the engine records the commit.
    pub fn update_geometry(&mut self, node: NodeId) {
        self.geometry_updates += 1;
        trace!(?node, rect = ?self.tree[node].rect, "geometry committed");
    }

    /// Number of geometry commits issued so far.
    pub fn geometry_updates(&self) -> u64 { self.geometry_updates }
}

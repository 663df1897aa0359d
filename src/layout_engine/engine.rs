use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::config::LayoutSettings;
use crate::layout_engine::groups;
use crate::layout_engine::resize::{ResizeDirection, ResizeUnit, SetSize, resolve_pixels};
use crate::layout_engine::{Axis, ResizeEdge};
use crate::model::tree::{LayoutTree, NodeId};

/// Explicit per-request context: the active workspace and the focused
/// container, supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeContext {
    pub workspace: NodeId,
    pub focus: Option<NodeId>,
}

/// Resize propagation engine over a container tree.
///
/// Every entry point reports success: an absent focus, a request no ancestor
/// can absorb, or a change that would violate the sane minimum size all
/// degrade to a no-op that leaves the tree untouched.
#[derive(Serialize, Deserialize)]
pub struct LayoutEngine {
    pub(crate) tree: LayoutTree,
    #[serde(skip)]
    pub(crate) settings: LayoutSettings,
    #[serde(skip)]
    pub(crate) geometry_updates: u64,
}

/// Ancestor chosen to absorb a resize, with the focused child's index in it
/// and the number of sibling groups/children on each side along the axis.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResizeTarget {
    pub(crate) parent: NodeId,
    pub(crate) focused: usize,
    pub(crate) use_major: bool,
    pub(crate) before: usize,
    pub(crate) after: usize,
}

impl LayoutEngine {
    pub fn new(settings: LayoutSettings) -> Self {
        LayoutEngine {
            tree: LayoutTree::new(),
            settings,
            geometry_updates: 0,
        }
    }

    pub fn tree(&self) -> &LayoutTree { &self.tree }

    /// The host builds and maintains the container tree through this; the
    /// engine itself only resizes.
    pub fn tree_mut(&mut self) -> &mut LayoutTree { &mut self.tree }

    pub fn settings(&self) -> &LayoutSettings { &self.settings }

    pub fn set_settings(&mut self, settings: &LayoutSettings) {
        self.settings = settings.clone();
    }

    pub fn focused_window_including_floating(&self, ctx: ResizeContext) -> Option<NodeId> {
        ctx.focus.filter(|&node| self.tree.contains(node))
    }

    pub fn focused_tiled_window(&self, ctx: ResizeContext) -> Option<NodeId> {
        self.focused_window_including_floating(ctx).filter(|&node| !self.tree[node].is_floating)
    }

    pub fn focused_floating_window(&self, ctx: ResizeContext) -> Option<NodeId> {
        self.focused_window_including_floating(ctx).filter(|&node| self.tree[node].is_floating)
    }

    /// Grow or shrink the focused window along `axis`.
    ///
    /// A missing or zero `amount` falls back to the configured default
    /// magnitude. Percent amounts resolve against the focused window's
    /// current dimension; tiled windows default to percent and floating
    /// windows to pixels unless the unit is explicit.
    pub fn resize(
        &mut self,
        ctx: ResizeContext,
        direction: ResizeDirection,
        axis: Axis,
        amount: Option<i32>,
        unit: ResizeUnit,
    ) {
        let Some(focused) = self.focused_window_including_floating(ctx) else {
            debug!("resize: no focused window, nothing to do");
            return;
        };
        let magnitude = match amount {
            Some(value) if value != 0 => value,
            _ => {
                debug!(
                    fallback = self.settings.default_resize_amount,
                    "resize: missing or zero amount, using the default"
                );
                self.settings.default_resize_amount
            }
        };
        let is_floating = self.tree[focused].is_floating;
        let current = self.tree[focused].rect.size(axis);
        let pixels = resolve_pixels(direction.apply_sign(magnitude), unit, current, is_floating);
        if is_floating {
            self.resize_floating(ctx, pixels, axis);
        } else {
            self.resize_tiled(ctx, pixels, axis);
        }
    }

    /// Set the focused window to absolute dimensions. One or two axes may be
    /// given per request; each is applied independently.
    pub fn resize_set(&mut self, ctx: ResizeContext, sizes: &[SetSize]) {
        for size in sizes {
            self.set_size(ctx, *size);
        }
    }

    fn set_size(&mut self, ctx: ResizeContext, size: SetSize) {
        let Some(focused) = self.focused_window_including_floating(ctx) else {
            debug!("resize set: no focused window, nothing to do");
            return;
        };
        let current = self.tree[focused].rect.size(size.axis);
        let target = match size.unit {
            ResizeUnit::Ppt => (size.value as f64 / 100.0 * current as f64).round() as i32,
            _ => size.value,
        };
        if self.tree[focused].is_floating {
            self.set_size_floating(ctx, target, size.axis);
        } else {
            self.resize_tiled(ctx, target - current, size.axis);
        }
    }

    pub(crate) fn resize_tiled(&mut self, ctx: ResizeContext, amount: i32, axis: Axis) {
        if amount == 0 {
            return;
        }
        let Some(focused) = self.focused_tiled_window(ctx) else {
            debug!("resize: no focused tiled window");
            return;
        };
        let Some(target) = self.find_resize_target(focused, axis) else {
            debug!(%axis, "resize: no ancestor can absorb the request");
            return;
        };
        if self.distribute(&target, amount, axis) {
            // Size changes never reposition; arrangement recomputes the
            // absolute positions for the whole workspace.
            self.arrange_workspace(ctx.workspace);
        }
    }

    /// Walk up from the focused container to the nearest ancestor whose
    /// layout can absorb a resize along `axis` and that has sibling groups
    /// or children on at least one side of the focused descendant.
    pub(crate) fn find_resize_target(&self, leaf: NodeId, axis: Axis) -> Option<ResizeTarget> {
        let mut child = leaf;
        while let Some(parent) = self.tree.parent(child) {
            let container = &self.tree[parent];
            if container.child_count() > 1 && container.layout.absorbs(axis) {
                match self.tree.index_in_parent(child) {
                    None => {
                        warn!(?child, ?parent, "child container missing from its parent's child list");
                    }
                    Some(index) => {
                        let use_major = container.layout.resizes_major(axis);
                        let (before, after) = if use_major {
                            let ordinal = groups::group_index(container, index);
                            (ordinal, groups::group_count(container) - ordinal - 1)
                        } else {
                            (
                                index - groups::group_start_index(container, index),
                                groups::next_group_index(container, index) - index - 1,
                            )
                        };
                        if before > 0 || after > 0 {
                            debug!(?parent, before, after, use_major, "resize: found absorbing ancestor");
                            return Some(ResizeTarget { parent, focused: index, use_major, before, after });
                        }
                    }
                }
            }
            child = parent;
        }
        None
    }

    /// Phase one of a tiled resize: validate the affected range against the
    /// sane minimum, then change sizes through `recursive_resize`. The whole
    /// operation is rejected, applying nothing, if any affected sibling
    /// would end up below the minimum.
    pub(crate) fn distribute(&mut self, target: &ResizeTarget, amount: i32, axis: Axis) -> bool {
        let children = self.tree[target.parent].children.clone();
        let focused_origin = self.tree[children[target.focused]].rect.pos(axis);
        let minimum = self.settings.min_sane(axis) as f64;

        let (start, end) = if target.use_major {
            (0, children.len())
        } else {
            let container = &self.tree[target.parent];
            (
                groups::group_start_index(container, target.focused),
                groups::group_end_index(container, target.focused),
            )
        };

        let mut index = start;
        while index < end {
            let sibling = children[index];
            let origin = self.tree[sibling].rect.pos(axis);
            let pixels = sibling_delta(
                amount,
                target.before,
                target.after,
                origin < focused_origin,
                origin > focused_origin,
            );
            let size = self.tree[sibling].rect.size(axis) as f64;
            if size + pixels < minimum {
                debug!(?sibling, size, pixels, "resize: rejected, sibling would drop below the sane minimum");
                return false;
            }
            index = if target.use_major {
                groups::next_group_index(&self.tree[target.parent], index)
            } else {
                index + 1
            };
        }

        for &sibling in &children {
            let origin = self.tree[sibling].rect.pos(axis);
            let is_before = origin < focused_origin;
            let is_after = origin > focused_origin;
            let pixels = sibling_delta(amount, target.before, target.after, is_before, is_after);
            if is_before {
                self.recursive_resize(sibling, pixels, ResizeEdge::trailing(axis));
            } else if is_after {
                self.recursive_resize(sibling, pixels, ResizeEdge::leading(axis));
            } else {
                // the focused group absorbs the change on both of its edges
                self.recursive_resize(sibling, pixels, ResizeEdge::leading(axis));
                self.recursive_resize(sibling, pixels, ResizeEdge::trailing(axis));
            }
        }
        true
    }

    /// Resize a floating window by `amount`, keeping its center fixed.
    pub(crate) fn resize_floating(&mut self, ctx: ResizeContext, amount: i32, axis: Axis) -> bool {
        let Some(view) = self.focused_floating_window(ctx) else {
            return false;
        };
        let current = self.tree[view].rect.size(axis);
        self.set_size_floating(ctx, current + amount, axis)
    }

    /// Set a floating window's dimension, clamp it to the configured bounds
    /// and recenter around the old position.
    pub(crate) fn set_size_floating(
        &mut self,
        ctx: ResizeContext,
        new_dimension: i32,
        axis: Axis,
    ) -> bool {
        let Some(view) = self.focused_floating_window(ctx) else {
            return false;
        };
        let current = self.tree[view].rect.size(axis);
        self.tree[view].set_desired(axis, new_dimension);
        self.clamp_floating_size(view);

        let container = &mut self.tree[view];
        let clamped = container.desired(axis);
        let position = container.rect.pos(axis) - (clamped - current) / 2;
        container.rect.set_size(axis, clamped);
        container.rect.set_pos(axis, position);
        self.update_geometry(view);
        true
    }

    /// Render the container tree under `root` for debugging.
    pub fn draw_tree(&self, root: NodeId) -> String {
        let tree = self.get_ascii_tree(root);
        let mut out = String::new();
        ascii_tree::write_tree(&mut out, &tree).unwrap();
        out
    }

    fn get_ascii_tree(&self, node: NodeId) -> ascii_tree::Tree {
        let container = &self.tree[node];
        let marker = if container.is_floating { "~ " } else { "" };
        let rect = container.rect;
        let desc = format!(
            "{marker}{node:?} {} {}x{} at ({}, {})",
            container.layout, rect.width, rect.height, rect.x, rect.y
        );
        let children: Vec<_> = self
            .tree
            .children(node)
            .iter()
            .chain(self.tree.floating_windows(node))
            .map(|&child| self.get_ascii_tree(child))
            .collect();
        if children.is_empty() {
            ascii_tree::Tree::Leaf(vec![desc])
        } else {
            ascii_tree::Tree::Node(desc, children)
        }
    }
}

/// Share of `amount` a sibling takes, by its position relative to the
/// focused child: siblings on one side absorb the negated amount split among
/// that side (halved again when both sides exist), same-position siblings
/// take the amount as is.
fn sibling_delta(amount: i32, before: usize, after: usize, is_before: bool, is_after: bool) -> f64 {
    let mut pixels = amount as f64;
    if is_before || is_after {
        pixels = -pixels;
        pixels /= if is_before { before as f64 } else { after as f64 };
        if before != 0 && after != 0 {
            pixels /= 2.0;
        }
    }
    pixels
}

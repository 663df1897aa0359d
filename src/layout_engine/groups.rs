//! Group boundary math for auto layouts.
//!
//! An auto layout arranges a master group and a number of slave groups along
//! its major axis. The slave children are divided into contiguous,
//! order-preserving groups whose sizes differ by at most one, smaller groups
//! first. Every boundary function below derives from this single partition
//! rule, so `group_start_index`, `group_end_index` and `next_group_index`
//! always agree on where a group ends.
//!
//! All indices are absolute child indices; the master group occupies
//! `[0, master_count)` of the child list regardless of which end of the
//! major axis the layout places it on.

use crate::model::tree::Container;

fn master_count(container: &Container) -> usize {
    container.master_count.min(container.children.len())
}

/// Number of children that are not part of the master group.
pub fn slave_count(container: &Container) -> usize {
    container.children.len() - master_count(container)
}

/// Slave partition of one container: `groups` contiguous groups, the first
/// `small` of size `base`, the rest of size `base + 1`.
#[derive(Clone, Copy)]
struct Partition {
    base: usize,
    small: usize,
}

impl Partition {
    fn of(container: &Container) -> Option<Partition> {
        let slaves = slave_count(container);
        if slaves == 0 {
            return None;
        }
        let groups = container.slave_group_count.max(1).min(slaves);
        let base = slaves / groups;
        let remainder = slaves % groups;
        Some(Partition { base, small: groups - remainder })
    }

    /// Group ordinal of a slave ordinal.
    fn group_of(&self, ordinal: usize) -> usize {
        let small_span = self.small * self.base;
        if ordinal < small_span {
            ordinal / self.base
        } else {
            self.small + (ordinal - small_span) / (self.base + 1)
        }
    }

    /// First slave ordinal of a group.
    fn start(&self, group: usize) -> usize {
        if group <= self.small {
            group * self.base
        } else {
            self.small * self.base + (group - self.small) * (self.base + 1)
        }
    }

    /// First slave ordinal after a group.
    fn end(&self, group: usize) -> usize { self.start(group + 1) }
}

/// Combined number of master and slave groups in the container.
pub fn group_count(container: &Container) -> usize {
    let slaves = slave_count(container);
    slaves.min(container.slave_group_count.max(1)) + usize::from(master_count(container) > 0)
}

/// Ordinal of the group containing the `index`th child, counted in
/// major-axis order: the master group comes first for `AutoLeft`/`AutoTop`
/// and last for `AutoRight`/`AutoBottom`.
pub fn group_index(container: &Container, index: usize) -> usize {
    let master_first = container.layout.master_first();
    let master = master_count(container);
    let slaves = slave_count(container);
    if index < master {
        if master_first || slaves == 0 {
            0
        } else {
            slaves.min(container.slave_group_count.max(1))
        }
    } else {
        let Some(partition) = Partition::of(container) else {
            return 0;
        };
        let ordinal = partition.group_of(index - master);
        ordinal + usize::from(master_first && master > 0)
    }
}

/// First child index of the group containing `index`. Master children
/// belong to the master group, which starts at 0.
pub fn group_start_index(container: &Container, index: usize) -> usize {
    let master = master_count(container);
    if !container.layout.is_auto() || index < master {
        return 0;
    }
    match Partition::of(container) {
        Some(partition) => master + partition.start(partition.group_of(index - master)),
        None => 0,
    }
}

/// First child index after the group containing `index`, or the length of
/// the child list when the container has no group semantics.
pub fn group_end_index(container: &Container, index: usize) -> usize {
    if !container.layout.is_auto() {
        return container.children.len();
    }
    let master = master_count(container);
    if index < master {
        return master;
    }
    match Partition::of(container) {
        Some(partition) => master + partition.end(partition.group_of(index - master)),
        None => container.children.len(),
    }
}

/// First child index of the group strictly beyond `after`. Always greater
/// than `after`, which makes it usable to walk a container group by group.
pub fn next_group_index(container: &Container, after: usize) -> usize {
    if !container.layout.is_auto() {
        container.children.len()
    } else if after < master_count(container) {
        master_count(container)
    } else {
        group_end_index(container, after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_engine::LayoutKind;
    use crate::model::tree::NodeId;

    fn auto(layout: LayoutKind, children: usize, master: usize, groups: usize) -> Container {
        Container {
            children: vec![NodeId::default(); children],
            layout,
            master_count: master,
            slave_group_count: groups,
            ..Default::default()
        }
    }

    #[test]
    fn partition_covers_all_slaves_exactly_once() {
        for slaves in 0..=12 {
            for groups in 1..=5 {
                let container = auto(LayoutKind::AutoLeft, slaves, 0, groups);
                let mut sizes = Vec::new();
                let mut i = 0;
                while i < slaves {
                    let end = next_group_index(&container, i);
                    assert!(end > i, "group walk must advance ({slaves} slaves, {groups} groups)");
                    assert_eq!(group_start_index(&container, i), i);
                    assert_eq!(group_end_index(&container, i), end);
                    sizes.push(end - i);
                    i = end;
                }
                assert_eq!(i, slaves);
                assert_eq!(sizes.len(), group_count(&container));
                if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
                    assert!(max - min <= 1, "group sizes may differ by at most one: {sizes:?}");
                }
            }
        }
    }

    #[test]
    fn group_bounds_are_monotonic() {
        for children in 1..=10 {
            for master in 0..=children {
                for groups in 1..=4 {
                    let container = auto(LayoutKind::AutoLeft, children, master, groups);
                    for index in 0..children {
                        let start = group_start_index(&container, index);
                        let end = group_end_index(&container, index);
                        assert!(start <= index && index < end, "{start} <= {index} < {end}");
                    }
                }
            }
        }
    }

    #[test]
    fn five_slaves_in_two_groups_split_two_then_three() {
        // master, then slave groups {1,2} and {3,4,5}
        let container = auto(LayoutKind::AutoLeft, 6, 1, 2);

        assert_eq!(group_count(&container), 3);
        assert_eq!(group_start_index(&container, 0), 0);
        assert_eq!(group_end_index(&container, 0), 1);
        assert_eq!(group_index(&container, 0), 0);

        assert_eq!(group_start_index(&container, 2), 1);
        assert_eq!(group_end_index(&container, 2), 3);
        assert_eq!(group_index(&container, 2), 1);

        assert_eq!(group_start_index(&container, 4), 3);
        assert_eq!(group_end_index(&container, 4), 6);
        assert_eq!(group_index(&container, 4), 2);
    }

    #[test]
    fn next_group_index_agrees_with_group_end() {
        let container = auto(LayoutKind::AutoLeft, 8, 2, 3);
        // slave region is {2..8}: groups of 2, 2, 2
        assert_eq!(next_group_index(&container, 0), 2);
        assert_eq!(next_group_index(&container, 2), group_end_index(&container, 2));
        assert_eq!(next_group_index(&container, 4), group_end_index(&container, 4));
        assert_eq!(next_group_index(&container, 7), 8);
    }

    #[test]
    fn master_group_is_last_for_auto_right() {
        let container = auto(LayoutKind::AutoRight, 6, 1, 2);
        assert_eq!(group_index(&container, 0), 2);
        assert_eq!(group_index(&container, 1), 0);
        assert_eq!(group_index(&container, 5), 1);
    }

    #[test]
    fn masterless_layout_starts_ordinals_at_zero() {
        let container = auto(LayoutKind::AutoLeft, 4, 0, 2);
        assert_eq!(group_count(&container), 2);
        assert_eq!(group_index(&container, 0), 0);
        assert_eq!(group_index(&container, 2), 1);
    }

    #[test]
    fn all_master_children_form_a_single_group() {
        let container = auto(LayoutKind::AutoLeft, 3, 3, 2);
        assert_eq!(group_count(&container), 1);
        assert_eq!(group_index(&container, 1), 0);
        assert_eq!(group_start_index(&container, 1), 0);
        assert_eq!(group_end_index(&container, 1), 3);
        assert_eq!(next_group_index(&container, 0), 3);
    }

    #[test]
    fn more_groups_than_slaves_degrades_to_one_child_each() {
        let container = auto(LayoutKind::AutoLeft, 2, 0, 5);
        assert_eq!(group_count(&container), 2);
        assert_eq!(group_end_index(&container, 0), 1);
        assert_eq!(group_start_index(&container, 1), 1);
    }

    #[test]
    fn non_auto_layouts_have_no_group_boundaries() {
        let container = auto(LayoutKind::Horizontal, 4, 0, 2);
        assert_eq!(group_start_index(&container, 2), 0);
        assert_eq!(group_end_index(&container, 2), 4);
        assert_eq!(next_group_index(&container, 2), 4);
    }
}

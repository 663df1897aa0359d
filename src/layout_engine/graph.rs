use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Axis of a resize request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub fn orientation(self) -> Orientation {
        match self {
            Axis::Width => Orientation::Horizontal,
            Axis::Height => Orientation::Vertical,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }
}

/// Container layout modes. The four `Auto*` variants arrange a master group
/// plus a configurable number of slave groups along a major axis; the
/// `Left`/`Top` variants place the master group first along that axis, the
/// `Right`/`Bottom` variants last.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    Horizontal,
    Vertical,
    Tabbed,
    Stacked,
    AutoLeft,
    AutoRight,
    AutoTop,
    AutoBottom,
}

impl LayoutKind {
    pub fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => LayoutKind::Horizontal,
            Orientation::Vertical => LayoutKind::Vertical,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(
            self,
            LayoutKind::AutoLeft
                | LayoutKind::AutoRight
                | LayoutKind::AutoTop
                | LayoutKind::AutoBottom
        )
    }

    /// Split orientation of a plain split container.
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            LayoutKind::Horizontal => Some(Orientation::Horizontal),
            LayoutKind::Vertical => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// Axis along which an auto layout orders its groups.
    pub fn major_axis(self) -> Option<Axis> {
        match self {
            LayoutKind::AutoLeft | LayoutKind::AutoRight => Some(Axis::Width),
            LayoutKind::AutoTop | LayoutKind::AutoBottom => Some(Axis::Height),
            _ => None,
        }
    }

    /// Whether the master group comes first along the major axis.
    pub fn master_first(self) -> bool { matches!(self, LayoutKind::AutoLeft | LayoutKind::AutoTop) }

    /// Whether a resize along `axis` can be absorbed by this container.
    pub fn absorbs(self, axis: Axis) -> bool {
        match self {
            LayoutKind::Horizontal => axis == Axis::Width,
            LayoutKind::Vertical => axis == Axis::Height,
            LayoutKind::Tabbed | LayoutKind::Stacked => false,
            _ => true,
        }
    }

    /// True when resizing along `axis` moves whole groups of this layout
    /// relative to each other rather than children within one group.
    pub fn resizes_major(self, axis: Axis) -> bool { self.major_axis() == Some(axis) }
}

/// Edge a subtree grows or shrinks from during a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ResizeEdge {
    /// Edge nearest the start of `axis`.
    pub fn leading(axis: Axis) -> ResizeEdge {
        match axis {
            Axis::Width => ResizeEdge::Left,
            Axis::Height => ResizeEdge::Top,
        }
    }

    /// Edge nearest the end of `axis`.
    pub fn trailing(axis: Axis) -> ResizeEdge {
        match axis {
            Axis::Width => ResizeEdge::Right,
            Axis::Height => ResizeEdge::Bottom,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            ResizeEdge::Left | ResizeEdge::Right => Axis::Width,
            ResizeEdge::Top | ResizeEdge::Bottom => Axis::Height,
        }
    }
}

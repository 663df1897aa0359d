pub mod tree;

pub use tree::{Container, LayoutTree, NodeId, Rect};

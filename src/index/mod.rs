//! A packed R-tree with a two-phase build.

mod bbox;
mod strtree;

pub use strtree::{ItemDistance, ItemTree, SmallNodeParams, StrTree, StrTreeBuilder};

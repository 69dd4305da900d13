//! Unions of many geometries.

mod cascaded;
mod overlap;
mod strategy;
mod unary;

pub use cascaded::CascadedPolygonUnion;
pub use overlap::OverlapUnion;
pub use strategy::{ClassicUnion, UnionStrategy};
pub use unary::{UnaryUnionOp, unary_union, unary_union_all};

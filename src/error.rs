use geograph::TopologyError;

/// Errors produced by overlay, relate and union operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The planar graph could not be labelled or assembled consistently.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// Geometry collections are not supported as arguments.
    #[error("{0} arguments cannot be geometry collections")]
    GeometryCollectionUnsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

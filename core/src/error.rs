use thiserror::Error;

/// Errors raised synchronously by graph operations.
///
/// A search that finds nothing is not an error: it is an empty path,
/// `false`, or an infinite distance depending on the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An operation referenced a vertex that was never added to this graph
    /// (or was removed from it).
    #[error("at least one vertex is not in the graph")]
    VertexNotInGraph,

    /// An edge from a vertex to itself was requested.
    #[error("self loops are not allowed")]
    SelfLoop,
}

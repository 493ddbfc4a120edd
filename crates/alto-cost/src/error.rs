use alto_core::{CoreError, CostMode};

/// Errors raised by the cost layer.
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    /// The requested cost type name is not in the resource's advertised
    /// `cost-type-names`.
    #[error("cost type {name} is not supported by resource {uri}")]
    UnsupportedCostType { name: String, uri: String },

    /// Constraints were supplied but the resource does not advertise
    /// `cost-constraints`.
    #[error("resource {uri} does not support cost constraints")]
    ConstraintsUnsupported { uri: String },

    /// A resource advertises a cost type name the catalog does not define.
    #[error("cost type {name} is not in the catalog")]
    UnknownCostType { name: String },

    /// No cost map is loaded for this (mode, metric) combination.
    #[error("no cost map for {mode}/{metric}")]
    NoSuchCostType { mode: CostMode, metric: String },

    /// The source or destination PID has no entry in the cost table.
    #[error("no cost entry for pair ({src}, {dst})")]
    NoSuchPair { src: String, dst: String },

    /// Two loaded cost maps share the same (mode, metric) key.
    #[error("duplicate cost map for {mode}/{metric}")]
    DuplicateCostMap { mode: CostMode, metric: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

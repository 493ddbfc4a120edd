use crate::cost::CostMode;

/// Errors raised while constructing core vocabulary values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid endpoint address: {0}")]
    InvalidAddress(String),

    #[error("invalid CIDR prefix: {0}")]
    InvalidPrefix(String),

    #[error("invalid cost mode: {0}")]
    InvalidCostMode(String),

    #[error("invalid {mode} cost value: {raw}")]
    InvalidCostValue { mode: CostMode, raw: f64 },

    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),

    #[error("duplicate cost type name: {0}")]
    DuplicateCostType(String),
}

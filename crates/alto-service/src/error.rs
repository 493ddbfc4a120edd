use alto_core::{CoreError, CostType};
use alto_cost::CostError;
use alto_directory::DirectoryError;
use alto_map::MapError;

/// Errors surfaced to the transport layer by the service facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no resource with URI {0}")]
    NoSuchResource(String),

    /// The resource does not advertise the requested property type (or the
    /// core cannot compute it).
    #[error("property type {property} is not supported by resource {uri}")]
    UnsupportedPropertyType { property: String, uri: String },

    /// The endpoint cost cross product exceeds the configured limit.
    #[error("endpoint cross product of {pairs} pairs exceeds limit {limit}")]
    TooManyEndpoints { pairs: usize, limit: usize },

    /// A specific map version was requested but only the live snapshot is
    /// retained.
    #[error("requested map version {requested} does not match live version {live}")]
    VersionMismatch { requested: String, live: String },

    /// A cost map was supplied whose (mode, metric) matches no registered
    /// cost type.
    #[error("cost map {cost_type} matches no registered cost type")]
    UncataloguedCostMap { cost_type: CostType },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// A map source was asked for data it does not hold.
    #[error("map source has no network map")]
    MissingNetworkMap,

    /// A collaborator supplying map or catalog data failed.
    #[error("source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
    /// Wrap a collaborator failure.
    pub fn source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        ServiceError::Source(Box::new(err))
    }
}

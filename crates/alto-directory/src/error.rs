use alto_core::CoreError;

/// Errors raised while building a directory. All of these are fatal to
/// snapshot construction; a previously published directory stays live.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// A resource advertises a cost type name the catalog does not define.
    #[error("resource {uri} references unknown cost type {name}")]
    UnknownCostType { name: String, uri: String },

    /// A resource declares a media type that is not a recognized ALTO
    /// resource media type.
    #[error("resource {uri} declares unrecognized media type {media_type}")]
    UnrecognizedMediaType { media_type: String, uri: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

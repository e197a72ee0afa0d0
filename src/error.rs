use thiserror::Error;

/// Top-level error type for the scatterbrush engine.
#[derive(Debug, Error)]
pub enum ScatterError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

/// Errors raised while building a scene to query against.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene input: {0}")]
    InvalidInput(String),

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Convenience type alias for results using [`ScatterError`].
pub type Result<T> = std::result::Result<T, ScatterError>;

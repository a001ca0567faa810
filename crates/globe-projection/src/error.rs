//! Projection construction errors.

/// Errors raised while constructing or configuring a projection.
///
/// Runtime transforms never fail; out-of-domain input is clamped instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// A parameter the projection cannot be built without was not supplied.
    #[error("{projection} projection requires `{parameter}`")]
    MissingParameter {
        projection: &'static str,
        parameter: &'static str,
    },

    /// A parameter was supplied but lies outside its valid range.
    #[error("invalid {parameter}: {value} ({reason})")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A projection or pole name that does not match any known variant.
    #[error("unknown {what} `{name}`")]
    UnknownName { what: &'static str, name: String },
}

//! Configuration errors
//!
//! Everything here is raised while a validator is being built. A validation
//! pass itself never fails: rule failures end up in the `FormResult`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rule names a predicate the library does not have
    #[error("field `{field}` references unknown predicate `{predicate}`")]
    UnknownPredicate { field: String, predicate: String },

    /// A custom pattern did not compile
    #[error("pattern `{name}` is not a valid regular expression")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The model or options document could not be read
    #[error("failed to parse validation config: {0}")]
    Model(#[from] serde_json::Error),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

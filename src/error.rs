use thiserror::Error;

/// Coarse classification of a [`DataAccessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The provider could not hand out (or take back) a usable connection.
    Connection,
    /// Preparing, binding or executing a statement failed.
    Statement,
    /// A row could not be converted into the requested target shape.
    Mapping,
}

/// Every failure surfaced by the template.
///
/// The original driver error, when there is one, stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("Connection error: {message}")]
    ConnectionFailure {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    #[error("SQL execution error: {0}")]
    StatementFailure(#[from] rusqlite::Error),

    #[error("Parameter error: statement has {expected} placeholder(s) but {given} value(s) were supplied")]
    ParameterCount { expected: usize, given: usize },

    #[error("Mapping error: {0}")]
    MappingFailure(#[from] MappingError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Worker error: {0}")]
    WorkerFailure(String),
}

impl DataAccessError {
    pub(crate) fn connection(message: impl Into<String>, source: rusqlite::Error) -> Self {
        DataAccessError::ConnectionFailure {
            message: message.into(),
            source: Some(source),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            DataAccessError::ConnectionFailure { .. } | DataAccessError::ConfigError(_) => {
                FailureKind::Connection
            }
            DataAccessError::StatementFailure(_)
            | DataAccessError::ParameterCount { .. }
            | DataAccessError::WorkerFailure(_) => FailureKind::Statement,
            DataAccessError::MappingFailure(_) => FailureKind::Mapping,
        }
    }

    #[must_use]
    pub fn is_mapping(&self) -> bool {
        self.kind() == FailureKind::Mapping
    }
}

/// A row that could not be turned into a target shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("column `{column}` is not present in the result row")]
    MissingColumn { column: String },

    #[error("column `{column}` holds {found}, which cannot be assigned to a field of type `{expected}`")]
    IncompatibleType {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("column `{column}` holds TEXT that is not valid UTF-8")]
    InvalidText { column: String },
}

/// Failures raised while rendering a view.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON view needs a model with exactly one entry, got {0}")]
    ModelSize(usize),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

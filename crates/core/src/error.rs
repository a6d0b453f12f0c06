/// Domain error shared by every layer of the workspace.
///
/// Storage adapters translate their driver errors into these variants so
/// services and the HTTP layer only ever match on `CoreError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or exists but is not visible to the caller.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A write referenced an entity that does not exist.
    #[error("Invalid reference: {entity} with id {id} does not exist")]
    InvalidReference { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A variant tag outside the closed set of asset kinds.
    #[error("Unsupported asset variant: {0}")]
    UnsupportedVariant(String),

    /// A stored row could not be decoded into a domain value.
    #[error("Corrupt row {id}: {reason}")]
    CorruptRow { id: String, reason: String },

    /// Transient storage failure. Safe to retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Another variant tagged with the service operation that returned it.
    #[error("{operation}: {source}")]
    Context {
        operation: &'static str,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by anything printable.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Tag the error with the operation that produced it. An error that
    /// already names an operation keeps it.
    pub fn with_operation(self, operation: &'static str) -> Self {
        match self {
            Self::Context { .. } => self,
            other => Self::Context {
                operation,
                source: Box::new(other),
            },
        }
    }

    /// The operation this error was tagged with, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Context { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// The underlying variant with any operation tag stripped.
    pub fn root(&self) -> &CoreError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the caller may retry the failed operation as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self.root(), Self::StorageUnavailable(_))
    }
}

/// [`CoreError::with_operation`] lifted onto `Result`.
pub trait OperationContext<T> {
    fn operation(self, operation: &'static str) -> Result<T, CoreError>;
}

impl<T> OperationContext<T> for Result<T, CoreError> {
    fn operation(self, operation: &'static str) -> Result<T, CoreError> {
        self.map_err(|e| e.with_operation(operation))
    }
}

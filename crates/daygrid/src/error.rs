/// Calendar related errors
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("no event with id: {0}")]
    EventNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected mutations that leave the store untouched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("event id already exists: {0}")]
    DuplicateEventId(String),

    #[error("resource id already exists: {0}")]
    DuplicateResourceId(String),

    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

impl Error {
    pub fn duplicate_event(id: impl Into<String>) -> Self {
        Error::Validation(ValidationError::DuplicateEventId(id.into()))
    }

    pub fn duplicate_resource(id: impl Into<String>) -> Self {
        Error::Validation(ValidationError::DuplicateResourceId(id.into()))
    }

    pub fn unknown_resource(id: impl Into<String>) -> Self {
        Error::Validation(ValidationError::UnknownResource(id.into()))
    }

    pub fn event_not_found(id: impl Into<String>) -> Self {
        Error::EventNotFound(id.into())
    }
}

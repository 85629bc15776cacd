use crate::field_map::EntryField;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Could not read source: {0}")]
    SourceRead(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A required field could not be resolved or parsed while building an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Missing key: {field}")]
pub struct MappingError {
    pub field: EntryField,
}

impl MappingError {
    pub fn new(field: EntryField) -> Self {
        Self { field }
    }
}

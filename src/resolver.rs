use crate::directory::StudentDirectory;
use crate::models::StudentRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The caregiver has not picked anyone yet.
    #[error("no student selected")]
    NoSelection,
    #[error("no student with id `{0}`")]
    NotFound(String),
}

/// Exact, case-sensitive lookup of a selector identifier.
pub fn resolve<'a>(
    directory: &'a StudentDirectory,
    identifier: &str,
) -> Result<&'a StudentRecord, ResolveError> {
    if identifier.is_empty() {
        return Err(ResolveError::NoSelection);
    }

    directory
        .list_all()
        .iter()
        .find(|student| student.id == identifier)
        .ok_or_else(|| ResolveError::NotFound(identifier.to_string()))
}

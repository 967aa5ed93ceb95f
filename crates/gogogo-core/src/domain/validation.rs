use std::collections::HashMap;

use crate::domain::{
    entities::{RelativePath, TemplateEntry, TemplateMarker},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Check that no two entries land on the same destination path.
    ///
    /// Directories map to themselves; files map through `marker`.
    pub fn validate_destinations(
        entries: &[TemplateEntry],
        marker: &TemplateMarker,
    ) -> Result<(), DomainError> {
        let mut seen: HashMap<RelativePath, &RelativePath> = HashMap::with_capacity(entries.len());

        for entry in entries {
            let destination = if entry.is_directory() {
                entry.path.clone()
            } else {
                marker.destination_for(&entry.path)
            };

            if let Some(first) = seen.insert(destination.clone(), &entry.path) {
                return Err(DomainError::PathCollision {
                    destination: destination.to_string(),
                    first: first.to_string(),
                    second: entry.path.to_string(),
                });
            }
        }

        Ok(())
    }
}

//! Entry rules and cross-entry trigger collisions.

use std::collections::HashMap;

use crate::bang::BangEntry;
use crate::error::{CatalogError, ValidationError};

/// Check a single entry. The first broken rule is returned.
pub fn validate(entry: &BangEntry) -> Result<(), ValidationError> {
    if entry.trigger.trim().is_empty() {
        return Err(ValidationError::EmptyTrigger);
    }
    if entry.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if entry.domain.trim().is_empty() {
        return Err(ValidationError::EmptyDomain);
    }
    if !entry.url_template.contains("%s") {
        return Err(ValidationError::MissingPlaceholder);
    }
    if let Some(bad) = entry.all_triggers().find(|t| !is_valid_trigger(t)) {
        return Err(ValidationError::InvalidTriggerCharacters(bad.to_string()));
    }
    Ok(())
}

/// One or more ASCII letters or digits.
pub fn is_valid_trigger(trigger: &str) -> bool {
    !trigger.is_empty() && trigger.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Fail if any token of `candidate` (case-folded) is already used by an entry in `existing`.
pub fn collision_check(candidate: &BangEntry, existing: &[BangEntry]) -> Result<(), CatalogError> {
    let taken: HashMap<String, &str> = existing
        .iter()
        .flat_map(|entry| {
            entry
                .all_triggers()
                .map(move |t| (t.to_lowercase(), entry.trigger.as_str()))
        })
        .collect();

    for token in candidate.all_triggers() {
        if let Some(owner) = taken.get(&token.to_lowercase()) {
            return Err(CatalogError::TriggerCollision {
                trigger: token.to_string(),
                existing: owner.to_string(),
            });
        }
    }
    Ok(())
}

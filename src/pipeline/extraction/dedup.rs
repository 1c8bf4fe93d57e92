//! Merge near-duplicate parameters picked up from different lines or pages.
//!
//! Two names are similar when, reduced to lowercase letters, one contains
//! the other. This is a heuristic: short abbreviations can collide, and a
//! name with no letters at all reduces to "" and is similar to everything.
//! Such a record, once accepted, absorbs every later record of the
//! document that has no range, so a stray digits-only line ("2 - 5") can
//! collapse a whole report to one record.

use crate::models::Parameter;

/// Lowercase letters only: "HbA1c (%)" -> "hbac".
fn similarity_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_similar(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Merge similar records in encounter order, then sort by name.
///
/// The first record of a group is kept unless a later one carries a
/// reference range the kept one lacks, in which case the later one
/// replaces it in place.
pub fn deduplicate(parameters: Vec<Parameter>) -> Vec<Parameter> {
    let mut accepted: Vec<(String, Parameter)> = Vec::with_capacity(parameters.len());

    for incoming in parameters {
        let key = similarity_key(&incoming.name);
        match accepted.iter().position(|(k, _)| is_similar(k, &key)) {
            Some(index) => {
                let existing = &accepted[index].1;
                if incoming.has_range() && !existing.has_range() {
                    tracing::debug!(kept = index, "Duplicate with range replaces earlier record");
                    accepted[index] = (key, incoming);
                } else {
                    tracing::debug!(kept = index, "Duplicate dropped");
                }
            }
            None => accepted.push((key, incoming)),
        }
    }

    let mut merged: Vec<Parameter> = accepted.into_iter().map(|(_, p)| p).collect();
    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}

//! Stand-in crops for predictions the fertilizer model has no training data for.
//!
//! The crop model can predict crops that never appear in the fertilizer data set.
//! For those, the fertilizer is recommended for a close relative instead. The
//! table is fixed; it is not derived from the loaded encoders.

use cropforge_schemas::recommendation::CropResolution;

pub const COMPATIBILITY_TABLE: [(&str, &str); 3] = [
    ("rice", "barley"),
    ("paddy", "maize"),
    ("mothbeans", "mungbean"),
];

pub fn substitute_for(crop: &str) -> Option<&'static str> {
    let normalized = crop.trim().to_lowercase();
    COMPATIBILITY_TABLE
        .iter()
        .find(|(from, _)| *from == normalized)
        .map(|(_, to)| *to)
}

/// Resolves a predicted crop to the crop handed to the fertilizer stage.
pub fn resolve(predicted: &str) -> CropResolution {
    let predicted = predicted.trim().to_lowercase();
    match substitute_for(&predicted) {
        Some(substitute) => CropResolution {
            resolved: substitute.to_string(),
            predicted,
            was_substituted: true,
        },
        None => CropResolution {
            resolved: predicted.clone(),
            predicted,
            was_substituted: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rice_becomes_barley() {
        let resolution = resolve("rice");
        assert_eq!(resolution.resolved, "barley");
        assert!(resolution.was_substituted);
    }

    #[test]
    fn lookup_ignores_case() {
        let resolution = resolve("MothBeans");
        assert_eq!(resolution.predicted, "mothbeans");
        assert_eq!(resolution.resolved, "mungbean");
    }

    #[test]
    fn table_entries_always_substitute() {
        for (from, _) in COMPATIBILITY_TABLE {
            let resolution = resolve(from);
            assert!(resolution.was_substituted);
            assert_ne!(resolution.resolved, from);
        }
    }

    #[test]
    fn crops_outside_the_table_pass_through() {
        let resolution = resolve("Cotton");
        assert_eq!(resolution.resolved, "cotton");
        assert!(!resolution.was_substituted);
    }

    #[test]
    fn resolving_a_substitute_is_idempotent() {
        for (_, to) in COMPATIBILITY_TABLE {
            let resolution = resolve(to);
            assert_eq!(resolution.resolved, to);
            assert!(!resolution.was_substituted);
        }
    }
}

//! Name normalization and fuzzy matching.
//!
//! Every lookup in the project tree compares names through [`normalize`]:
//! lower-cased, with whitespace, `_` and `-` removed. Two names match when
//! their normalized forms are equal (exact) or one contains the other
//! (partial).

use serde::{Deserialize, Serialize};

/// Normalize a name for matching.
///
/// Total and idempotent. An empty name normalizes to an empty string.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// How well a candidate name matched a query.
///
/// Ordered so that `Exact > Partial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// One normalized name contains the other.
    Partial,
    /// Normalized names are equal.
    Exact,
}

/// Compare a candidate name against an already normalized query.
///
/// An empty query never matches; otherwise every name would partially
/// match it.
pub fn match_normalized(candidate: &str, normalized_query: &str) -> Option<MatchKind> {
    if normalized_query.is_empty() {
        return None;
    }

    let candidate = normalize(candidate);
    if candidate.is_empty() {
        return None;
    }

    if candidate == normalized_query {
        Some(MatchKind::Exact)
    } else if candidate.contains(normalized_query) || normalized_query.contains(&candidate) {
        Some(MatchKind::Partial)
    } else {
        None
    }
}

/// Compare two raw names.
pub fn match_names(candidate: &str, query: &str) -> Option<MatchKind> {
    match_normalized(candidate, &normalize(query))
}

/// Fill `{modality}` and `{folder}` placeholders in a naming pattern.
pub fn expand_pattern(pattern: &str, modality: &str, folder: &str) -> String {
    pattern
        .replace("{modality}", modality)
        .replace("{folder}", folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_case_and_separators() {
        assert_eq!(normalize("Leg Day"), "legday");
        assert_eq!(normalize("LEG_DAY"), "legday");
        assert_eq!(normalize(" leg-day\t"), "legday");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["MASTER_b3_Cardio_Template", "  A - b _ C ", "ÄBC def", "", "___"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn equal_normalized_names_match_exactly() {
        assert_eq!(match_names("Leg Day", "legday"), Some(MatchKind::Exact));
        assert_eq!(match_names("LEG_DAY", "Leg Day"), Some(MatchKind::Exact));
    }

    #[test]
    fn substring_in_either_direction_is_partial() {
        assert_eq!(
            match_names("MASTER_b3_Cardio_Template", "cardio"),
            Some(MatchKind::Partial)
        );
        assert_eq!(
            match_names("Cardio", "2024 Cardio Blast"),
            Some(MatchKind::Partial)
        );
        assert_eq!(match_names("Strength", "Cardio"), None);
    }

    #[test]
    fn empty_names_never_match() {
        assert_eq!(match_names("anything", ""), None);
        assert_eq!(match_names("", "anything"), None);
        assert_eq!(match_names("__", "--"), None);
    }

    #[test]
    fn exact_ranks_above_partial() {
        assert!(MatchKind::Exact > MatchKind::Partial);
    }

    #[test]
    fn expand_pattern_fills_placeholders() {
        assert_eq!(
            expand_pattern("MASTER_b3_{modality}_Template", "Cardio", "x"),
            "MASTER_b3_Cardio_Template"
        );
        assert_eq!(expand_pattern("{folder} edit", "Flow", "Week 1"), "Week 1 edit");
    }
}

//! Property-based tests for search composition
//!
//! These tests verify:
//! - Identifier-like queries always become an id-prefix predicate
//! - Normalization is idempotent
//! - Merged results never contain duplicates and keep primary order

use orderdesk_core::query::{is_uuid_like, merge_unique, SearchQuery};
use orderdesk_types::TextMatch;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Hex-and-hyphen strings long enough to look like an id
fn arb_id_like() -> impl Strategy<Value = String> {
    "[0-9a-fA-F][0-9a-fA-F-]{7,35}"
}

/// Free text containing at least one letter outside the hex range
fn arb_text_query() -> impl Strategy<Value = String> {
    "[a-z ]{0,10}[g-zG-Z][a-z0-9 ]{0,10}"
}

// ============================================================================
// Predicate Properties
// ============================================================================

proptest! {
    /// Property: identifier-like queries produce an id-prefix predicate
    #[test]
    fn id_like_queries_match_by_prefix(raw in arb_id_like()) {
        let query = SearchQuery::parse(&raw).unwrap();
        prop_assert!(query.is_uuid_like());
        prop_assert_eq!(query.predicate(), TextMatch::IdPrefix(raw.to_lowercase()));
        prop_assert!(!query.wants_full_text(0));
    }

    /// Property: text queries produce a contains predicate
    #[test]
    fn text_queries_match_any_field(raw in arb_text_query()) {
        prop_assume!(!raw.trim().is_empty());
        let query = SearchQuery::parse(&raw).unwrap();
        prop_assert!(!is_uuid_like(query.as_str()));
        let is_contains = matches!(query.predicate(), TextMatch::AnyFieldContains(_));
        prop_assert!(is_contains);
    }

    /// Property: parsing an already normalized query changes nothing
    #[test]
    fn normalization_is_idempotent(raw in "[ -~]{1,40}") {
        if let Ok(query) = SearchQuery::parse(&raw) {
            let again = SearchQuery::parse(query.as_str()).unwrap();
            prop_assert_eq!(query, again);
        }
    }
}

// ============================================================================
// Merge Properties
// ============================================================================

proptest! {
    /// Property: merged results are unique and start with the deduplicated primary list
    #[test]
    fn merge_never_duplicates(
        primary in prop::collection::vec(0u8..50, 0..30),
        supplemental in prop::collection::vec(0u8..50, 0..30),
    ) {
        let merged = merge_unique(primary.clone(), supplemental.clone(), |n| *n);

        let mut seen = std::collections::HashSet::new();
        prop_assert!(merged.iter().all(|n| seen.insert(*n)));

        let mut primary_unique = Vec::new();
        for n in &primary {
            if !primary_unique.contains(n) {
                primary_unique.push(*n);
            }
        }
        prop_assert_eq!(&merged[..primary_unique.len()], &primary_unique[..]);

        for n in primary.iter().chain(&supplemental) {
            prop_assert!(merged.contains(n));
        }
    }
}

//! Property-based tests for nomos-core utilities.
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs.

use proptest::prelude::*;

use crate::naming::normalize_name;
use crate::principal::Principal;

/// Strategy for strings shaped like the identifiers that reach the
/// normalizer: ARNs, export names, role names.
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9:_/. -]{0,60}"
}

proptest! {
    #[test]
    fn normalized_names_are_alphanumeric(name in identifier_strategy()) {
        let normalized = normalize_name(&name);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn normalization_is_idempotent(name in identifier_strategy()) {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once.clone());
    }

    #[test]
    fn normalization_never_grows(name in identifier_strategy()) {
        prop_assert!(normalize_name(&name).len() <= name.len());
    }

    #[test]
    fn numeric_account_ids_pass_through(account in 100_000_000_000_u64..999_999_999_999) {
        let principal = Principal::literal(account.to_string());
        prop_assert_eq!(principal.name_fragment(), account.to_string());
    }
}

//! Property-based tests for part names and composite locators
//!
//! These tests use proptest to generate part names from a conservative
//! alphabet (already in canonical escaped form) and verify the comparison,
//! revalidation, and round-trip invariants hold across a wide range of
//! inputs.

use pack_uri::{PackUri, PartName};
use proptest::prelude::*;
use std::cmp::Ordering;
use url::Url;

// ============================================================================
// Generators
// ============================================================================

/// Generate a single path segment that is already canonically escaped and
/// cannot be mistaken for a navigation segment or a `_rels` segment.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9_-]{0,8}(\\.[A-Za-z0-9]{1,4})?"
}

/// Generate a valid part name string such as `/a/b/c.ext`
fn part_name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..5)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn generated_names_validate(name in part_name_strategy()) {
        let part = PartName::parse(&name).unwrap();
        prop_assert_eq!(part.as_str(), name.as_str());
    }

    #[test]
    fn revalidation_is_idempotent(name in part_name_strategy()) {
        let part = PartName::parse(&name).unwrap();
        let again = PartName::parse(part.as_str()).unwrap();
        prop_assert_eq!(&part, &again);
        prop_assert_eq!(part.normalized(), again.normalized());
    }

    #[test]
    fn comparison_is_antisymmetric(a in part_name_strategy(), b in part_name_strategy()) {
        let a = PartName::parse(&a).unwrap();
        let b = PartName::parse(&b).unwrap();
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&a), Ordering::Equal);
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    }

    #[test]
    fn case_folding_preserves_identity(name in part_name_strategy()) {
        let upper_text = name.to_ascii_uppercase();
        let original = PartName::parse(&name).unwrap();
        let upper = PartName::parse(&upper_text).unwrap();
        prop_assert_eq!(&original, &upper);
        // Each spelling keeps its own text
        prop_assert_eq!(original.as_str(), name.as_str());
        prop_assert_eq!(upper.as_str(), upper_text.as_str());
    }

    #[test]
    fn composite_round_trip(name in part_name_strategy()) {
        let package = Url::parse("https://example.com/box").unwrap();
        let part = PartName::parse(&name).unwrap();
        let locator = PackUri::new(package.clone(), Some(part.clone())).unwrap();
        let parsed = PackUri::parse(&locator.to_uri_string()).unwrap();
        prop_assert_eq!(parsed.package_locator(), &package);
        prop_assert_eq!(parsed.part_name(), Some(&part));
    }

    #[test]
    fn trailing_slash_always_rejected(name in part_name_strategy()) {
        let candidate = format!("{name}/");
        prop_assert!(PartName::try_parse(&candidate).is_none());
    }

    #[test]
    fn navigation_always_rejected(name in part_name_strategy()) {
        let leading = format!("/..{name}");
        prop_assert!(PartName::try_parse(&leading).is_none());
        let embedded = format!("{name}/../x");
        prop_assert!(PartName::try_parse(&embedded).is_none());
    }
}

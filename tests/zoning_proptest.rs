//! Property-based tests for the zoning parser
//!
//! Zoning strings are generated from the city's grammar: optional prefixes, a
//! known zone class, an optional height district and a run of suffix tags
//! drawn from the vocabulary plus some junk.

use laplan::zoning::{self, vocabulary};
use proptest::prelude::*;
use proptest::sample::select;

fn zone_class_strategy() -> impl Strategy<Value = &'static str> {
    select(vocabulary::zone_classes().map(|class| class.code()).collect::<Vec<_>>())
}

fn prefix_strategy() -> impl Strategy<Value = &'static str> {
    select(vec!["", "[Q]", "[T]", "(Q)", "(T)", "Q", "T", "[T][Q]", "(Q)(T)"])
}

fn height_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        ("[1-4]", select(vec!["", "L", "VL", "XL", "SS"]), any::<bool>()).prop_map(
            |(number, limit, d)| format!("-{number}{limit}{}", if d { "D" } else { "" })
        ),
    ]
}

fn tag_codes(table: &'static [vocabulary::TagInfo]) -> Vec<&'static str> {
    table.iter().map(|info| info.code).collect()
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        select(tag_codes(vocabulary::SUPPLEMENTAL_USES)).prop_map(str::to_string),
        select(tag_codes(vocabulary::SPECIFIC_PLANS)).prop_map(str::to_string),
        "[A-Z]{2,5}",
    ]
}

fn zoning_string_strategy() -> impl Strategy<Value = String> {
    (
        prefix_strategy(),
        zone_class_strategy(),
        height_strategy(),
        prop::collection::vec(tag_strategy(), 0..4),
    )
        .prop_map(|(prefix, class, height, tags)| {
            let mut code = format!("{prefix}{class}{height}");
            for tag in tags {
                code.push('-');
                code.push_str(&tag);
            }
            code
        })
}

/// Alphanumeric characters of a string, sorted, for multiset comparison
fn alphanumerics(text: &str) -> Vec<char> {
    let mut chars: Vec<char> = text.chars().filter(char::is_ascii_alphanumeric).collect();
    chars.sort_unstable();
    chars
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn known_zone_classes_always_parse(code in zoning_string_strategy()) {
        let parsed = zoning::parse(&code);
        prop_assert!(parsed.is_ok(), "failed to parse {}", code);
        prop_assert!(!parsed.unwrap().zone_class().code().is_empty());
    }

    #[test]
    fn unknown_first_token_always_fails(
        prefix in prefix_strategy(),
        class in "[A-Z][A-Z0-9]{0,4}",
        rest in "(-[A-Z0-9]{1,4}){0,3}",
    ) {
        prop_assume!(vocabulary::lookup_zone_class(&class).is_none());
        // A leading Q/T would be read as a bare prefix marker.
        prop_assume!(!class.starts_with(['Q', 'T']));
        let code = format!("{prefix}{class}{rest}");
        prop_assert!(zoning::parse(&code).is_err(), "{} should fail", code);
    }

    #[test]
    fn no_characters_are_lost(code in zoning_string_strategy()) {
        let parsed = zoning::parse(&code).unwrap();
        let mut attributed = String::new();
        if parsed.qualified() {
            attributed.push('Q');
        }
        if parsed.tentative() {
            attributed.push('T');
        }
        attributed.push_str(parsed.zone_class().code());
        attributed.push_str(parsed.specific_plan());
        attributed.push_str(&parsed.full_height_district());
        if parsed.development_limit() {
            attributed.push('D');
        }
        for token in parsed.overlay().iter().chain(parsed.unparsed()) {
            attributed.push_str(token);
        }
        prop_assert_eq!(alphanumerics(&attributed), alphanumerics(&code));
    }

    #[test]
    fn overlays_keep_source_order(code in zoning_string_strategy()) {
        let parsed = zoning::parse(&code).unwrap();
        let mut tokens = code.split('-');
        for tag in parsed.overlay() {
            prop_assert!(
                tokens.any(|token| token == tag),
                "{} out of order in {}",
                tag,
                code
            );
        }
    }

    #[test]
    fn parsing_is_deterministic(code in zoning_string_strategy()) {
        prop_assert_eq!(zoning::parse(&code), zoning::parse(&code));
    }
}

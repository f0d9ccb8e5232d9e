//! Tokenizer properties

use proptest::prelude::*;
use targ::args::{normalize_literal, tokenize};
use targ::RawValue;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

proptest! {
    /// Tokens without the `--` prefix are positional, in order.
    #[test]
    fn test_plain_tokens_stay_positional(tokens in prop::collection::vec("[a-zA-Z0-9 .]{1,10}", 0..8)) {
        let args = tokenize(&tokens);
        prop_assert!(args.named.is_empty());
        prop_assert_eq!(args.positional.len(), tokens.len());
        for (raw, token) in args.positional.iter().zip(&tokens) {
            prop_assert_eq!(raw.text(), token.as_str());
        }
    }

    /// `--name=value` keeps everything after the first `=` as the value.
    #[test]
    fn test_named_value_splits_on_first_equals(name in name_strategy(), value in "[a-z0-9=]{0,12}") {
        let token = format!("--{}={}", name, value);
        let args = tokenize(&[token]);
        prop_assert!(args.positional.is_empty());
        let raw = args.named(&name).unwrap();
        prop_assert_eq!(raw.text(), value.as_str());
    }

    /// A bare `--name` always reads as true.
    #[test]
    fn test_bare_flag_is_true(name in name_strategy()) {
        let args = tokenize(&[format!("--{}", name)]);
        prop_assert_eq!(args.named(&name), Some(&RawValue::Switch));
        prop_assert!(args.flag(&name));
    }

    /// Repeated names keep the last value.
    #[test]
    fn test_last_repeated_name_wins(name in name_strategy(), first in "[0-9]{1,4}", last in "[0-9]{1,4}") {
        let tokens = [format!("--{}={}", name, first), format!("--{}={}", name, last)];
        let args = tokenize(&tokens);
        prop_assert_eq!(args.named.len(), 1);
        prop_assert_eq!(args.named(&name).unwrap().text(), last.as_str());
    }

    /// Boolean literals normalise regardless of case; other text is left alone.
    #[test]
    fn test_literal_normalisation(literal in prop::sample::select(vec!["true", "t", "false", "f"]), upper in any::<bool>()) {
        let literal = if upper { literal.to_uppercase() } else { literal.to_string() };
        let expected = literal.to_lowercase().starts_with('t');
        prop_assert_eq!(normalize_literal(&literal).as_bool(), Some(expected));
    }

    #[test]
    fn test_numbers_are_not_booleans(n in any::<i64>()) {
        let text = n.to_string();
        prop_assert_eq!(normalize_literal(&text), RawValue::Text(text.clone()));
    }
}

//! Binding properties

use proptest::prelude::*;
use targ::args::{bind, tokenize, Bound};
use targ::{Command, CommandDescriptor, Registration, RestDocExtractor, TypeTag, Value};

fn add() -> CommandDescriptor {
    CommandDescriptor::build(
        Command::sync("add", |_| Ok(()))
            .param("a", TypeTag::Int)
            .param("b", TypeTag::Int),
        Registration::new(),
        &RestDocExtractor,
    )
    .unwrap()
}

fn store() -> CommandDescriptor {
    CommandDescriptor::build(
        Command::sync("store", |_| Ok(())).untyped("value"),
        Registration::new(),
        &RestDocExtractor,
    )
    .unwrap()
}

proptest! {
    /// Positional and named spellings bind to the same arguments.
    #[test]
    fn test_positional_named_equivalence(a in any::<i64>(), b in any::<i64>()) {
        let add = add();
        let positional = bind(&add, &tokenize(&[a.to_string(), b.to_string()])).unwrap();
        let named = bind(&add, &tokenize(&[format!("--b={}", b), format!("--a={}", a)])).unwrap();
        let mixed = bind(&add, &tokenize(&[format!("--a={}", a), b.to_string()])).unwrap();
        prop_assert_eq!(&positional, &named);
        prop_assert_eq!(&positional, &mixed);
        match positional {
            Bound::Call(args) => {
                prop_assert_eq!(args.value("a"), Some(&Value::Int(a)));
                prop_assert_eq!(args.value("b"), Some(&Value::Int(b)));
            }
            Bound::Help => prop_assert!(false, "unexpected help"),
        }
    }

    /// `--help` wins over any other tokens.
    #[test]
    fn test_help_always_short_circuits(tokens in prop::collection::vec("[a-z0-9]{1,6}", 0..6)) {
        let mut tokens = tokens;
        tokens.push("--help".to_string());
        prop_assert_eq!(bind(&add(), &tokenize(&tokens)).unwrap(), Bound::Help);
    }

    /// Untyped parameters receive the raw text unchanged.
    #[test]
    fn test_untyped_is_raw(raw in "[^-][ -~]{0,20}") {
        let bound = bind(&store(), &tokenize(&[raw.clone()])).unwrap();
        match bound {
            Bound::Call(args) => prop_assert_eq!(args.value("value"), Some(&Value::Str(raw))),
            Bound::Help => prop_assert!(false, "unexpected help"),
        }
    }
}

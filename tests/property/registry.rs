//! Registry properties

use proptest::prelude::*;
use targ::{Command, CommandRegistry, Registration, RegistrationError, RestDocExtractor};

fn noop(name: &str) -> Command {
    Command::sync(name, |_| Ok(()))
}

proptest! {
    /// Any name without whitespace registers and resolves to itself.
    #[test]
    fn test_clean_names_register_and_resolve(name in "[a-zA-Z0-9_.:-]{1,16}", rest in prop::collection::vec("[a-z0-9]{1,5}", 0..4)) {
        let mut registry = CommandRegistry::new();
        registry.register(noop(&name), Registration::new(), &RestDocExtractor).unwrap();

        let mut tokens = vec![name.clone()];
        tokens.extend(rest.iter().cloned());
        let (descriptor, remaining) = registry.resolve(&tokens).unwrap();
        prop_assert_eq!(descriptor.name(), name.as_str());
        prop_assert_eq!(remaining, &rest[..]);
    }

    /// Whitespace anywhere in a name is rejected.
    #[test]
    fn test_whitespace_names_rejected(head in "[a-z]{0,6}", space in prop::sample::select(vec![" ", "\t", "\n"]), tail in "[a-z]{0,6}") {
        let name = format!("{}{}{}", head, space, tail);
        let mut registry = CommandRegistry::new();
        let result = registry.register(noop(&name), Registration::new(), &RestDocExtractor);
        let is_invalid = matches!(result, Err(RegistrationError::InvalidName { .. }));
        prop_assert!(is_invalid);
        prop_assert!(registry.is_empty());
    }

    /// Grouped commands resolve only behind their group.
    #[test]
    fn test_grouped_commands_need_group(group in "[a-z]{1,8}", name in "[a-z]{1,8}") {
        prop_assume!(group != name);
        let mut registry = CommandRegistry::new();
        registry
            .register(noop(&name), Registration::new().group(group.clone()), &RestDocExtractor)
            .unwrap();
        prop_assert!(registry.resolve(&[group.clone(), name.clone()]).is_some());
        prop_assert!(registry.resolve(&[name.clone()]).is_none());
    }

    /// An alias and the name reach the same descriptor.
    #[test]
    fn test_alias_matches_name(name in "[a-z]{3,10}", alias in "[a-z]{1,2}") {
        let mut registry = CommandRegistry::new();
        registry
            .register(noop(&name), Registration::new().alias(alias.clone()), &RestDocExtractor)
            .unwrap();
        let (by_name, _) = registry.resolve(&[name.clone()]).unwrap();
        let (by_alias, _) = registry.resolve(&[alias.clone()]).unwrap();
        prop_assert!(std::ptr::eq(by_name, by_alias));
    }
}

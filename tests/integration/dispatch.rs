//! End-to-end dispatch through `Cli::execute`.

use super::test_utils::{execute, plain_cli, CallLog};
use rust_decimal::Decimal;
use std::str::FromStr;
use targ::{Outcome, Registration, TypeTag, Value};

#[test]
fn test_positional_and_named_calls_are_identical() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(
        log.command("add")
            .param("a", TypeTag::Int)
            .param("b", TypeTag::Int),
    )
    .unwrap();

    let (first, _) = execute(&cli, &["add", "1", "2"]);
    let (second, _) = execute(&cli, &["add", "--a=1", "--b=2"]);
    assert_eq!(first, Outcome::Success { command: "add".to_string() });
    assert_eq!(second, Outcome::Success { command: "add".to_string() });

    let calls = log.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(calls[0].get::<i64>("a").unwrap(), 1);
    assert_eq!(calls[0].get::<i64>("b").unwrap(), 2);
}

#[test]
fn test_boolean_literals_and_bare_flags() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(log.command("print_pi").flag("precise")).unwrap();

    for (token, expected) in [
        ("--precise", true),
        ("--precise=True", true),
        ("--precise=true", true),
        ("--precise=t", true),
        ("--precise=False", false),
        ("--precise=false", false),
        ("--precise=f", false),
    ] {
        let (outcome, _) = execute(&cli, &["print_pi", token]);
        assert!(outcome.is_success(), "{} failed", token);
        assert_eq!(log.last().flag("precise"), expected, "{}", token);
    }

    execute(&cli, &["print_pi"]);
    assert!(!log.last().flag("precise"));
}

#[test]
fn test_defaults_fill_unsupplied_parameters() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(
        log.command("say_hello")
            .param("name", TypeTag::String)
            .param_default("greeting", TypeTag::String, "hello"),
    )
    .unwrap();

    execute(&cli, &["say_hello", "daniel"]);
    let args = log.last();
    assert_eq!(args.get::<String>("name").unwrap(), "daniel");
    assert_eq!(args.get::<String>("greeting").unwrap(), "hello");

    execute(&cli, &["say_hello", "daniel", "--greeting=bonjour"]);
    assert_eq!(log.last().get::<String>("greeting").unwrap(), "bonjour");
}

#[test]
fn test_grouped_command_requires_group() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register_with(
        log.command("create").param("username", TypeTag::String),
        Registration::new().group("user"),
    )
    .unwrap();

    let (outcome, _) = execute(&cli, &["user", "create", "bob"]);
    assert_eq!(outcome, Outcome::Success { command: "user create".to_string() });
    assert_eq!(log.last().get::<String>("username").unwrap(), "bob");

    let (outcome, out) = execute(&cli, &["create", "bob"]);
    assert!(matches!(outcome, Outcome::Unresolved { ref token, .. } if token == "create"));
    assert!(out.starts_with("Unrecognised command - create\n"));
    assert_eq!(log.count(), 1);
}

#[test]
fn test_alias_and_name_reach_the_same_command() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register_with(log.command("test_command"), Registration::new().alias("tc"))
        .unwrap();

    let (by_alias, _) = execute(&cli, &["tc"]);
    let (by_name, _) = execute(&cli, &["test_command"]);
    assert_eq!(by_alias, by_name);
    assert_eq!(log.count(), 2);
}

#[test]
fn test_help_exits_zero_without_running() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(
        log.command("say_hello")
            .doc("Greet someone.\n\n:param name:\n    The person to greet.")
            .param("name", TypeTag::String)
            .param_default("greeting", TypeTag::String, "hello"),
    )
    .unwrap();

    let (outcome, out) = execute(&cli, &["say_hello", "--help"]);
    assert_eq!(outcome, Outcome::Help { command: "say_hello".to_string() });
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(log.count(), 0);
    assert!(out.contains("Greet someone."));
    assert!(out.contains("Usage:\nsay_hello name [--greeting=X]"));
    assert!(out.contains("name       The person to greet."));
    assert!(out.contains("(default=\"hello\")"));

    // Help wins even when the other tokens would not bind.
    let (outcome, _) = execute(&cli, &["say_hello", "--help", "a", "b", "c"]);
    assert!(matches!(outcome, Outcome::Help { .. }));
    assert_eq!(log.count(), 0);
}

#[test]
fn test_untyped_parameter_receives_raw_text() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(log.command("store").untyped("value")).unwrap();

    for raw in ["42", "3.14", "some text", "--not-a-flag"] {
        let token = format!("--value={}", raw);
        execute(&cli, &["store", token.as_str()]);
        assert_eq!(log.last().value("value"), Some(&Value::Str(raw.to_string())));
    }

    execute(&cli, &["store", "True"]);
    assert_eq!(log.last().value("value"), Some(&Value::Str("True".to_string())));
}

#[test]
fn test_numeric_coercion() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(
        log.command("compound_interest")
            .param("interest_rate", TypeTag::Float)
            .param("years", TypeTag::Int)
            .param_default("principal", TypeTag::Decimal, Decimal::from(100)),
    )
    .unwrap();

    execute(&cli, &["compound_interest", "0.05", "2", "--principal=250.75"]);
    let args = log.last();
    assert_eq!(args.get::<f64>("interest_rate").unwrap(), 0.05);
    assert_eq!(args.get::<i64>("years").unwrap(), 2);
    assert_eq!(
        args.get::<Decimal>("principal").unwrap(),
        Decimal::from_str("250.75").unwrap()
    );
}

#[test]
fn test_optional_parameters_accept_none() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(
        log.command("filter")
            .param("verbose", TypeTag::OptionalBool)
            .param("limit", TypeTag::OptionalOther),
    )
    .unwrap();

    let (outcome, _) = execute(&cli, &["filter"]);
    assert!(outcome.is_success());
    let args = log.last();
    assert_eq!(args.get_opt::<bool>("verbose").unwrap(), None);
    assert_eq!(args.get_opt::<String>("limit").unwrap(), None);

    execute(&cli, &["filter", "--verbose=None", "--limit=10"]);
    let args = log.last();
    assert_eq!(args.get_opt::<bool>("verbose").unwrap(), None);
    assert_eq!(args.get_opt::<String>("limit").unwrap(), Some("10".to_string()));

    execute(&cli, &["filter", "--verbose=t"]);
    assert_eq!(log.last().get_opt::<bool>("verbose").unwrap(), Some(true));
}

#[test]
fn test_unknown_named_arguments_are_ignored() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(log.command("echo").param("message", TypeTag::String))
        .unwrap();

    let (outcome, _) = execute(&cli, &["echo", "hi", "--colour=red", "--trace"]);
    assert!(outcome.is_success());
    let args = log.last();
    assert_eq!(args.len(), 1);
    assert_eq!(args.get::<String>("message").unwrap(), "hi");
}

#[test]
fn test_listing_and_unresolved() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(log.command("echo").doc("Echo back the message."))
        .unwrap();

    let (outcome, listing) = execute(&cli, &[]);
    assert_eq!(outcome, Outcome::Listing);
    assert!(listing.starts_with(
        "Test CLI\nEnter the name of a command followed by --help to learn more.\n"
    ));
    assert!(listing.contains("Echo back the message."));

    let (outcome, out) = execute(&cli, &["ehco"]);
    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(out, format!("Unrecognised command - ehco\n{}", listing));
    assert_eq!(log.count(), 0);
}

#[test]
fn test_async_command_is_driven_to_completion() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let finished = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&finished);
    let mut cli = plain_cli();
    cli.register(
        targ::Command::asynchronous("fetch", move |args: targ::BoundArgs| {
            let flag = Arc::clone(&flag);
            async move {
                let url: String = args.get("url")?;
                tokio::task::yield_now().await;
                anyhow::ensure!(url.starts_with("https://"), "Insecure url {}", url);
                flag.store(true, Ordering::SeqCst);
                Ok::<(), anyhow::Error>(())
            }
        })
        .param("url", TypeTag::String),
    )
    .unwrap();

    let (outcome, _) = execute(&cli, &["fetch", "https://example.org"]);
    assert!(outcome.is_success());
    assert!(finished.load(Ordering::SeqCst));

    let (outcome, out) = execute(&cli, &["fetch", "http://example.org"]);
    assert_eq!(outcome.exit_code(), 1);
    assert!(out.contains("Insecure url http://example.org"));
}

#[test]
fn test_solo_program_takes_arguments_directly() {
    let log = CallLog::new();
    let mut cli = plain_cli();
    cli.register(
        log.command("greet")
            .param("name", TypeTag::String)
            .param_default("greeting", TypeTag::String, "hello"),
    )
    .unwrap();

    let mut out = Vec::new();
    let outcome = cli
        .execute_solo(&["ada", "--greeting=bonjour"], &mut out)
        .unwrap();
    assert!(outcome.is_success());
    let args = log.last();
    assert_eq!(args.get::<String>("name").unwrap(), "ada");
    assert_eq!(args.get::<String>("greeting").unwrap(), "bonjour");

    // The command name is just another positional value in solo mode.
    let mut out = Vec::new();
    let outcome = cli.execute_solo(&["greet", "ada"], &mut out).unwrap();
    assert!(outcome.is_success());
    assert_eq!(log.last().get::<String>("name").unwrap(), "greet");
    assert_eq!(log.last().get::<String>("greeting").unwrap(), "ada");
}

//! Targ demo binary
//!
//! A small command-line application assembled from plain functions. Run it without
//! arguments for the command listing, or `targ-demo say_hello --help` for one command.

use anyhow::Context;
use rust_decimal::Decimal;
use std::process;
use std::time::Duration;
use targ::config::ConfigLoader;
use targ::logging::init_logging;
use targ::{BoundArgs, Cli, CliSettings, Command, Registration, RegistrationError, TypeTag};
use tracing::{error, info};

fn main() {
    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let cli = match build_cli(&config.cli) {
        Ok(cli) => cli,
        Err(e) => {
            error!("Failed to register commands: {}", e);
            eprintln!("Failed to register commands: {}", e);
            process::exit(1);
        }
    };

    info!(commands = cli.registry().len(), "Targ demo starting");
    process::exit(cli.run());
}

fn build_cli(settings: &CliSettings) -> Result<Cli, RegistrationError> {
    let mut cli = Cli::from_settings(settings);

    cli.register(
        Command::sync("echo", |args| {
            let message: String = args.get("message")?;
            println!("{}", message);
            Ok(())
        })
        .doc("Echo back the message.\n\n:param message:\n    What will be printed out.")
        .param("message", TypeTag::String),
    )?;

    cli.register(
        Command::sync("add", |args| {
            let a: i64 = args.get("a")?;
            let b: i64 = args.get("b")?;
            let sum = a.checked_add(b).context("The sum does not fit in 64 bits")?;
            println!("{}", sum);
            Ok(())
        })
        .doc("Add the two numbers.\n\n:param a:\n    The first number.\n:param b:\n    The second number.")
        .param("a", TypeTag::Int)
        .param("b", TypeTag::Int),
    )?;

    cli.register(
        Command::sync("divide", |args| {
            let a: i64 = args.get("a")?;
            let b: i64 = args.get("b")?;
            println!("{}", a / b);
            Ok(())
        })
        .doc("Integer division.\n\n:param a:\n    The dividend.\n:param b:\n    The divisor.")
        .param("a", TypeTag::Int)
        .param("b", TypeTag::Int),
    )?;

    cli.register(
        Command::sync("say_hello", |args| {
            let name: String = args.get("name")?;
            let greeting: String = args.get("greeting")?;
            println!("{} {}", greeting, name);
            Ok(())
        })
        .doc(
            "Greet someone.\n\n\
             Example usage on the command line:\n\n\
             say_hello daniel --greeting='bonjour'\n\n\
             :param name:\n    The person to greet.\n\
             :param greeting:\n    What to say to the person.",
        )
        .param("name", TypeTag::String)
        .param_default("greeting", TypeTag::String, "hello"),
    )?;

    cli.register(
        Command::sync("print_pi", |args| {
            if args.flag("precise") {
                println!("3.14159265");
            } else {
                println!("3.14");
            }
            Ok(())
        })
        .doc("Print out the digits of Pi.\n\n:param precise:\n    If set, then more digits are printed out.")
        .flag("precise"),
    )?;

    cli.register(
        Command::sync("compound_interest", |args| {
            let rate: f64 = args.get("interest_rate")?;
            let years: i64 = args.get("years")?;
            let years = i32::try_from(years).context("Too many years to compound")?;
            println!("{}", (rate + 1.0).powi(years) - 1.0);
            Ok(())
        })
        .doc(
            "Work out the compound interest over the given number of years.\n\n\
             :param interest_rate:\n    The annual interest rate e.g. 0.05\n\
             :param years:\n    The number of years over which to compound.",
        )
        .param("interest_rate", TypeTag::Float)
        .param("years", TypeTag::Int),
    )?;

    cli.register_with(
        Command::sync("create_user", |args| {
            let username: String = args.get("username")?;
            let role = if args.flag("admin") { "admin" } else { "user" };
            println!("Created {} '{}'", role, username);
            Ok(())
        })
        .doc("Create a user account.\n\n:param username:\n    Login name.\n:param admin:\n    Grant administrator rights.")
        .param("username", TypeTag::String)
        .flag("admin"),
        Registration::new().group("user").name("create"),
    )?;

    cli.register_with(
        Command::sync("to_celsius", |args| {
            let fahrenheit: Decimal = args.get("fahrenheit")?;
            let celsius = (fahrenheit - Decimal::from(32)) * Decimal::from(5) / Decimal::from(9);
            println!("{}", celsius.round_dp(2).normalize());
            Ok(())
        })
        .doc("Convert a Fahrenheit temperature to Celsius.\n\n:param fahrenheit:\n    Degrees Fahrenheit.")
        .param("fahrenheit", TypeTag::Decimal),
        Registration::new().alias("tc"),
    )?;

    cli.register(
        Command::asynchronous("wait", |args: BoundArgs| async move {
            let ms: i64 = args.get("ms")?;
            let ms = u64::try_from(ms).context("Cannot wait a negative duration")?;
            tokio::time::sleep(Duration::from_millis(ms)).await;
            println!("Waited {}ms", ms);
            Ok::<(), anyhow::Error>(())
        })
        .doc("Sleep for a while, then report.\n\n:param ms:\n    Milliseconds to wait.")
        .param_default("ms", TypeTag::Int, 100i64),
    )?;

    cli.register(
        Command::sync("read_file", |args| {
            let path: String = args.get("path")?;
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Could not read '{}'", path))?;
            print!("{}", contents);
            Ok(())
        })
        .doc("Print a file's contents.\n\n:param path:\n    File to read.")
        .param("path", TypeTag::String),
    )?;

    Ok(cli)
}

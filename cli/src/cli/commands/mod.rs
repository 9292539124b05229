use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use portal_core::config::{BASE_URL_ENV, TIMEOUT_ENV};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_TIMEOUT: &str = "timeout";

pub const CMD_SCOPES: &str = "scopes";
pub const CMD_ACCEPT: &str = "accept";
pub const CMD_REJECT: &str = "reject";
pub const CMD_STATE: &str = "state";
pub const CMD_PREFERENCES: &str = "preferences";

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("portal")
        .about("Authentication portal client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_BASE_URL)
                .short('u')
                .long("base-url")
                .help("Portal base URL, example: https://auth.example.com")
                .env(BASE_URL_ENV)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds")
                .env(TIMEOUT_ENV)
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PORTAL_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(Command::new(CMD_SCOPES).about("Show the pending consent request"))
        .subcommand(
            Command::new(CMD_ACCEPT).about("Accept the pending consent and print the redirect URI"),
        )
        .subcommand(
            Command::new(CMD_REJECT).about("Reject the pending consent and print the redirect URI"),
        )
        .subcommand(Command::new(CMD_STATE).about("Show the session state"))
        .subcommand(
            Command::new(CMD_PREFERENCES).about("Show the user's second factor preferences"),
        )
}

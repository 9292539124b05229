use crate::cli::actions::Action;
use crate::cli::commands::{
    ARG_BASE_URL, ARG_TIMEOUT, CMD_ACCEPT, CMD_PREFERENCES, CMD_REJECT, CMD_SCOPES, CMD_STATE,
};
use crate::cli::globals::GlobalArgs;
use anyhow::{anyhow, Result};
use portal_core::ConfigOverrides;

/// Map validated CLI matches to an action and the settings it runs with.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let globals = GlobalArgs::new(ConfigOverrides {
        base_url: matches.get_one::<String>(ARG_BASE_URL).cloned(),
        timeout_secs: matches.get_one::<u64>(ARG_TIMEOUT).copied(),
    });

    let action = match matches.subcommand_name() {
        Some(CMD_SCOPES) => Action::Scopes,
        Some(CMD_ACCEPT) => Action::Accept,
        Some(CMD_REJECT) => Action::Reject,
        Some(CMD_STATE) => Action::State,
        Some(CMD_PREFERENCES) => Action::Preferences,
        Some(other) => return Err(anyhow!("unknown command: {other}")),
        None => return Err(anyhow!("missing command")),
    };

    Ok((action, globals))
}

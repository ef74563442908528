//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod poe;
pub mod uplinks;
pub mod vlans;

use aoss_core::SwitchConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a switch-bound command to the appropriate handler.
///
/// Each handler runs its work inside one `Switch::oneshot` session.
pub async fn dispatch(
    cmd: Command,
    config: SwitchConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Vlans(args) => vlans::handle(config, args, global).await,
        Command::Uplinks(args) => uplinks::handle(config, args, global).await,
        Command::Poe(args) => poe::handle(config, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions run without a switch session".into(),
        )),
    }
}

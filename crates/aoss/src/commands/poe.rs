//! PoE command handlers.

use serde::Serialize;

use aoss_core::poe::{apply_poe_action, get_poe_enabled};
use aoss_core::{PoeAction, PoeChange, Switch, SwitchConfig};

use crate::cli::{GlobalOpts, PoeActionArg, PoeArgs, PoeCommand};
use crate::error::CliError;
use crate::output;

impl From<PoeActionArg> for PoeAction {
    fn from(arg: PoeActionArg) -> Self {
        match arg {
            PoeActionArg::On => PoeAction::On,
            PoeActionArg::Off => PoeAction::Off,
            PoeActionArg::Toggle => PoeAction::Toggle,
        }
    }
}

#[derive(Debug, Serialize)]
struct PoeState {
    port: String,
    enabled: bool,
}

fn change_detail(change: &PoeChange, color: bool) -> String {
    let now = output::on_off(change.enabled, color);
    match change.previous {
        Some(previous) => format!(
            "Port {}: PoE {now} (was {})",
            change.port,
            output::on_off(previous, color)
        ),
        None => format!("Port {}: PoE {now}", change.port),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: SwitchConfig,
    args: PoeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        PoeCommand::Get { port } => {
            let state = Switch::oneshot(config, |switch| async move {
                get_poe_enabled(switch.session(), &port)
                    .await
                    .map(|enabled| PoeState {
                        port: port.clone(),
                        enabled,
                    })
            })
            .await?;
            let out = output::render_single(
                &global.output,
                &state,
                |s| format!("Port {}: PoE {}", s.port, output::on_off(s.enabled, color)),
                |s| s.enabled.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PoeCommand::Set { port, action } => {
            let change = Switch::oneshot(config, |switch| async move {
                apply_poe_action(switch.session(), &port, action.into()).await
            })
            .await?;
            let out = output::render_single(
                &global.output,
                &change,
                |c| change_detail(c, color),
                |c| c.enabled.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

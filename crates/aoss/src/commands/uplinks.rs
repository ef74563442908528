//! Uplink command handlers.

use serde::Serialize;
use tabled::Tabled;

use aoss_core::uplink::{find_uplinks, tag_uplinks};
use aoss_core::{Switch, SwitchConfig, UplinkPort};

use crate::cli::{GlobalOpts, UplinksArgs, UplinksCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UplinkRow {
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Tagged VLANs")]
    tagged_vlans: usize,
}

impl From<&UplinkPort> for UplinkRow {
    fn from(u: &UplinkPort) -> Self {
        Self {
            port: u.port_id.clone(),
            tagged_vlans: u.tagged_vlans,
        }
    }
}

/// Ports a VLAN was (or would be) tagged onto.
#[derive(Debug, Serialize)]
struct TagReport {
    vlan_id: u16,
    ports: Vec<String>,
    dry_run: bool,
}

fn report_detail(r: &TagReport) -> String {
    if r.ports.is_empty() {
        return format!("No uplink ports found; VLAN {} not tagged anywhere", r.vlan_id);
    }
    let verb = if r.dry_run { "Would tag" } else { "Tagged" };
    format!("{verb} VLAN {} onto: {}", r.vlan_id, r.ports.join(", "))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: SwitchConfig,
    args: UplinksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UplinksCommand::List => {
            let uplinks = Switch::oneshot(config, |switch| async move {
                find_uplinks(switch.session()).await
            })
            .await?;
            let out = output::render_list(
                &global.output,
                &uplinks,
                |u| UplinkRow::from(u),
                |u| u.port_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UplinksCommand::Tag { vlan, dry_run } => {
            let ports = Switch::oneshot(config, |switch| async move {
                if dry_run {
                    find_uplinks(switch.session())
                        .await
                        .map(|uplinks| uplinks.into_iter().map(|u| u.port_id).collect())
                } else {
                    tag_uplinks(switch.session(), vlan).await
                }
            })
            .await?;
            let report = TagReport {
                vlan_id: vlan,
                ports,
                dry_run,
            };
            let out = output::render_single(&global.output, &report, report_detail, |r| {
                r.ports.join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

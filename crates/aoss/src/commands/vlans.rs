//! VLAN command handlers.

use tabled::Tabled;

use aoss_core::provision::{Provisioned, provision_vlan};
use aoss_core::{Switch, SwitchConfig, Vlan, vlan};

use crate::cli::{GlobalOpts, VlansArgs, VlansCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "ID")]
    id: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Vlan> for VlanRow {
    fn from(v: &Vlan) -> Self {
        Self {
            id: v.vlan_id,
            name: v.name.clone(),
            status: v.status.clone().unwrap_or_default(),
        }
    }
}

fn provisioned_detail(p: &Provisioned) -> String {
    let mut out = if p.name.is_empty() {
        format!("Created VLAN {}", p.vlan_id)
    } else {
        format!("Created VLAN {} '{}'", p.vlan_id, p.name)
    };
    match p.tagged_ports.as_deref() {
        Some([]) => out.push_str("\nNo uplink ports found; nothing tagged"),
        Some(ports) => {
            out.push_str("\nTagged onto uplinks: ");
            out.push_str(&ports.join(", "));
        }
        None => {}
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: SwitchConfig,
    args: VlansArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VlansCommand::List => {
            let vlans = Switch::oneshot(config, |switch| async move {
                vlan::list_vlans(switch.session()).await
            })
            .await?;
            let out = output::render_list(
                &global.output,
                &vlans,
                |v| VlanRow::from(v),
                |v| v.vlan_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VlansCommand::Create {
            id,
            name,
            tag_uplinks,
        } => {
            let provisioned = Switch::oneshot(config, |switch| async move {
                provision_vlan(switch.session(), id, &name, tag_uplinks).await
            })
            .await?;
            let out = output::render_single(
                &global.output,
                &provisioned,
                provisioned_detail,
                |p| p.vlan_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

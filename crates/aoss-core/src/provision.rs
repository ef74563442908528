// ── VLAN provisioning ──
//
// Allocate a VLAN, then optionally tag it onto every uplink. The two steps
// run in order against one session; a failed allocation means no tagging
// request is ever issued.

use aoss_api::SwitchSession;
use serde::Serialize;
use tracing::info;

use crate::error::CoreError;
use crate::uplink::tag_uplinks;
use crate::vlan::allocate_vlan;

/// Result of a successful provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provisioned {
    pub vlan_id: u16,
    pub name: String,
    /// Uplinks the VLAN was tagged onto; `None` when tagging was not asked for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagged_ports: Option<Vec<String>>,
}

/// Create a VLAN (`requested == 0` picks the lowest free ID) and, when
/// `tag` is set, tag it onto every uplink.
pub async fn provision_vlan(
    session: &SwitchSession,
    requested: u16,
    name: &str,
    tag: bool,
) -> Result<Provisioned, CoreError> {
    let vlan_id = allocate_vlan(session, requested, name).await?;

    let tagged_ports = if tag {
        let ports = tag_uplinks(session, vlan_id).await?;
        info!(vlan_id, uplinks = ports.len(), "VLAN tagged onto uplinks");
        Some(ports)
    } else {
        None
    };

    Ok(Provisioned {
        vlan_id,
        name: name.to_owned(),
        tagged_ports,
    })
}

// Typed endpoint helpers
//
// Thin wrappers over `SwitchSession::call` for the VLAN, port-VLAN and PoE
// resources. Each one enforces the exact success status the switch
// documents for that endpoint and returns `Error::UnexpectedStatus`
// otherwise.

use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::error::Error;
use crate::models::{
    NewVlan, PoeSettings, PoeUpdate, Vlan, VlanCollection, VlanPort, VlanPortCollection,
};
use crate::session::SwitchSession;

pub const VLANS_PATH: &str = "/vlans";
pub const VLANS_PORTS_PATH: &str = "/vlans-ports";

/// `/ports/{port}/poe`, with the port ID encoded as one path segment
/// (stacked switches name ports `1/A1`).
pub fn poe_path(port: &str) -> String {
    let mut segment = String::with_capacity(port.len());
    for c in port.chars() {
        match c {
            '%' => segment.push_str("%25"),
            '/' => segment.push_str("%2F"),
            '?' => segment.push_str("%3F"),
            '#' => segment.push_str("%23"),
            ' ' => segment.push_str("%20"),
            c => segment.push(c),
        }
    }
    format!("/ports/{segment}/poe")
}

impl SwitchSession {
    // ── VLANs ────────────────────────────────────────────────────────

    /// List all VLANs configured on the switch.
    pub async fn list_vlans(&self) -> Result<Vec<Vlan>, Error> {
        let collection: VlanCollection = self.get_json(VLANS_PATH, StatusCode::OK).await?;
        debug!(count = collection.vlan_element.len(), "fetched VLAN table");
        Ok(collection.vlan_element)
    }

    /// Create a VLAN. The switch rejects duplicate IDs and names.
    pub async fn create_vlan(&self, vlan_id: u16, name: &str) -> Result<(), Error> {
        let body = serde_json::to_value(NewVlan { vlan_id, name })?;
        self.call(Method::POST, VLANS_PATH, Some(&body))
            .await?
            .require(StatusCode::CREATED)?;
        Ok(())
    }

    // ── Port-VLAN membership ─────────────────────────────────────────

    /// List every port-VLAN membership row.
    pub async fn list_vlan_ports(&self) -> Result<Vec<VlanPort>, Error> {
        let collection: VlanPortCollection =
            self.get_json(VLANS_PORTS_PATH, StatusCode::OK).await?;
        debug!(
            count = collection.vlan_port_element.len(),
            "fetched port-VLAN membership"
        );
        Ok(collection.vlan_port_element)
    }

    /// Add a port to a VLAN with the given mode.
    pub async fn create_vlan_port(&self, membership: &VlanPort) -> Result<(), Error> {
        let body = serde_json::to_value(membership)?;
        self.call(Method::POST, VLANS_PORTS_PATH, Some(&body))
            .await?
            .require(StatusCode::CREATED)?;
        Ok(())
    }

    // ── PoE ──────────────────────────────────────────────────────────

    /// Read the PoE settings of a port.
    pub async fn get_poe(&self, port: &str) -> Result<PoeSettings, Error> {
        self.get_json(&poe_path(port), StatusCode::OK).await
    }

    /// Enable or disable PoE on a port.
    pub async fn set_poe(&self, port: &str, enabled: bool) -> Result<(), Error> {
        let body = serde_json::to_value(PoeUpdate {
            is_poe_enabled: enabled,
        })?;
        self.call(Method::PUT, &poe_path(port), Some(&body))
            .await?
            .require(StatusCode::OK)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poe_path_keeps_plain_ports() {
        assert_eq!(poe_path("A1"), "/ports/A1/poe");
        assert_eq!(poe_path("24"), "/ports/24/poe");
    }

    #[test]
    fn poe_path_encodes_stacked_ports() {
        assert_eq!(poe_path("1/A1"), "/ports/1%2FA1/poe");
    }
}

// Wire types for the AOS-S REST API (schema v6 and later).
//
// Collections arrive as `{ "collection_result": {...}, "<kind>_element": [...] }`.
// Only the fields the tooling reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /login-sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginSession {
    /// Session cookie, e.g. `sessionId=AbCd...`.
    pub cookie: String,
    #[serde(default)]
    pub uri: Option<String>,
}

/// A single VLAN from `GET /vlans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vlan {
    pub vlan_id: u16,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vlan_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VlanCollection {
    #[serde(default)]
    pub vlan_element: Vec<Vlan>,
}

/// Request body for `POST /vlans`.
#[derive(Debug, Clone, Serialize)]
pub struct NewVlan<'a> {
    pub vlan_id: u16,
    pub name: &'a str,
}

/// Membership mode of a port in a VLAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortMode {
    #[serde(rename = "POM_UNTAGGED")]
    Untagged,
    #[serde(rename = "POM_TAGGED_STATIC")]
    TaggedStatic,
    #[serde(rename = "POM_TAGGED_DYNAMIC")]
    TaggedDynamic,
    #[serde(rename = "POM_FORBIDDEN")]
    Forbidden,
    /// Any mode this client does not know about.
    #[serde(other)]
    Other,
}

/// A port-VLAN membership row from `GET /vlans-ports`; also the request
/// body for `POST /vlans-ports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanPort {
    pub vlan_id: u16,
    pub port_id: String,
    pub port_mode: PortMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VlanPortCollection {
    #[serde(default)]
    pub vlan_port_element: Vec<VlanPort>,
}

/// PoE settings of a port, `GET /ports/{port}/poe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_id: Option<String>,
    pub is_poe_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poe_priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poe_allocation_method: Option<String>,
}

/// Request body for `PUT /ports/{port}/poe`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PoeUpdate {
    pub is_poe_enabled: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn vlan_port_modes_parse_including_unknown() {
        let body = json!({
            "collection_result": { "total_elements_count": 3 },
            "vlan_port_element": [
                { "vlan_id": 1, "port_id": "1", "port_mode": "POM_UNTAGGED" },
                { "vlan_id": 10, "port_id": "A1", "port_mode": "POM_TAGGED_STATIC" },
                { "vlan_id": 20, "port_id": "A1", "port_mode": "POM_SOMETHING_NEW" }
            ]
        });
        let parsed: VlanPortCollection =
            serde_json::from_value(body).expect("membership collection parses");
        let modes: Vec<PortMode> = parsed
            .vlan_port_element
            .iter()
            .map(|p| p.port_mode)
            .collect();
        assert_eq!(
            modes,
            vec![PortMode::Untagged, PortMode::TaggedStatic, PortMode::Other]
        );
    }

    #[test]
    fn tagged_membership_serializes_wire_names() {
        let row = VlanPort {
            vlan_id: 42,
            port_id: "A2".into(),
            port_mode: PortMode::TaggedStatic,
        };
        assert_eq!(
            serde_json::to_value(&row).expect("serializes"),
            json!({ "vlan_id": 42, "port_id": "A2", "port_mode": "POM_TAGGED_STATIC" })
        );
    }

    #[test]
    fn vlan_collection_tolerates_missing_names() {
        let parsed: VlanCollection = serde_json::from_value(json!({
            "vlan_element": [
                { "vlan_id": 1, "name": "DEFAULT_VLAN", "type": "VT_STATIC" },
                { "vlan_id": 5 }
            ]
        }))
        .expect("vlan collection parses");
        assert_eq!(parsed.vlan_element.len(), 2);
        assert_eq!(parsed.vlan_element[0].vlan_type.as_deref(), Some("VT_STATIC"));
        assert_eq!(parsed.vlan_element[1].name, "");
    }
}

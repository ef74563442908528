// ── Uplink detection and tagging ──
//
// A port that already carries more than one statically tagged VLAN is
// treated as an uplink (trunk / inter-switch link). A port with a single
// tagged VLAN is an access port with e.g. a phone behind it and is left
// alone.

use std::cmp::Ordering;
use std::collections::HashMap;

use aoss_api::{PortMode, SwitchSession, VlanPort};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{CoreError, describe, rejected};
use crate::vlan::{VLAN_ID_MAX, VLAN_ID_MIN};

/// A detected uplink and how many static tags it carried at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UplinkPort {
    pub port_id: String,
    pub tagged_vlans: usize,
}

/// Number of statically tagged VLANs per port.
pub fn tag_counts(memberships: &[VlanPort]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in memberships
        .iter()
        .filter(|row| row.port_mode == PortMode::TaggedStatic)
    {
        *counts.entry(row.port_id.as_str()).or_default() += 1;
    }
    counts
}

/// Ports with more than one static tag, in natural port order.
pub fn uplink_ports(memberships: &[VlanPort]) -> Vec<UplinkPort> {
    let mut uplinks: Vec<UplinkPort> = tag_counts(memberships)
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(port_id, tagged_vlans)| UplinkPort {
            port_id: port_id.to_owned(),
            tagged_vlans,
        })
        .collect();
    uplinks.sort_by(|a, b| compare_ports(&a.port_id, &b.port_id));
    uplinks
}

/// Natural ordering for switch port names: digit runs compare numerically,
/// numbers sort before letters. `2 < 10 < A1 < A2 < A10 < B1`.
pub fn compare_ports(a: &str, b: &str) -> Ordering {
    let mut left = PortChunks { rest: a };
    let mut right = PortChunks { rest: b };
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk<'a> {
    Number(u64),
    Text(&'a str),
}

struct PortChunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for PortChunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        if digits {
            Some(head.parse().map_or(Chunk::Text(head), Chunk::Number))
        } else {
            Some(Chunk::Text(head))
        }
    }
}

/// Detect uplinks from a fresh membership snapshot without changing anything.
pub async fn find_uplinks(session: &SwitchSession) -> Result<Vec<UplinkPort>, CoreError> {
    let memberships = session.list_vlan_ports().await?;
    Ok(uplink_ports(&memberships))
}

/// Tag `vlan_id` onto every uplink and return the tagged ports in natural
/// port order.
///
/// Fail-fast: the first rejected POST aborts the run. Ports tagged before
/// the failure keep the VLAN (no rollback) and are listed in the error's
/// `tagged` field.
pub async fn tag_uplinks(session: &SwitchSession, vlan_id: u16) -> Result<Vec<String>, CoreError> {
    if !(VLAN_ID_MIN..=VLAN_ID_MAX).contains(&vlan_id) {
        return Err(CoreError::ValidationFailed {
            message: format!("VLAN ID {vlan_id} is outside {VLAN_ID_MIN}..={VLAN_ID_MAX}"),
        });
    }

    let memberships = session.list_vlan_ports().await.map_err(|e| {
        rejected(e, |message| CoreError::Tagging {
            vlan_id,
            port: None,
            message: format!("could not read port-VLAN membership: {message}"),
            tagged: Vec::new(),
        })
    })?;

    let uplinks = uplink_ports(&memberships);
    debug!(vlan_id, uplinks = uplinks.len(), "detected uplinks");

    let mut tagged = Vec::with_capacity(uplinks.len());
    for uplink in uplinks {
        let membership = VlanPort {
            vlan_id,
            port_id: uplink.port_id,
            port_mode: PortMode::TaggedStatic,
        };
        if let Err(e) = session.create_vlan_port(&membership).await {
            warn!(
                vlan_id,
                port = %membership.port_id,
                already_tagged = ?tagged,
                "tagging aborted, earlier ports keep the VLAN"
            );
            return Err(CoreError::Tagging {
                vlan_id,
                port: Some(membership.port_id),
                message: describe(&e),
                tagged,
            });
        }
        info!(vlan_id, port = %membership.port_id, "tagged VLAN onto uplink");
        tagged.push(membership.port_id);
    }

    Ok(tagged)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(port: &str, vlan: u16, mode: PortMode) -> VlanPort {
        VlanPort {
            vlan_id: vlan,
            port_id: port.into(),
            port_mode: mode,
        }
    }

    fn ids(uplinks: &[UplinkPort]) -> Vec<&str> {
        uplinks.iter().map(|u| u.port_id.as_str()).collect()
    }

    #[test]
    fn single_tag_port_is_not_an_uplink() {
        let memberships = vec![
            row("p1", 10, PortMode::TaggedStatic),
            row("p1", 11, PortMode::TaggedStatic),
            row("p2", 10, PortMode::TaggedStatic),
        ];
        assert_eq!(ids(&uplink_ports(&memberships)), vec!["p1"]);
    }

    #[test]
    fn untagged_and_dynamic_rows_do_not_count() {
        let memberships = vec![
            row("1", 1, PortMode::Untagged),
            row("1", 10, PortMode::TaggedStatic),
            row("1", 20, PortMode::TaggedDynamic),
            row("2", 1, PortMode::Untagged),
            row("2", 30, PortMode::Forbidden),
        ];
        assert!(uplink_ports(&memberships).is_empty());
    }

    #[test]
    fn counts_are_reported() {
        let memberships = vec![
            row("A1", 10, PortMode::TaggedStatic),
            row("A1", 20, PortMode::TaggedStatic),
            row("A1", 30, PortMode::TaggedStatic),
            row("24", 10, PortMode::TaggedStatic),
            row("24", 20, PortMode::TaggedStatic),
        ];
        assert_eq!(
            uplink_ports(&memberships),
            vec![
                UplinkPort {
                    port_id: "24".into(),
                    tagged_vlans: 2
                },
                UplinkPort {
                    port_id: "A1".into(),
                    tagged_vlans: 3
                },
            ]
        );
        assert_eq!(tag_counts(&memberships).get("A1"), Some(&3));
    }

    #[test]
    fn natural_port_order() {
        let mut ports = vec!["A10", "10", "B1", "2", "A2", "A1", "1/A3", "1/A10"];
        ports.sort_by(|a, b| compare_ports(a, b));
        assert_eq!(
            ports,
            vec!["1/A3", "1/A10", "2", "10", "A1", "A2", "A10", "B1"]
        );
    }

    #[test]
    fn natural_order_is_total_for_leading_zeros() {
        assert_eq!(compare_ports("01", "1"), "01".cmp("1"));
        assert_eq!(compare_ports("5", "5"), Ordering::Equal);
    }
}

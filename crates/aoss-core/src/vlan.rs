// ── VLAN allocation ──

use std::collections::HashSet;

use aoss_api::{SwitchSession, Vlan};
use tracing::{debug, info};

use crate::error::{CoreError, rejected};

pub const VLAN_ID_MIN: u16 = 1;
pub const VLAN_ID_MAX: u16 = 4095;

/// Lowest VLAN ID in `1..=4095` not present in `existing`.
///
/// Deterministic for a given table. `None` when every ID is taken.
pub fn lowest_free_vlan(existing: impl IntoIterator<Item = u16>) -> Option<u16> {
    let used: HashSet<u16> = existing.into_iter().collect();
    (VLAN_ID_MIN..=VLAN_ID_MAX).find(|id| !used.contains(id))
}

/// Fetch the VLAN table, sorted by ID.
pub async fn list_vlans(session: &SwitchSession) -> Result<Vec<Vlan>, CoreError> {
    let mut vlans = session.list_vlans().await?;
    vlans.sort_by_key(|v| v.vlan_id);
    Ok(vlans)
}

/// Create a VLAN and return its ID.
///
/// `requested == 0` picks the lowest free ID from a fresh snapshot of the
/// VLAN table. Any other ID is sent as-is; the switch rejects duplicates.
/// Name uniqueness is also enforced by the switch.
pub async fn allocate_vlan(
    session: &SwitchSession,
    requested: u16,
    name: &str,
) -> Result<u16, CoreError> {
    if requested > VLAN_ID_MAX {
        return Err(CoreError::ValidationFailed {
            message: format!("VLAN ID {requested} is outside 0..={VLAN_ID_MAX}"),
        });
    }

    let vlans = session.list_vlans().await.map_err(|e| {
        rejected(e, |message| CoreError::Allocation {
            vlan_id: None,
            message: format!("could not read VLAN table: {message}"),
        })
    })?;

    let vlan_id = if requested == 0 {
        let free = lowest_free_vlan(vlans.iter().map(|v| v.vlan_id))
            .ok_or(CoreError::NoFreeVlan { max: VLAN_ID_MAX })?;
        debug!(vlan_id = free, existing = vlans.len(), "lowest free VLAN ID");
        free
    } else {
        requested
    };

    info!(vlan_id, name, "creating VLAN");
    session.create_vlan(vlan_id, name).await.map_err(|e| {
        rejected(e, |message| CoreError::Allocation {
            vlan_id: Some(vlan_id),
            message,
        })
    })?;

    Ok(vlan_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_yields_one() {
        assert_eq!(lowest_free_vlan([]), Some(1));
    }

    #[test]
    fn first_gap_wins() {
        assert_eq!(lowest_free_vlan([1, 2, 3, 5, 6]), Some(4));
    }

    #[test]
    fn order_of_table_does_not_matter() {
        assert_eq!(lowest_free_vlan([3, 1, 2, 10]), Some(4));
        assert_eq!(lowest_free_vlan([10, 2, 3]), Some(1));
    }

    #[test]
    fn contiguous_prefix_returns_next_id() {
        for k in [2_u16, 17, 100, 4095] {
            assert_eq!(lowest_free_vlan(1..k), Some(k), "prefix 1..{k}");
        }
    }

    #[test]
    fn never_returns_an_existing_id() {
        let table = [1_u16, 2, 4, 8, 16, 32, 64];
        let free = lowest_free_vlan(table).expect("table has gaps");
        assert!(!table.contains(&free));
    }

    #[test]
    fn full_table_is_exhausted() {
        assert_eq!(lowest_free_vlan(VLAN_ID_MIN..=VLAN_ID_MAX), None);
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        assert_eq!(lowest_free_vlan([0, 4096, 1]), Some(2));
    }
}

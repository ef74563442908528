//! Switch administration logic on top of `aoss-api`.
//!
//! - **[`Switch`]**: owns one authenticated session.
//!   [`Switch::oneshot()`](Switch::oneshot) logs in, runs a closure, and logs
//!   out on every exit path so no session slot leaks on the switch.
//!
//! - **VLAN allocation** ([`vlan`]): lowest-free-ID policy over 1..=4095,
//!   or a caller-chosen ID validated by the switch.
//!
//! - **Uplink tagging** ([`uplink`]): ports carrying more than one
//!   statically tagged VLAN are treated as uplinks; a new VLAN is tagged
//!   onto each, fail-fast, in natural port order.
//!
//! - **PoE control** ([`poe`]): read, set, or toggle a port's PoE flag.
//!
//! - **Provisioning** ([`provision`]): allocate then tag, halting on the
//!   first failure.

pub mod config;
pub mod error;
pub mod poe;
pub mod provision;
pub mod switch;
pub mod uplink;
pub mod vlan;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{Protocol, SwitchConfig, TlsVerification};
pub use error::CoreError;
pub use poe::{PoeAction, PoeChange};
pub use provision::Provisioned;
pub use switch::Switch;
pub use uplink::UplinkPort;
pub use vlan::{VLAN_ID_MAX, VLAN_ID_MIN};

pub use aoss_api::{PortMode, Vlan, VlanPort};

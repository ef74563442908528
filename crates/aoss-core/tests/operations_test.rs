#![allow(clippy::unwrap_used)]
// End-to-end tests of the switch operations against a mocked REST API.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aoss_core::poe::apply_poe_action;
use aoss_core::provision::provision_vlan;
use aoss_core::uplink::{find_uplinks, tag_uplinks};
use aoss_core::vlan::allocate_vlan;
use aoss_core::{CoreError, PoeAction, PoeChange, Switch, SwitchConfig};

// ── Helpers ─────────────────────────────────────────────────────────

fn switch_config(server: &MockServer) -> SwitchConfig {
    let host = server.uri().trim_start_matches("http://").to_owned();
    let mut config = SwitchConfig::new(host, "manager", SecretString::from("secret".to_string()));
    config.request_interval = Duration::ZERO;
    config
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/rest/v6/login-sessions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "uri": "/login-sessions",
            "cookie": "sessionId=Zz99Yy88"
        })))
        .mount(server)
        .await;
}

async fn mount_logout(server: &MockServer, expected: u64) {
    Mock::given(method("DELETE"))
        .and(path("/rest/v6/login-sessions"))
        .respond_with(ResponseTemplate::new(204))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_vlans(server: &MockServer, ids: &[u16]) {
    let elements: Vec<_> = ids
        .iter()
        .map(|id| json!({ "vlan_id": id, "name": format!("VLAN{id}"), "status": "VS_PORT_BASED" }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/rest/v6/vlans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection_result": { "total_elements_count": ids.len() },
            "vlan_element": elements
        })))
        .mount(server)
        .await;
}

async fn mount_memberships(server: &MockServer, rows: &[(&str, u16, &str)]) {
    let elements: Vec<_> = rows
        .iter()
        .map(|(port, vlan, mode)| json!({ "vlan_id": vlan, "port_id": port, "port_mode": mode }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/rest/v6/vlans-ports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vlan_port_element": elements
        })))
        .mount(server)
        .await;
}

async fn connect(server: &MockServer) -> Switch {
    mount_login(server).await;
    Switch::connect(switch_config(server)).await.unwrap()
}

const TAGGED: &str = "POM_TAGGED_STATIC";
const UNTAGGED: &str = "POM_UNTAGGED";

// ── Session lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn rejected_login_issues_no_further_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/login-sessions"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad credentials"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_logout(&server, 0).await;

    let result = Switch::oneshot(switch_config(&server), |switch| async move {
        allocate_vlan(switch.session(), 0, "never").await
    })
    .await;

    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
}

#[tokio::test]
async fn oneshot_logs_out_after_failure() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_logout(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/rest/v6/vlans"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = Switch::oneshot(switch_config(&server), |switch| async move {
        allocate_vlan(switch.session(), 0, "Guests").await
    })
    .await;

    assert!(matches!(result, Err(CoreError::Allocation { vlan_id: None, .. })));
}

#[tokio::test]
async fn logout_failure_does_not_mask_result() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_vlans(&server, &[1]).await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v6/login-sessions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let vlans = Switch::oneshot(switch_config(&server), |switch| async move {
        aoss_core::vlan::list_vlans(switch.session()).await
    })
    .await
    .unwrap();

    assert_eq!(vlans.len(), 1);
}

#[tokio::test]
async fn disconnect_reports_teardown_failure() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v6/login-sessions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = switch.disconnect().await.unwrap_err();
    assert!(matches!(err, CoreError::SessionTeardown { .. }));
    assert!(!switch.is_connected());
    assert!(switch.disconnect().await.is_ok());
}

// ── VLAN allocation ─────────────────────────────────────────────────

#[tokio::test]
async fn allocates_lowest_free_id() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_vlans(&server, &[1, 2, 3, 5]).await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans"))
        .and(body_json(json!({ "vlan_id": 4, "name": "Guests" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let id = allocate_vlan(switch.session(), 0, "Guests").await.unwrap();
    assert_eq!(id, 4);
}

#[tokio::test]
async fn requested_id_is_sent_as_is() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_vlans(&server, &[1]).await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans"))
        .and(body_json(json!({ "vlan_id": 300, "name": "Cameras" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let id = allocate_vlan(switch.session(), 300, "Cameras").await.unwrap();
    assert_eq!(id, 300);
}

#[tokio::test]
async fn full_table_fails_without_posting() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    let all: Vec<u16> = (1..=4095).collect();
    mount_vlans(&server, &all).await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = allocate_vlan(switch.session(), 0, "Overflow").await.unwrap_err();
    assert!(matches!(err, CoreError::NoFreeVlan { max: 4095 }));
}

#[tokio::test]
async fn duplicate_name_is_an_allocation_error() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_vlans(&server, &[1, 10]).await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "VLAN name already exists" })),
        )
        .mount(&server)
        .await;

    let err = allocate_vlan(switch.session(), 0, "VLAN10").await.unwrap_err();
    match err {
        CoreError::Allocation { vlan_id, message } => {
            assert_eq!(vlan_id, Some(2));
            assert!(message.contains("already exists"), "got: {message}");
        }
        other => panic!("expected Allocation, got {other:?}"),
    }
}

// ── Uplink tagging ──────────────────────────────────────────────────

#[tokio::test]
async fn tags_only_multi_tagged_ports() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_memberships(
        &server,
        &[("p1", 10, TAGGED), ("p1", 11, TAGGED), ("p2", 10, TAGGED), ("p3", 1, UNTAGGED)],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans-ports"))
        .and(body_json(json!({ "vlan_id": 12, "port_id": "p1", "port_mode": TAGGED })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let tagged = tag_uplinks(switch.session(), 12).await.unwrap();
    assert_eq!(tagged, vec!["p1".to_string()]);
}

#[tokio::test]
async fn no_uplinks_means_no_posts() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_memberships(&server, &[("1", 1, UNTAGGED), ("2", 20, TAGGED)]).await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans-ports"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let tagged = tag_uplinks(switch.session(), 30).await.unwrap();
    assert!(tagged.is_empty());
}

#[tokio::test]
async fn failure_mid_sequence_reports_partial_progress() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_memberships(
        &server,
        &[
            ("A2", 10, TAGGED),
            ("A2", 20, TAGGED),
            ("A1", 10, TAGGED),
            ("A1", 20, TAGGED),
            ("A10", 10, TAGGED),
            ("A10", 20, TAGGED),
        ],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans-ports"))
        .and(body_json(json!({ "vlan_id": 30, "port_id": "A1", "port_mode": TAGGED })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans-ports"))
        .and(body_json(json!({ "vlan_id": 30, "port_id": "A2", "port_mode": TAGGED })))
        .respond_with(ResponseTemplate::new(500).set_body_string("port is a trunk member"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans-ports"))
        .and(body_json(json!({ "vlan_id": 30, "port_id": "A10", "port_mode": TAGGED })))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = tag_uplinks(switch.session(), 30).await.unwrap_err();
    match &err {
        CoreError::Tagging {
            vlan_id,
            port,
            message,
            tagged,
        } => {
            assert_eq!(*vlan_id, 30);
            assert_eq!(port.as_deref(), Some("A2"));
            assert!(message.contains("trunk member"), "got: {message}");
            assert_eq!(tagged, &vec!["A1".to_string()]);
        }
        other => panic!("expected Tagging, got {other:?}"),
    }
    assert_eq!(err.partially_tagged(), ["A1".to_string()]);
}

#[tokio::test]
async fn find_uplinks_is_read_only() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_memberships(&server, &[("10", 5, TAGGED), ("10", 6, TAGGED), ("9", 5, TAGGED), ("9", 6, TAGGED)])
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let uplinks = find_uplinks(switch.session()).await.unwrap();
    let ports: Vec<_> = uplinks.iter().map(|u| u.port_id.as_str()).collect();
    assert_eq!(ports, vec!["9", "10"]);
}

// ── PoE ─────────────────────────────────────────────────────────────

async fn mount_poe_state(server: &MockServer, port: &str, enabled: bool) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/v6/ports/{port}/poe")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "port_id": port,
            "is_poe_enabled": enabled,
            "poe_priority": "PPP_LOW",
            "poe_allocation_method": "PPAM_USAGE"
        })))
        .mount(server)
        .await;
}

async fn expect_poe_write(server: &MockServer, port: &str, enabled: bool) {
    Mock::given(method("PUT"))
        .and(path(format!("/rest/v6/ports/{port}/poe")))
        .and(body_json(json!({ "is_poe_enabled": enabled })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn toggle_reads_then_inverts() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_poe_state(&server, "7", true).await;
    expect_poe_write(&server, "7", false).await;

    let change = apply_poe_action(switch.session(), "7", PoeAction::Toggle)
        .await
        .unwrap();
    assert_eq!(
        change,
        PoeChange {
            port: "7".into(),
            previous: Some(true),
            enabled: false,
        }
    );
}

#[tokio::test]
async fn explicit_on_does_not_read() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/v6/ports/7/poe"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    expect_poe_write(&server, "7", true).await;

    let change = apply_poe_action(switch.session(), "7", PoeAction::On)
        .await
        .unwrap();
    assert!(change.enabled);
    assert_eq!(change.previous, None);
}

#[tokio::test]
async fn off_on_disabled_port_still_writes() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    expect_poe_write(&server, "A3", false).await;

    let change = apply_poe_action(switch.session(), "A3", PoeAction::Off)
        .await
        .unwrap();
    assert!(!change.enabled);
}

#[tokio::test]
async fn unknown_port_is_a_query_error() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/v6/ports/99/poe"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such port"))
        .mount(&server)
        .await;

    let err = apply_poe_action(switch.session(), "99", PoeAction::Toggle)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Query { ref port, .. } if port == "99"));
}

#[tokio::test]
async fn rejected_write_is_a_command_error() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    Mock::given(method("PUT"))
        .and(path("/rest/v6/ports/5/poe"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = apply_poe_action(switch.session(), "5", PoeAction::On)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Command { .. }));
}

// ── Provisioning ────────────────────────────────────────────────────

#[tokio::test]
async fn provision_allocates_then_tags() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_vlans(&server, &[1, 2]).await;
    mount_memberships(&server, &[("24", 1, TAGGED), ("24", 2, TAGGED)]).await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans"))
        .and(body_json(json!({ "vlan_id": 3, "name": "Lab" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans-ports"))
        .and(body_json(json!({ "vlan_id": 3, "port_id": "24", "port_mode": TAGGED })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = provision_vlan(switch.session(), 0, "Lab", true).await.unwrap();
    assert_eq!(outcome.vlan_id, 3);
    assert_eq!(outcome.tagged_ports, Some(vec!["24".to_string()]));
}

#[tokio::test]
async fn provision_halts_when_allocation_fails() {
    let server = MockServer::start().await;
    let switch = connect(&server).await;
    mount_vlans(&server, &[1]).await;
    Mock::given(method("POST"))
        .and(path("/rest/v6/vlans"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v6/vlans-ports"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = provision_vlan(switch.session(), 0, "Lab", true).await.unwrap_err();
    assert!(matches!(err, CoreError::Allocation { .. }));
}

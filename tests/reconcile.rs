//! Reconciler properties driven through a recording mock transport.

mod common;

use common::MockTransport;
use hostup_reseller::dns::{host_record_from_remote, reconcile_zone};
use hostup_reseller::types::HostRecord;
use hostup_reseller::Error;
use serde_json::{json, Value};

const ZONE_ID: &str = "z1";
const ZONE: &str = "example.se";

async fn run(
    current: &[Value],
    desired: &[HostRecord],
) -> (MockTransport, hostup_reseller::error::Result<hostup_reseller::dns::ReconcileSummary>) {
    let transport = MockTransport::new();
    let result = reconcile_zone(&transport, ZONE_ID, ZONE, current, desired).await;
    (transport, result)
}

#[tokio::test]
async fn new_record_issues_exactly_one_create() {
    let desired = vec![HostRecord::new("www", "A", "1.2.3.4")];
    let (transport, result) = run(&[], &desired).await;

    let summary = result.unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.deleted, 0);

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].path, "/api/dns/zones/z1/records");
    assert_eq!(
        calls[0].payload,
        Some(json!({"type": "A", "name": "www", "value": "1.2.3.4"}))
    );
}

#[tokio::test]
async fn reconciling_same_state_is_noop() {
    let current = vec![
        json!({"id": "r1", "type": "A", "name": "www.example.se", "value": "1.2.3.4"}),
        json!({"id": "r2", "type": "MX", "name": "example.se", "value": "mx1.example.se", "priority": 10}),
        json!({"id": "r3", "type": "TXT", "name": "example.se", "value": "\"v=spf1 -all\""}),
    ];
    let desired: Vec<HostRecord> = current
        .iter()
        .map(|record| host_record_from_remote(record, ZONE))
        .collect();

    let (transport, result) = run(&current, &desired).await;

    assert!(result.unwrap().is_noop());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn system_records_are_never_touched() {
    let current = vec![
        json!({"id": "n1", "type": "NS", "name": "example.se", "value": "ns1.hostup.se"}),
        json!({"id": "s1", "type": "SOA", "name": "example.se", "value": "ns1.hostup.se hostmaster.example.se"}),
        json!({"id": "v1", "type": "SRV", "name": "_sip._tcp.example.se", "value": "0 5 5060 sip.example.se"}),
    ];

    // The host submits none of them; the reconciler must not delete.
    let (transport, result) = run(&current, &[]).await;
    assert!(result.unwrap().is_noop());
    assert!(transport.calls().is_empty());

    // Even when the host submits an edited NS record, it is skipped.
    let mut edited = HostRecord::new("", "NS", "ns9.attacker.se");
    edited.record_id = Some("n1".to_string());
    let (transport, result) = run(&current, &[edited]).await;
    assert!(result.unwrap().is_noop());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn removed_record_is_deleted() {
    let current = vec![
        json!({"id": "r1", "type": "A", "name": "www.example.se", "value": "1.2.3.4"}),
        json!({"id": "n1", "type": "NS", "name": "example.se", "value": "ns1.hostup.se"}),
    ];

    let (transport, result) = run(&current, &[]).await;

    assert_eq!(result.unwrap().deleted, 1);
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "DELETE");
    assert_eq!(calls[0].path, "/api/dns/zones/z1/records/r1");
}

#[tokio::test]
async fn changed_value_issues_update() {
    let current = vec![
        json!({"id": "r1", "type": "A", "name": "www.example.se", "value": "1.2.3.4"}),
    ];
    let mut desired = HostRecord::new("www", "A", "5.6.7.8");
    desired.record_id = Some("r1".to_string());

    let (transport, result) = run(&current, &[desired]).await;

    assert_eq!(result.unwrap().updated, 1);
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "PUT");
    assert_eq!(calls[0].path, "/api/dns/zones/z1/records/r1");
}

#[tokio::test]
async fn string_priority_matches_numeric_priority() {
    let current = vec![
        json!({"id": "r1", "type": "MX", "name": "example.se", "value": "mx1.example.se", "priority": 10}),
    ];
    let mut desired = HostRecord::new("", "MX", "mx1.example.se");
    desired.priority = Some("10".to_string());
    desired.record_id = Some("r1".to_string());

    let (transport, result) = run(&current, &[desired]).await;

    assert!(result.unwrap().is_noop());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn unknown_record_id_falls_back_to_create() {
    let mut desired = HostRecord::new("www", "A", "1.2.3.4");
    desired.record_id = Some("gone".to_string());

    let (transport, result) = run(&[], &[desired]).await;

    assert_eq!(result.unwrap().created, 1);
    assert_eq!(transport.calls()[0].method, "POST");
}

#[tokio::test]
async fn malformed_record_fails_whole_save_before_any_call() {
    let desired = vec![
        HostRecord::new("www", "A", ""),
        HostRecord::new("mail", "A", "1.2.3.4"),
    ];

    let (transport, result) = run(&[], &desired).await;

    assert!(matches!(result.unwrap_err(), Error::Validation(_)));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn transport_failure_aborts_mid_sequence() {
    let current = vec![
        json!({"id": "r1", "type": "A", "name": "www.example.se", "value": "1.2.3.4"}),
        json!({"id": "r2", "type": "A", "name": "old.example.se", "value": "9.9.9.9"}),
    ];
    let mut update = HostRecord::new("www", "A", "5.6.7.8");
    update.record_id = Some("r1".to_string());
    let desired = vec![HostRecord::new("new", "A", "2.2.2.2"), update];

    let transport = MockTransport::new();
    transport.fail("PUT", "/api/dns/zones/z1/records/r1", "Zone is locked");

    let result = reconcile_zone(&transport, ZONE_ID, ZONE, &current, &desired).await;
    assert!(matches!(result.unwrap_err(), Error::Api { .. }));

    // The create before the failure was applied; the delete of r2 never ran.
    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[1].method, "PUT");
}

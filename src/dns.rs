//! DNS zone reconciliation, the core of the adapter.
//!
//! The host submits a full desired record set; the upstream zone holds
//! the current one. Reconciliation walks the desired set in order and
//! issues the minimal create/update/delete sequence, leaving system
//! records (SOA, NS and anything outside the manageable types)
//! strictly alone. A record is only deleted when it exists upstream
//! and its id does not appear in the desired set.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::{Method, Transport};
use crate::types::{is_manageable_dns_type, opaque_id, HostRecord};

/// Strip one layer of matching outer single or double quotes. TXT
/// values round-trip through the API quoted.
pub(crate) fn strip_outer_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

fn strip_zone_suffix(name: &str, zone: &str) -> String {
    if !zone.is_empty() {
        let suffix = format!(".{zone}");
        // Byte-wise compare keeps this safe for non-ASCII names; a
        // match always cuts at the leading '.' of the suffix.
        if name.len() > suffix.len()
            && name.as_bytes()[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
        {
            return name[..name.len() - suffix.len()].to_string();
        }
    }
    name.to_string()
}

/// Relative hostname for a record name coming back from the API. The
/// apex collapses to the empty string; names outside the zone are kept
/// as-is.
pub fn hostname_from_record_name(name: &str, zone: &str) -> String {
    let name = name.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');
    if name.is_empty() || name.eq_ignore_ascii_case(zone) {
        return String::new();
    }
    strip_zone_suffix(name, zone)
}

/// Relative name for a hostname submitted by the host. Empty, `@` and
/// the apex itself (case-insensitive, trailing dot ignored) all
/// normalise to the empty relative name.
pub fn relative_name(hostname: &str, zone: &str) -> String {
    let name = hostname.trim().trim_end_matches('.');
    let zone = zone.trim_end_matches('.');
    if name.is_empty() || name == "@" {
        return String::new();
    }
    if !zone.is_empty() {
        if name.eq_ignore_ascii_case(zone) {
            return String::new();
        }
        return strip_zone_suffix(name, zone);
    }
    name.to_string()
}

/// Missing priority and the literal "N/A" both mean "no priority";
/// anything non-numeric is dropped rather than sent upstream.
fn parse_priority(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("N/A") {
        return None;
    }
    raw.parse().ok()
}

/// Normalise a priority value of any JSON shape to a comparison string
/// (empty string means no priority). "10" and 10 compare equal.
fn priority_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

/// Build the wire payload for one desired record. Type and address are
/// mandatory; a malformed record fails the whole save.
fn build_record_payload(record: &HostRecord, zone_domain: &str) -> Result<Value> {
    let record_type = record.record_type.trim().to_uppercase();
    let address = record.address.trim();

    if record_type.is_empty() || address.is_empty() {
        return Err(Error::Validation(
            "Type and address are required for DNS records".to_string(),
        ));
    }

    let mut payload = Map::new();
    payload.insert("type".to_string(), Value::String(record_type));
    payload.insert(
        "value".to_string(),
        Value::String(strip_outer_quotes(address).to_string()),
    );
    // Apex records use the empty name; the API normalises it to the FQDN.
    payload.insert(
        "name".to_string(),
        Value::String(relative_name(&record.hostname, zone_domain)),
    );
    if let Some(priority) = parse_priority(record.priority.as_deref()) {
        payload.insert("priority".to_string(), Value::from(priority));
    }
    if let Some(ttl) = record.ttl {
        payload.insert("ttl".to_string(), Value::from(ttl));
    }

    Ok(Value::Object(payload))
}

/// Compare an existing upstream record against a desired wire payload
/// on normalised (type, name, value, priority).
fn needs_update(existing: &Value, desired: &Value, zone_domain: &str) -> bool {
    let existing_type = existing
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_uppercase();
    let desired_type = desired.get("type").and_then(Value::as_str).unwrap_or("");
    if existing_type != desired_type {
        return true;
    }

    let existing_name = hostname_from_record_name(
        existing.get("name").and_then(Value::as_str).unwrap_or(""),
        zone_domain,
    );
    let desired_name = desired.get("name").and_then(Value::as_str).unwrap_or("");
    if existing_name != desired_name {
        return true;
    }

    let existing_value = existing
        .get("value")
        .or_else(|| existing.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("");
    let desired_value = desired.get("value").and_then(Value::as_str).unwrap_or("");
    if strip_outer_quotes(existing_value) != strip_outer_quotes(desired_value) {
        return true;
    }

    let existing_priority = existing.get("priority").or_else(|| existing.get("prio"));
    priority_string(existing_priority) != priority_string(desired.get("priority"))
}

/// Upstream record id, string or number.
fn record_id(record: &Value) -> Option<String> {
    record.get("id").and_then(opaque_id)
}

/// Convert an upstream record into the host's shape: relative
/// hostname, quote-stripped value, stringified priority and id.
pub fn host_record_from_remote(record: &Value, zone_domain: &str) -> HostRecord {
    let name = record.get("name").and_then(Value::as_str).unwrap_or("");
    let value = record
        .get("value")
        .or_else(|| record.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("");
    let priority = match record.get("priority").or_else(|| record.get("prio")) {
        None | Some(Value::Null) => None,
        Some(v) => Some(priority_string(Some(v))),
    };

    HostRecord {
        hostname: hostname_from_record_name(name, zone_domain),
        record_type: record
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        address: strip_outer_quotes(value).to_string(),
        priority,
        ttl: record.get("ttl").and_then(Value::as_u64).map(|n| n as u32),
        record_id: record_id(record),
    }
}

/// Calls issued by one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.deleted == 0
    }
}

/// Diff `desired` against `current` and apply the result to the zone.
///
/// Creates and updates run in submitted order, deletes afterwards in
/// upstream order. Any transport failure aborts immediately; calls
/// already applied stay applied.
pub async fn reconcile_zone(
    transport: &dyn Transport,
    zone_id: &str,
    zone_domain: &str,
    current: &[Value],
    desired: &[HostRecord],
) -> Result<ReconcileSummary> {
    let mut existing_by_id: HashMap<String, &Value> = HashMap::new();
    for record in current {
        if let Some(id) = record_id(record) {
            existing_by_id.insert(id, record);
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut summary = ReconcileSummary::default();

    for record in desired {
        let recid = record
            .record_id
            .as_deref()
            .map(str::trim)
            .unwrap_or("");

        // SOA/NS and unsupported types are never touched; mark them
        // seen so the delete pass skips them too.
        if !is_manageable_dns_type(&record.record_type) {
            if !recid.is_empty() {
                seen.insert(recid.to_string());
            }
            debug!(
                record_type = %record.record_type,
                hostname = %record.hostname,
                "leaving system record untouched"
            );
            continue;
        }

        let payload = build_record_payload(record, zone_domain)?;

        if !recid.is_empty() {
            if let Some(existing) = existing_by_id.get(recid) {
                seen.insert(recid.to_string());
                if needs_update(existing, &payload, zone_domain) {
                    transport
                        .call(
                            Method::PUT,
                            &format!("/api/dns/zones/{zone_id}/records/{recid}"),
                            Some(payload),
                            &[],
                        )
                        .await?;
                    summary.updated += 1;
                }
                continue;
            }
        }

        transport
            .call(
                Method::POST,
                &format!("/api/dns/zones/{zone_id}/records"),
                Some(payload),
                &[],
            )
            .await?;
        summary.created += 1;
    }

    // Delete supported records the host no longer wants.
    for record in current {
        let Some(id) = record_id(record) else { continue };
        if seen.contains(&id) {
            continue;
        }
        let record_type = record.get("type").and_then(Value::as_str).unwrap_or("");
        if !is_manageable_dns_type(record_type) {
            continue;
        }
        transport
            .call(
                Method::DELETE,
                &format!("/api/dns/zones/{zone_id}/records/{id}"),
                None,
                &[],
            )
            .await?;
        summary.deleted += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_stripping() {
        assert_eq!(strip_outer_quotes("\"v=spf1 -all\""), "v=spf1 -all");
        assert_eq!(strip_outer_quotes("'quoted'"), "quoted");
        assert_eq!(strip_outer_quotes(" plain "), "plain");
        assert_eq!(strip_outer_quotes("\"mismatched'"), "\"mismatched'");
        // Only one layer comes off.
        assert_eq!(strip_outer_quotes("\"\"double\"\""), "\"double\"");
    }

    #[test]
    fn apex_names_normalise_to_empty() {
        assert_eq!(relative_name("", "example.se"), "");
        assert_eq!(relative_name("@", "example.se"), "");
        assert_eq!(relative_name("example.se", "example.se"), "");
        assert_eq!(relative_name("EXAMPLE.SE.", "example.se"), "");
    }

    #[test]
    fn suffix_is_stripped_case_insensitively() {
        assert_eq!(relative_name("www.example.se", "example.se"), "www");
        assert_eq!(relative_name("a.b.example.se", "example.se"), "a.b");
        assert_eq!(relative_name("www.EXAMPLE.se.", "example.se"), "www");
    }

    #[test]
    fn out_of_zone_names_are_kept() {
        assert_eq!(relative_name("www.other.se", "example.se"), "www.other.se");
        // A name equal to ".zone" minus the dot must not underflow.
        assert_eq!(relative_name("e.se", "example.se"), "e.se");
    }

    #[test]
    fn relative_is_left_inverse_of_absolute() {
        let zone = "example.se";
        for name in ["www", "mail", "a.b.c"] {
            let absolute = format!("{name}.{zone}");
            assert_eq!(relative_name(&absolute, zone), name);
            assert_eq!(hostname_from_record_name(&absolute, zone), name);
        }
    }

    #[test]
    fn payload_requires_type_and_address() {
        let record = HostRecord::new("www", "A", "");
        assert!(matches!(
            build_record_payload(&record, "example.se"),
            Err(Error::Validation(_))
        ));

        let record = HostRecord::new("www", "", "1.2.3.4");
        assert!(build_record_payload(&record, "example.se").is_err());
    }

    #[test]
    fn payload_normalises_fields() {
        let mut record = HostRecord::new("mail.example.se", "mx", "'mx1.example.se'");
        record.priority = Some("10".to_string());
        record.ttl = Some(3600);

        let payload = build_record_payload(&record, "example.se").unwrap();
        assert_eq!(
            payload,
            json!({
                "type": "MX",
                "name": "mail",
                "value": "mx1.example.se",
                "priority": 10,
                "ttl": 3600,
            })
        );
    }

    #[test]
    fn na_priority_is_dropped() {
        let mut record = HostRecord::new("www", "A", "1.2.3.4");
        record.priority = Some("N/A".to_string());
        let payload = build_record_payload(&record, "example.se").unwrap();
        assert!(payload.get("priority").is_none());
    }

    #[test]
    fn string_and_number_priority_compare_equal() {
        let existing = json!({
            "id": "r1", "type": "MX", "name": "example.se",
            "value": "mx1.example.se", "priority": 10,
        });
        let mut record = HostRecord::new("", "MX", "mx1.example.se");
        record.priority = Some("10".to_string());
        let desired = build_record_payload(&record, "example.se").unwrap();
        assert!(!needs_update(&existing, &desired, "example.se"));
    }

    #[test]
    fn changed_value_needs_update() {
        let existing = json!({
            "id": "r1", "type": "A", "name": "www.example.se", "value": "1.2.3.4",
        });
        let desired =
            build_record_payload(&HostRecord::new("www", "A", "5.6.7.8"), "example.se").unwrap();
        assert!(needs_update(&existing, &desired, "example.se"));
    }

    #[test]
    fn quoted_txt_value_compares_equal() {
        let existing = json!({
            "id": "r1", "type": "TXT", "name": "example.se",
            "content": "\"v=spf1 -all\"",
        });
        let desired =
            build_record_payload(&HostRecord::new("", "TXT", "v=spf1 -all"), "example.se")
                .unwrap();
        assert!(!needs_update(&existing, &desired, "example.se"));
    }

    #[test]
    fn remote_record_converts_to_host_shape() {
        let remote = json!({
            "id": 17, "type": "MX", "name": "example.se",
            "content": "mx1.example.se", "prio": 10, "ttl": 300,
        });
        let host = host_record_from_remote(&remote, "example.se");
        assert_eq!(
            host,
            HostRecord {
                hostname: String::new(),
                record_type: "MX".to_string(),
                address: "mx1.example.se".to_string(),
                priority: Some("10".to_string()),
                ttl: Some(300),
                record_id: Some("17".to_string()),
            }
        );
    }
}

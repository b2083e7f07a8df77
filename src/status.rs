//! Lifecycle status and expiry normalisation.
//!
//! The upstream API reports status and expiry in several shapes
//! depending on the backing registry. Everything is collapsed here into
//! the host's fixed vocabulary and a canonical `YYYY-MM-DD` date.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::types::DomainStatus;

/// Candidate expiry fields, in preference order.
const EXPIRY_FIELDS: [&str; 3] = ["expires", "expirydate", "next_due"];

/// Placeholder dates some registries emit instead of null.
const ZERO_DATES: [&str; 2] = ["0000-00-00", "0000-00-00 00:00:00"];

/// Pick the first parsable expiry date out of the details record and
/// format it as `YYYY-MM-DD`.
///
/// Falls back to one year from today when nothing parses; the host
/// rejects responses with an empty or invalid expiry, so substituting a
/// date keeps sync functional on registries with bad data.
pub fn normalize_expiry(details: &Value) -> String {
    for field in EXPIRY_FIELDS {
        let Some(candidate) = details.get(field).and_then(Value::as_str) else {
            continue;
        };
        let trimmed = candidate.trim();
        if trimmed.is_empty() || ZERO_DATES.contains(&trimmed) {
            continue;
        }
        if let Some(date) = parse_date(trimmed) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    warn!("no parsable expiry in domain details, substituting one year from today");
    fallback_expiry()
}

fn fallback_expiry() -> String {
    let today = Utc::now().date_naive();
    today
        .checked_add_months(Months::new(12))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    None
}

/// Map a raw upstream status onto the host lifecycle vocabulary.
/// Unrecognised statuses map to `Unknown` so no flag gets set.
pub fn lifecycle_status(raw: &str) -> DomainStatus {
    match raw.trim().to_uppercase().as_str() {
        "ACTIVE" | "OK" | "OK (AUTORENEW)" => DomainStatus::Active,
        "EXPIRED" => DomainStatus::Expired,
        "CANCELLED" | "CANCELED" => DomainStatus::Cancelled,
        "TRANSFERRED" | "TRANSFERRED AWAY" => DomainStatus::TransferredAway,
        "SUSPENDED" => DomainStatus::Suspended,
        _ => DomainStatus::Unknown,
    }
}

/// Transfer-completion polling uses a distinct vocabulary: anything not
/// explicitly completed or in progress is a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferProgress {
    Completed,
    Pending,
    Failed { reason: String },
}

pub fn transfer_progress(raw: &str) -> TransferProgress {
    let status = raw.trim().to_uppercase();
    match status.as_str() {
        "ACTIVE" | "OK" | "REGISTERED" => TransferProgress::Completed,
        "PENDING" | "PENDING TRANSFER" | "TRANSFER" | "PROCESSING" | "IN_PROGRESS" => {
            TransferProgress::Pending
        }
        _ => TransferProgress::Failed {
            reason: format!("Status: {status}"),
        },
    }
}

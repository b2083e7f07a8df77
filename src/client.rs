//! Orchestration operations over the transport.
//!
//! Each operation is a short synchronous-per-call sequence: resolve the
//! domain or zone identity fresh, perform the reads/writes, normalise
//! the result for the host. The client owns the product cache; nothing
//! else is shared across operations.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::dns::{host_record_from_remote, reconcile_zone, ReconcileSummary};
use crate::error::{Error, Result};
use crate::orgno::{format_for_api, format_for_display, tld_supports_orgno};
use crate::products::ProductCache;
use crate::resolver::find_domain_id;
use crate::status::{lifecycle_status, normalize_expiry, transfer_progress, TransferProgress};
use crate::transport::{HttpTransport, Method, Transport};
use crate::types::{
    is_manageable_dns_type, opaque_id, Availability, DomainInformation, HostRecord, OrderOutcome,
    OrderRequest, PremiumPricing, RegistrantContact, SearchResult, SyncResult, TransferSyncResult,
};

/// Tuning for the queued availability check.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub premium_enabled: bool,
    /// Delay between status polls.
    pub poll_interval: Duration,
    /// Poll ceiling; with the 500ms default this bounds the check at
    /// roughly 15 seconds wall-clock.
    pub max_attempts: u32,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            premium_enabled: false,
            poll_interval: Duration::from_millis(500),
            max_attempts: 30,
        }
    }
}

/// Client implementing the host's registrar operation set against the
/// HostUp reseller API.
pub struct HostupClient<T: Transport> {
    transport: T,
    products: ProductCache,
}

impl HostupClient<HttpTransport> {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> HostupClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            products: ProductCache::new(),
        }
    }

    /// Use a caller-owned product cache, e.g. one with a TTL.
    pub fn with_product_cache(transport: T, products: ProductCache) -> Self {
        Self {
            transport,
            products,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ─── Register / transfer / renew ───────────────────────────────

    /// Place a registration order and verify the domain actually came
    /// through. PENDING/IN_PROGRESS/PROCESSING passes as a pending
    /// success; the host will pick the final state up on sync.
    pub async fn register_domain(&self, order: &OrderRequest) -> Result<OrderOutcome> {
        let raw = self.place_order("register", order).await?;
        self.verify_order(order, raw, true).await
    }

    /// Place a transfer order. Unlike registration, only ACTIVE/OK
    /// counts as success here.
    pub async fn transfer_domain(&self, order: &OrderRequest) -> Result<OrderOutcome> {
        let raw = self.place_order("transfer", order).await?;
        self.verify_order(order, raw, false).await
    }

    pub async fn renew_domain(&self, fqdn: &str) -> Result<Value> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;
        self.transport
            .call(
                Method::POST,
                &format!("/api/domain-renew/{domain_id}"),
                None,
                &[],
            )
            .await
    }

    async fn place_order(&self, kind: &str, order: &OrderRequest) -> Result<Value> {
        let product_id = self
            .products
            .product_id(&self.transport, &order.tld)
            .await?;

        let nameservers: Vec<String> = order
            .nameservers
            .iter()
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty())
            .take(5)
            .collect();

        let contact = contact_payload(&order.contact);
        let mut cart_item = json!({
            "type": kind,
            "domain": order.domain(),
            "productId": product_id,
            "years": order.years.max(1),
            "nameserverOption": (if nameservers.is_empty() { "default" } else { "custom" }),
            "nameservers": nameservers,
            "registrantContact": contact,
        });
        if kind == "transfer" {
            cart_item["eppCode"] = Value::String(order.epp_code.clone().unwrap_or_default());
        }

        let payload = json!({
            "clientData": client_data_payload(&order.contact),
            "cartItems": [cart_item],
            "attemptKey": format!("{kind}-{}", Uuid::new_v4()),
        });

        debug!(kind, domain = %order.domain(), "placing order");
        self.transport
            .call(Method::POST, "/api/create-order", Some(payload), &[])
            .await
    }

    /// An accepted order is not proof of a provisioned domain; confirm
    /// it exists and check its status before reporting success.
    async fn verify_order(
        &self,
        order: &OrderRequest,
        raw: Value,
        allow_pending: bool,
    ) -> Result<OrderOutcome> {
        let domain = order.domain();
        let domain_id = find_domain_id(&self.transport, &domain)
            .await
            .map_err(|e| Error::Api {
                message: format!("Order created, but domain not found: {e}"),
                status: None,
            })?;

        let details = self.fetch_details(&domain_id).await?;
        let status = details
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_uppercase();
        let order_id = details.get("order_id").and_then(opaque_id);

        if matches!(status.as_str(), "ACTIVE" | "OK") {
            return Ok(OrderOutcome {
                pending: false,
                order_id,
                status,
                raw,
            });
        }

        if allow_pending && matches!(status.as_str(), "PENDING" | "IN_PROGRESS" | "PROCESSING") {
            debug!(%domain, %status, "order accepted, domain still provisioning");
            return Ok(OrderOutcome {
                pending: true,
                order_id,
                status,
                raw,
            });
        }

        let mut message = format!("Domain not active (status: {status})");
        if let Some(order_id) = &order_id {
            message.push_str(&format!(" - Hostup order {order_id}"));
        }
        Err(Error::Api {
            message,
            status: None,
        })
    }

    // ─── Sync ──────────────────────────────────────────────────────

    /// Normalise the upstream status and expiry into the host's
    /// lifecycle model. Expiry doubles as the next due date.
    pub async fn sync(&self, fqdn: &str) -> Result<SyncResult> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;
        let details = self.fetch_details(&domain_id).await?;

        let raw_status = details.get("status").and_then(Value::as_str).unwrap_or("");
        let expiry = normalize_expiry(&details);

        Ok(SyncResult {
            status: lifecycle_status(raw_status),
            next_due_date: expiry.clone(),
            expiry_date: expiry,
        })
    }

    pub async fn auto_renew_sync(&self, fqdn: &str) -> Result<SyncResult> {
        self.sync(fqdn).await
    }

    /// Poll an inbound transfer. Unrecognised statuses fail with the
    /// raw status as the reason.
    pub async fn transfer_sync(&self, fqdn: &str) -> Result<TransferSyncResult> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;
        let details = self.fetch_details(&domain_id).await?;

        let raw_status = details.get("status").and_then(Value::as_str).unwrap_or("");
        match transfer_progress(raw_status) {
            TransferProgress::Completed => Ok(TransferSyncResult::Completed {
                expiry_date: normalize_expiry(&details),
            }),
            TransferProgress::Pending => Ok(TransferSyncResult::Pending),
            TransferProgress::Failed { reason } => {
                warn!(fqdn, reason = %reason, "transfer failed");
                Ok(TransferSyncResult::Failed { reason })
            }
        }
    }

    /// Canonical record for the host domain model.
    pub async fn domain_information(&self, fqdn: &str) -> Result<DomainInformation> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;
        let details = self.fetch_details(&domain_id).await?;

        let status = details
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("ACTIVE")
            .to_uppercase();
        let transfer_lock = details
            .get("reglock")
            .or_else(|| details.get("registry_autorenew"))
            .map(flag_is_set)
            .unwrap_or(false);
        let id_protection = details
            .get("idprotection")
            .map(flag_is_set)
            .unwrap_or(false);

        Ok(DomainInformation {
            domain: fqdn.to_string(),
            nameservers: extract_nameservers(&details),
            status,
            transfer_lock,
            id_protection,
            expiry_date: normalize_expiry(&details),
        })
    }

    // ─── Nameservers ───────────────────────────────────────────────

    pub async fn get_nameservers(&self, fqdn: &str) -> Result<Vec<String>> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;
        let details = self.fetch_details(&domain_id).await?;
        Ok(extract_nameservers(&details))
    }

    pub async fn save_nameservers(&self, fqdn: &str, nameservers: &[String]) -> Result<()> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;

        let nameservers: Vec<String> = nameservers
            .iter()
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty())
            .take(5)
            .collect();
        if nameservers.len() < 2 {
            return Err(Error::Validation(
                "At least two nameservers are required".to_string(),
            ));
        }

        self.transport
            .call(
                Method::POST,
                &format!("/api/domains/{domain_id}/nameservers"),
                Some(json!({ "nameservers": nameservers })),
                &[],
            )
            .await?;
        Ok(())
    }

    // ─── Contacts ──────────────────────────────────────────────────

    /// Registrant contact, with the identification number exposed in
    /// display form on TLDs whose registry requires one.
    pub async fn get_contact_details(&self, fqdn: &str) -> Result<RegistrantContact> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;
        let data = self
            .transport
            .call(
                Method::GET,
                &format!("/api/domain-contacts/{domain_id}"),
                None,
                &[],
            )
            .await?;

        let contacts = data.get("contacts").cloned().unwrap_or(Value::Null);
        let contact = contacts.get("registrant").unwrap_or(&contacts);

        let field = |key: &str| -> String {
            contact
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };

        let identification_number = if tld_supports_orgno(tld_of(fqdn)) {
            let orgno = contact.get("orgno").and_then(Value::as_str).unwrap_or("");
            Some(format_for_display(orgno))
        } else {
            None
        };

        Ok(RegistrantContact {
            first_name: field("firstname"),
            last_name: field("lastname"),
            company_name: field("companyname"),
            email: field("email"),
            address1: field("address1"),
            address2: field("address2"),
            city: field("city"),
            state: field("state"),
            postcode: field("postcode"),
            country: field("country"),
            phone_number: field("phonenumber"),
            identification_number,
        })
    }

    pub async fn save_contact_details(&self, fqdn: &str, contact: &RegistrantContact) -> Result<()> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;

        let mut update = json!({
            "firstname": contact.first_name,
            "lastname": contact.last_name,
            "companyname": contact.company_name,
            "email": contact.email,
            "address1": contact.address1,
            "city": contact.city,
            "state": contact.state,
            "postcode": contact.postcode,
            "country": contact.country,
            "phonenumber": contact.phone_number,
        });

        let tld = tld_of(fqdn);
        if tld_supports_orgno(tld) {
            if let Some(orgno) = &contact.identification_number {
                update["orgno"] = Value::String(format_for_api(orgno, tld));
            }
        }

        self.transport
            .call(
                Method::POST,
                &format!("/api/domain-contacts/{domain_id}"),
                Some(json!({ "updateContactInfo": update })),
                &[],
            )
            .await?;
        Ok(())
    }

    // ─── EPP ───────────────────────────────────────────────────────

    pub async fn get_epp_code(&self, fqdn: &str) -> Result<String> {
        let domain_id = find_domain_id(&self.transport, fqdn).await?;
        let data = self
            .transport
            .call(
                Method::POST,
                &format!("/api/domain-epp/{domain_id}"),
                None,
                &[],
            )
            .await?;

        Ok(data
            .get("epp_code")
            .or_else(|| data.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string())
    }

    // ─── Availability ──────────────────────────────────────────────

    /// Queued availability check: submit a job, then poll at a fixed
    /// interval up to the attempt ceiling, exiting early once the job
    /// completes or any results appear. Poll-call failures are skipped,
    /// not fatal; an empty result at the ceiling is a timeout.
    pub async fn check_availability(
        &self,
        search_term: &str,
        tlds: &[String],
        options: &CheckOptions,
    ) -> Result<Vec<SearchResult>> {
        let tlds: Vec<String> = tlds
            .iter()
            .map(|tld| format!(".{}", tld.trim_start_matches('.')))
            .collect();

        let data = self
            .transport
            .call(
                Method::POST,
                "/api/domain-check",
                Some(json!({ "sld": search_term, "tlds": tlds })),
                &[],
            )
            .await?;

        let job_id = data
            .get("jobId")
            .and_then(opaque_id)
            .ok_or_else(|| Error::Api {
                message: "Domain check job not created".to_string(),
                status: None,
            })?;

        let mut results: Vec<Value> = Vec::new();
        for _ in 0..options.max_attempts {
            tokio::time::sleep(options.poll_interval).await;

            let status = match self
                .transport
                .call(
                    Method::GET,
                    &format!("/api/domain-check/{job_id}"),
                    None,
                    &[],
                )
                .await
            {
                Ok(data) => data,
                Err(e) => {
                    debug!(job_id = %job_id, error = %e, "poll attempt failed, retrying");
                    continue;
                }
            };

            let job_status = status
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("pending");
            results = status
                .get("results")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            if job_status == "completed" || !results.is_empty() {
                break;
            }
        }

        if results.is_empty() {
            return Err(Error::Timeout(
                "Domain availability check timed out - please try again",
            ));
        }

        Ok(results
            .iter()
            .filter_map(|item| search_result(item, options.premium_enabled))
            .collect())
    }

    // ─── DNS ───────────────────────────────────────────────────────

    /// Fetch the zone's records in host shape, filtered to the types
    /// the host UI can manage.
    pub async fn get_dns(&self, fqdn: &str) -> Result<Vec<HostRecord>> {
        let (zone_id, zone_domain) = self.lookup_zone(fqdn).await?;
        let records = self.fetch_zone_records(&zone_id).await?;

        Ok(records
            .iter()
            .filter(|record| {
                record
                    .get("type")
                    .and_then(Value::as_str)
                    .is_some_and(is_manageable_dns_type)
            })
            .map(|record| host_record_from_remote(record, &zone_domain))
            .collect())
    }

    /// Reconcile the host's desired record set against the zone.
    pub async fn save_dns(&self, fqdn: &str, desired: &[HostRecord]) -> Result<ReconcileSummary> {
        let (zone_id, zone_domain) = self.lookup_zone(fqdn).await?;
        let current = self.fetch_zone_records(&zone_id).await?;
        let summary =
            reconcile_zone(&self.transport, &zone_id, &zone_domain, &current, desired).await?;
        debug!(
            fqdn,
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            "zone reconciled"
        );
        Ok(summary)
    }

    /// Resolve the zone id and apex for a domain. The id is ephemeral
    /// to one operation.
    async fn lookup_zone(&self, fqdn: &str) -> Result<(String, String)> {
        let data = self
            .transport
            .call(Method::GET, &format!("/api/dns/domain/{fqdn}"), None, &[])
            .await?;

        let zone = data.get("zone").unwrap_or(&data);
        let zone_id = zone
            .get("id")
            .or_else(|| zone.get("domain_id"))
            .or_else(|| zone.get("zoneId"))
            .and_then(opaque_id)
            .ok_or_else(|| Error::NotFound("DNS zone not found for domain".to_string()))?;
        let zone_domain = zone
            .get("domain")
            .and_then(Value::as_str)
            .unwrap_or(fqdn)
            .to_string();

        Ok((zone_id, zone_domain))
    }

    async fn fetch_zone_records(&self, zone_id: &str) -> Result<Vec<Value>> {
        let data = self
            .transport
            .call(
                Method::GET,
                &format!("/api/dns/zones/{zone_id}/records"),
                None,
                &[],
            )
            .await?;

        let records = data
            .get("zone")
            .and_then(|zone| zone.get("records"))
            .or_else(|| data.get("records"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(records)
    }

    async fn fetch_details(&self, domain_id: &str) -> Result<Value> {
        let data = self
            .transport
            .call(
                Method::GET,
                &format!("/api/domain-details/{domain_id}"),
                None,
                &[],
            )
            .await?;
        Ok(data.get("details").cloned().unwrap_or(data))
    }

    // ─── Unsupported pass-through stubs ────────────────────────────

    pub fn get_registrar_lock(&self) -> Result<bool> {
        Err(Error::Unsupported(
            "Registrar lock management is not supported via API",
        ))
    }

    pub fn save_registrar_lock(&self) -> Result<()> {
        Err(Error::Unsupported(
            "Registrar lock management is not supported via API",
        ))
    }

    pub fn id_protect_toggle(&self) -> Result<()> {
        Err(Error::Unsupported(
            "ID protection toggle is not supported by HostUp API",
        ))
    }

    pub fn request_delete(&self) -> Result<()> {
        Err(Error::Unsupported("Domain deletion is not exposed via API"))
    }

    pub fn register_nameserver(&self) -> Result<()> {
        Err(Error::Unsupported(
            "Child nameserver registration is not supported via API",
        ))
    }

    pub fn modify_nameserver(&self) -> Result<()> {
        Err(Error::Unsupported(
            "Child nameserver modification is not supported via API",
        ))
    }

    pub fn delete_nameserver(&self) -> Result<()> {
        Err(Error::Unsupported(
            "Child nameserver deletion is not supported via API",
        ))
    }

    pub fn tld_pricing(&self) -> Result<()> {
        Err(Error::Unsupported(
            "TLD pricing is managed in HostUp; configure pricing manually",
        ))
    }

    pub fn resend_irtp_verification(&self) -> Result<()> {
        Err(Error::Unsupported("IRTP verification not applicable"))
    }

    /// Suggestions are not offered upstream; an empty list keeps the
    /// host's search surface functional.
    pub fn domain_suggestions(&self) -> Vec<SearchResult> {
        Vec::new()
    }
}

/// TLD portion of an FQDN (everything after the first dot).
fn tld_of(fqdn: &str) -> &str {
    fqdn.split_once('.').map(|(_, tld)| tld).unwrap_or("")
}

/// "1" in any of the API's flag spellings: string, number or bool.
fn flag_is_set(value: &Value) -> bool {
    match value {
        Value::String(s) => s == "1",
        Value::Number(n) => n.as_i64() == Some(1),
        Value::Bool(b) => *b,
        _ => false,
    }
}

/// Nameservers from the details record: the explicit array when
/// present, otherwise the `ns1`..`ns5` fields. Capped at 5 entries.
fn extract_nameservers(details: &Value) -> Vec<String> {
    if let Some(list) = details.get("nameservers").and_then(Value::as_array) {
        let cleaned: Vec<String> = list
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .map(str::to_string)
            .take(5)
            .collect();
        if !cleaned.is_empty() {
            return cleaned;
        }
    }

    (1..=5)
        .filter_map(|i| details.get(format!("ns{i}")))
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|ns| !ns.is_empty())
        .map(str::to_string)
        .collect()
}

fn contact_payload(contact: &RegistrantContact) -> Value {
    json!({
        "type": (if contact.is_organisation() { "organisation" } else { "private" }),
        "firstname": contact.first_name,
        "lastname": contact.last_name,
        "companyname": contact.company_name,
        "orgno": contact.identification_number.clone().unwrap_or_default(),
        "address1": contact.address1,
        "address2": contact.address2,
        "city": contact.city,
        "state": contact.state,
        "postcode": contact.postcode,
        "country": contact.country,
        "email": contact.email,
        "phonenumber": contact.phone_number,
    })
}

/// Client account payload for order creation. The upstream API creates
/// or matches the client on its side; the generated password is
/// single-use.
fn client_data_payload(contact: &RegistrantContact) -> Value {
    let password = Uuid::new_v4().simple().to_string();
    json!({
        "firstname": contact.first_name,
        "lastname": contact.last_name,
        "email": contact.email,
        "password": password,
        "passwordConfirm": password,
        "companyname": contact.company_name,
        "address1": contact.address1,
        "address2": contact.address2,
        "city": contact.city,
        "state": contact.state,
        "postcode": contact.postcode,
        "country": contact.country,
        "phonenumber": contact.phone_number,
        "orgno": contact.identification_number.clone().unwrap_or_default(),
        "accountType": (if contact.is_organisation() { "organisation" } else { "private" }),
    })
}

/// Map one availability result item into the host's shape. Items
/// without a splittable domain name are dropped.
fn search_result(item: &Value, premium_enabled: bool) -> Option<SearchResult> {
    let domain = item.get("domain").and_then(Value::as_str)?;
    let (sld, tld) = domain.split_once('.')?;

    let availability = match item
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "available" => Availability::NotRegistered,
        "registered" | "unavailable" => Availability::Registered,
        "reserved" => Availability::Reserved,
        _ => Availability::TldNotSupported,
    };

    let premium = if premium_enabled
        && item
            .get("premium")
            .map(|v| v.as_bool().unwrap_or(false) || v.as_i64().unwrap_or(0) != 0)
            .unwrap_or(false)
    {
        Some(PremiumPricing {
            register: price_of(item, "price", "register"),
            renew: price_of(item, "renewalPrice", "renew"),
            currency: "SEK".to_string(),
        })
    } else {
        None
    };

    Some(SearchResult {
        sld: sld.to_string(),
        tld: tld.to_string(),
        availability,
        premium,
    })
}

/// Price from the top-level field, falling back to the first-year
/// period table.
fn price_of(item: &Value, field: &str, period_kind: &str) -> f64 {
    let direct = item.get(field).and_then(value_as_f64);
    let fallback = item
        .get("periods")
        .and_then(|p| p.get("1"))
        .and_then(|p| p.get(period_kind))
        .and_then(value_as_f64);
    direct.or(fallback).unwrap_or(0.0)
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tld_extraction() {
        assert_eq!(tld_of("example.se"), "se");
        assert_eq!(tld_of("www.example.co.uk"), "example.co.uk");
        assert_eq!(tld_of("localhost"), "");
    }

    #[test]
    fn flags_accept_mixed_shapes() {
        assert!(flag_is_set(&json!("1")));
        assert!(flag_is_set(&json!(1)));
        assert!(flag_is_set(&json!(true)));
        assert!(!flag_is_set(&json!("0")));
        assert!(!flag_is_set(&json!(null)));
    }

    #[test]
    fn nameservers_prefer_explicit_array() {
        let details = json!({
            "nameservers": ["ns1.hostup.se", " ", "ns2.hostup.se"],
            "ns1": "ignored.example.se",
        });
        assert_eq!(
            extract_nameservers(&details),
            vec!["ns1.hostup.se", "ns2.hostup.se"]
        );
    }

    #[test]
    fn nameservers_fall_back_to_numbered_fields() {
        let details = json!({"ns1": "ns1.hostup.se", "ns3": "ns3.hostup.se"});
        assert_eq!(
            extract_nameservers(&details),
            vec!["ns1.hostup.se", "ns3.hostup.se"]
        );
    }

    #[test]
    fn nameservers_cap_at_five() {
        let details = json!({"nameservers": ["a", "b", "c", "d", "e", "f"]});
        assert_eq!(extract_nameservers(&details).len(), 5);
    }

    #[test]
    fn search_result_maps_statuses() {
        let item = json!({"domain": "example.se", "status": "available"});
        let result = search_result(&item, false).unwrap();
        assert_eq!(result.sld, "example");
        assert_eq!(result.tld, "se");
        assert_eq!(result.availability, Availability::NotRegistered);

        let item = json!({"domain": "example.se", "status": "unavailable"});
        assert_eq!(
            search_result(&item, false).unwrap().availability,
            Availability::Registered
        );

        let item = json!({"domain": "nodot", "status": "available"});
        assert!(search_result(&item, false).is_none());
    }

    #[test]
    fn premium_pricing_falls_back_to_periods() {
        let item = json!({
            "domain": "example.se",
            "status": "available",
            "premium": true,
            "periods": {"1": {"register": "499.00", "renew": 399}},
        });
        let result = search_result(&item, true).unwrap();
        let premium = result.premium.unwrap();
        assert_eq!(premium.register, 499.0);
        assert_eq!(premium.renew, 399.0);
        assert_eq!(premium.currency, "SEK");
    }

    #[test]
    fn premium_ignored_when_disabled() {
        let item = json!({"domain": "example.se", "status": "available", "premium": true});
        assert!(search_result(&item, false).unwrap().premium.is_none());
    }

    #[test]
    fn organisation_contact_payload() {
        let contact = RegistrantContact {
            company_name: "Example AB".to_string(),
            identification_number: Some("[SE]556677-8899".to_string()),
            ..Default::default()
        };
        let payload = contact_payload(&contact);
        assert_eq!(payload["type"], "organisation");
        assert_eq!(payload["orgno"], "[SE]556677-8899");
    }
}

//! HostUp domain reseller API adapter.
//!
//! Translates the HostUp REST API into the operation set a
//! domain-management host expects: registration, transfers, renewals,
//! lifecycle sync, nameserver/contact management, EPP codes,
//! availability checking and DNS zone reconciliation.
//!
//! The interesting parts are [`dns`] (minimal-diff reconciliation with
//! system-record protection), [`status`] (lifecycle and expiry
//! normalisation) and [`orgno`] (identification-number formatting for
//! Nordic registries). Everything talks to the API through the
//! [`transport::Transport`] trait, so tests drive the whole stack with
//! a mock.

pub mod client;
pub mod config;
pub mod dns;
pub mod error;
pub mod orgno;
pub mod products;
pub mod resolver;
pub mod status;
pub mod transport;
pub mod types;

pub use client::{CheckOptions, HostupClient};
pub use config::Config;
pub use error::{Error, Result};
pub use types::{
    Availability, DomainInformation, DomainStatus, HostRecord, OrderOutcome, OrderRequest,
    RegistrantContact, SearchResult, SyncResult, TransferSyncResult,
};

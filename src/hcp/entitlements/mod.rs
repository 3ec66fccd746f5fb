//! Organization entitlements - feature flags that gate API access

mod api;
mod models;

pub use models::{Entitlement, EntitlementSet};

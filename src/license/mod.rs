//! License aggregation: ordering, filtering and bucketing of resolved manifests.
//!
//! - [`collect`] — stable name sort plus reference filtering.
//! - [`group`] — buckets collected manifests by license key into [`LicenseGroups`].

pub mod collect;
pub mod group;

pub use collect::collect;
pub use group::{group, LicenseGroup, LicenseGroups};

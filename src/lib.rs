// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site provisioning for NetBox
//!
//! Creates a new site's inventory records (site, one rack per zone, PE
//! switches and servers) through an [`InventoryRepository`] and returns a
//! CSV summary of the site's devices.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod provisioner;
pub mod report;
pub mod repository;

// Re-export commonly used types
pub use domain::{slugify, DeviceTypeRef, Zone};
pub use errors::{ProvisionError, ProvisionResult};
pub use provisioner::{JobLog, ProvisionOutcome, ProvisionRequest, SiteProvisioner};
pub use report::render_csv;
pub use repository::{DryRunRepository, InMemoryRepository, InventoryRepository};

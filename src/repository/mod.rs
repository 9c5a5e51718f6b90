// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory Repository - the seam between provisioning and the DCIM store
//!
//! Provisioning never talks to a database or an HTTP API directly. It is
//! handed an [`InventoryRepository`] and asks it to create and look up
//! records. The store owns validation and persistence.
//!
//! # Implementations
//!
//! - [`InMemoryRepository`] - process-local store with NetBox-like uniqueness rules
//! - [`DryRunRepository`] - wraps another repository, reads pass through, writes are simulated
//! - `NetBoxClient` (feature `netbox`) - NetBox REST API
//!
//! # Example Implementation
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use netbox_site_provisioner::domain::*;
//! use netbox_site_provisioner::repository::InventoryRepository;
//! use netbox_site_provisioner::{ProvisionError, ProvisionResult};
//!
//! struct ReadOnly;
//!
//! #[async_trait]
//! impl InventoryRepository for ReadOnly {
//!     async fn create_site(&mut self, site: NewSite) -> ProvisionResult<Site> {
//!         Err(ProvisionError::DuplicateOrInvalidName(site.name))
//!     }
//!     async fn create_rack(&mut self, rack: NewRack) -> ProvisionResult<Rack> {
//!         Err(ProvisionError::DuplicateOrInvalidName(rack.name))
//!     }
//!     async fn create_device(&mut self, device: NewDevice) -> ProvisionResult<Device> {
//!         Err(ProvisionError::DuplicateOrInvalidName(device.name))
//!     }
//!     async fn find_site_by_slug(&self, _slug: &str) -> ProvisionResult<Option<Site>> {
//!         Ok(None)
//!     }
//!     async fn find_role_by_name(&self, name: &str) -> ProvisionResult<DeviceRole> {
//!         Err(ProvisionError::MissingRole(name.to_string()))
//!     }
//!     async fn find_device_type(&self, reference: &DeviceTypeRef) -> ProvisionResult<DeviceType> {
//!         Err(ProvisionError::MissingDeviceType(reference.to_string()))
//!     }
//!     async fn list_devices_by_site(&self, _site_id: u64) -> ProvisionResult<Vec<Device>> {
//!         Ok(Vec::new())
//!     }
//!     fn name(&self) -> &str {
//!         "read-only"
//!     }
//! }
//! ```

pub mod dry_run;
pub mod memory;

pub use dry_run::DryRunRepository;
pub use memory::InMemoryRepository;

use async_trait::async_trait;

use crate::domain::{
    slugify, Device, DeviceRole, DeviceType, DeviceTypeRef, NewDevice, NewRack, NewSite, Rack,
    Site,
};
use crate::errors::ProvisionResult;

/// Capabilities provisioning needs from the inventory store
///
/// Implementations must:
/// - reject creates that violate the store's uniqueness rules with
///   `DuplicateOrInvalidName`
/// - report absent roles as `MissingRole`
/// - return devices of a site in a stable order (creation order)
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Persist a new site
    async fn create_site(&mut self, site: NewSite) -> ProvisionResult<Site>;

    /// Persist a new rack inside an existing site
    async fn create_rack(&mut self, rack: NewRack) -> ProvisionResult<Rack>;

    /// Persist a new device inside an existing site and rack
    async fn create_device(&mut self, device: NewDevice) -> ProvisionResult<Device>;

    /// Look up an existing site by slug
    async fn find_site_by_slug(&self, slug: &str) -> ProvisionResult<Option<Site>>;

    /// Look up a device role by exact name
    async fn find_role_by_name(&self, name: &str) -> ProvisionResult<DeviceRole>;

    /// Resolve an operator-supplied device type reference
    async fn find_device_type(&self, reference: &DeviceTypeRef) -> ProvisionResult<DeviceType>;

    /// All devices of a site in the store's stable order
    async fn list_devices_by_site(&self, site_id: u64) -> ProvisionResult<Vec<Device>>;

    /// Normalize a display name into a slug
    fn slugify(&self, name: &str) -> String {
        slugify(name)
    }

    /// Name of this repository, for logs
    fn name(&self) -> &str;
}

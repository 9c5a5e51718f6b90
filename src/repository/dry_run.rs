// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dry-run wrapper
//!
//! Lookups (sites, roles, device types) go to the wrapped repository so a
//! dry run still fails when the real store lacks a role or already holds a
//! site with the same slug. Creates never reach the wrapped repository; they
//! are kept in a local overlay and listed back in creation order.

use async_trait::async_trait;
use tracing::info;

use super::InventoryRepository;
use crate::domain::{
    Device, DeviceRole, DeviceType, DeviceTypeRef, NewDevice, NewRack, NewSite, Rack, Site,
};
use crate::errors::{ProvisionError, ProvisionResult};

pub struct DryRunRepository<R> {
    inner: R,
    next_id: u64,
    sites: Vec<Site>,
    racks: Vec<Rack>,
    devices: Vec<Device>,
}

impl<R: InventoryRepository> DryRunRepository<R> {
    pub fn new(inner: R) -> Self {
        info!("Dry run: nothing will be written to {}", inner.name());
        Self {
            inner,
            next_id: 0,
            sites: Vec::new(),
            racks: Vec::new(),
            devices: Vec::new(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Number of records that would have been created
    pub fn simulated_count(&self) -> usize {
        self.sites.len() + self.racks.len() + self.devices.len()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl<R: InventoryRepository> InventoryRepository for DryRunRepository<R> {
    async fn create_site(&mut self, site: NewSite) -> ProvisionResult<Site> {
        if let Some(existing) = self.inner.find_site_by_slug(&site.slug).await? {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "site with slug {} already exists in {} (id {})",
                existing.slug,
                self.inner.name(),
                existing.id
            )));
        }
        if self.sites.iter().any(|s| s.slug == site.slug || s.name == site.name) {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "site {} already simulated",
                site.name
            )));
        }
        let created = Site {
            id: self.allocate_id(),
            name: site.name,
            slug: site.slug,
            status: site.status,
        };
        self.sites.push(created.clone());
        Ok(created)
    }

    async fn create_rack(&mut self, rack: NewRack) -> ProvisionResult<Rack> {
        if self
            .racks
            .iter()
            .any(|r| r.site_id == rack.site_id && r.name == rack.name)
        {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "rack {} already simulated",
                rack.name
            )));
        }
        let created = Rack {
            id: self.allocate_id(),
            name: rack.name,
            slug: rack.slug,
            site_id: rack.site_id,
            status: rack.status,
        };
        self.racks.push(created.clone());
        Ok(created)
    }

    async fn create_device(&mut self, device: NewDevice) -> ProvisionResult<Device> {
        if self
            .devices
            .iter()
            .any(|d| d.site_id == device.site_id && d.name == device.name)
        {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "device {} already simulated",
                device.name
            )));
        }
        let created = Device {
            id: self.allocate_id(),
            name: device.name,
            device_type: device.device_type,
            site_id: device.site_id,
            rack_id: Some(device.rack_id),
            status: device.status,
            role: device.role,
        };
        self.devices.push(created.clone());
        Ok(created)
    }

    async fn find_site_by_slug(&self, slug: &str) -> ProvisionResult<Option<Site>> {
        if let Some(site) = self.sites.iter().find(|s| s.slug == slug) {
            return Ok(Some(site.clone()));
        }
        self.inner.find_site_by_slug(slug).await
    }

    async fn find_role_by_name(&self, name: &str) -> ProvisionResult<DeviceRole> {
        self.inner.find_role_by_name(name).await
    }

    async fn find_device_type(&self, reference: &DeviceTypeRef) -> ProvisionResult<DeviceType> {
        self.inner.find_device_type(reference).await
    }

    async fn list_devices_by_site(&self, site_id: u64) -> ProvisionResult<Vec<Device>> {
        Ok(self
            .devices
            .iter()
            .filter(|d| d.site_id == site_id)
            .cloned()
            .collect())
    }

    fn slugify(&self, name: &str) -> String {
        self.inner.slugify(name)
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}

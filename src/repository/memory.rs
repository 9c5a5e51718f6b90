// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory inventory store
//!
//! Applies the same uniqueness rules NetBox enforces on the records
//! provisioning touches:
//!
//! - site names and site slugs are unique
//! - rack names are unique within a site
//! - device names are unique within a site
//! - references (site, rack, role, device type) must exist
//!
//! Devices are listed in creation order.

use async_trait::async_trait;
use tracing::debug;

use super::InventoryRepository;
use crate::domain::{
    slugify, Device, DeviceRole, DeviceType, DeviceTypeRef, Manufacturer, NewDevice, NewRack,
    NewSite, Rack, Site,
};
use crate::errors::{ProvisionError, ProvisionResult};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    next_id: u64,
    sites: Vec<Site>,
    racks: Vec<Rack>,
    devices: Vec<Device>,
    roles: Vec<DeviceRole>,
    device_types: Vec<DeviceType>,
    creates: usize,
    fail_creates_after: Option<usize>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the `pe` and `csvr` roles
    pub fn with_default_roles() -> Self {
        let mut repo = Self::new();
        repo.add_role(crate::domain::PE_ROLE);
        repo.add_role(crate::domain::SERVER_ROLE);
        repo
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Seed a device role
    pub fn add_role(&mut self, name: &str) -> DeviceRole {
        let role = DeviceRole {
            id: self.allocate_id(),
            name: name.to_string(),
            slug: slugify(name),
        };
        self.roles.push(role.clone());
        role
    }

    /// Seed a device type, creating its manufacturer record on the fly
    pub fn add_device_type(&mut self, manufacturer: &str, model: &str) -> DeviceType {
        let existing = self
            .device_types
            .iter()
            .map(|t| &t.manufacturer)
            .find(|m| m.name == manufacturer)
            .cloned();
        let manufacturer = match existing {
            Some(found) => found,
            None => Manufacturer {
                id: self.allocate_id(),
                name: manufacturer.to_string(),
                slug: slugify(manufacturer),
            },
        };
        let device_type = DeviceType {
            id: self.allocate_id(),
            manufacturer,
            model: model.to_string(),
            slug: slugify(model),
        };
        self.device_types.push(device_type.clone());
        device_type
    }

    /// Make every create after the first `count` fail as if the store went away
    pub fn fail_creates_after(&mut self, count: usize) {
        self.fail_creates_after = Some(count);
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn racks(&self) -> &[Rack] {
        &self.racks
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Number of successful creates so far
    pub fn create_count(&self) -> usize {
        self.creates
    }

    fn check_available(&self) -> ProvisionResult<()> {
        match self.fail_creates_after {
            Some(limit) if self.creates >= limit => Err(ProvisionError::HostCommunication(
                "in-memory store unavailable".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn require_site(&self, site_id: u64) -> ProvisionResult<&Site> {
        self.sites.iter().find(|s| s.id == site_id).ok_or_else(|| {
            ProvisionError::DuplicateOrInvalidName(format!("site {} does not exist", site_id))
        })
    }
}

#[async_trait]
impl InventoryRepository for InMemoryRepository {
    async fn create_site(&mut self, site: NewSite) -> ProvisionResult<Site> {
        self.check_available()?;

        if site.name.trim().is_empty() || site.slug.is_empty() {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "site name {:?} produces an empty name or slug",
                site.name
            )));
        }
        if self.sites.iter().any(|s| s.name == site.name) {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "site with name {} already exists",
                site.name
            )));
        }
        if self.sites.iter().any(|s| s.slug == site.slug) {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "site with slug {} already exists",
                site.slug
            )));
        }

        let created = Site {
            id: self.allocate_id(),
            name: site.name,
            slug: site.slug,
            status: site.status,
        };
        debug!("In-memory store created site {} (id {})", created.name, created.id);
        self.sites.push(created.clone());
        self.creates += 1;
        Ok(created)
    }

    async fn create_rack(&mut self, rack: NewRack) -> ProvisionResult<Rack> {
        self.check_available()?;
        self.require_site(rack.site_id)?;

        if rack.name.trim().is_empty() {
            return Err(ProvisionError::DuplicateOrInvalidName(
                "rack name is empty".to_string(),
            ));
        }
        if self
            .racks
            .iter()
            .any(|r| r.site_id == rack.site_id && r.name == rack.name)
        {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "rack {} already exists in site {}",
                rack.name, rack.site_id
            )));
        }

        let created = Rack {
            id: self.allocate_id(),
            name: rack.name,
            slug: rack.slug,
            site_id: rack.site_id,
            status: rack.status,
        };
        debug!("In-memory store created rack {} (id {})", created.name, created.id);
        self.racks.push(created.clone());
        self.creates += 1;
        Ok(created)
    }

    async fn create_device(&mut self, device: NewDevice) -> ProvisionResult<Device> {
        self.check_available()?;
        self.require_site(device.site_id)?;

        if !self
            .racks
            .iter()
            .any(|r| r.id == device.rack_id && r.site_id == device.site_id)
        {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "rack {} does not belong to site {}",
                device.rack_id, device.site_id
            )));
        }
        if !self.roles.iter().any(|r| r.id == device.role.id) {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "device role {} does not exist",
                device.role.name
            )));
        }
        if !self.device_types.iter().any(|t| t.id == device.device_type.id) {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "device type {} does not exist",
                device.device_type
            )));
        }
        if self
            .devices
            .iter()
            .any(|d| d.site_id == device.site_id && d.name == device.name)
        {
            return Err(ProvisionError::DuplicateOrInvalidName(format!(
                "device {} already exists in site {}",
                device.name, device.site_id
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
        debug!("In-memory store created device {} (id {})", created.name, created.id);
        self.devices.push(created.clone());
        self.creates += 1;
        Ok(created)
    }

    async fn find_site_by_slug(&self, slug: &str) -> ProvisionResult<Option<Site>> {
        Ok(self.sites.iter().find(|s| s.slug == slug).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> ProvisionResult<DeviceRole> {
        self.roles
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| ProvisionError::MissingRole(name.to_string()))
    }

    async fn find_device_type(&self, reference: &DeviceTypeRef) -> ProvisionResult<DeviceType> {
        self.device_types
            .iter()
            .find(|t| match reference {
                DeviceTypeRef::Id(id) => t.id == *id,
                DeviceTypeRef::Slug(slug) => t.slug == *slug,
            })
            .cloned()
            .ok_or_else(|| ProvisionError::MissingDeviceType(reference.to_string()))
    }

    async fn list_devices_by_site(&self, site_id: u64) -> ProvisionResult<Vec<Device>> {
        Ok(self
            .devices
            .iter()
            .filter(|d| d.site_id == site_id)
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Provisioner
//!
//! Creates the inventory records of a new site through an
//! [`InventoryRepository`] and renders the CSV device report.
//!
//! # Flow
//!
//! ```text
//! create site (planned)
//!   for zone in [a, b]:
//!     create rack      {site}_{zone}1
//!     lookup role pe
//!     create switches  pe{i}{zone}1.{site}
//!     lookup role csvr
//!     create servers   csvr{i}{zone}1.{site_slug}
//! list devices of site → CSV report
//! ```
//!
//! # Failure Semantics
//!
//! The first error aborts the run. Records created before the error stay in
//! the store; nothing is rolled back.
//!
//! # Example
//!
//! ```rust
//! use netbox_site_provisioner::provisioner::{ProvisionRequest, SiteProvisioner};
//! use netbox_site_provisioner::repository::InMemoryRepository;
//!
//! # tokio_test::block_on(async {
//! let mut repo = InMemoryRepository::with_default_roles();
//! let switch = repo.add_device_type("Arista", "DCS-7050X3");
//! let server = repo.add_device_type("Dell", "PowerEdge R750");
//!
//! let mut provisioner = SiteProvisioner::new(repo);
//! let outcome = provisioner
//!     .provision(&ProvisionRequest {
//!         site_name: "foo12".to_string(),
//!         pe_switch_count: 1,
//!         pe_switch_model: switch,
//!         server_count: 1,
//!         server_model: server,
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(outcome.report.lines().count(), 5);
//! # });
//! ```

pub mod job_log;
pub mod request;

pub use job_log::{JobLog, LogEntry, LogLevel};
pub use request::ProvisionRequest;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    device_indices, rack_name, server_name, switch_name, Device, DeviceRole, DeviceType,
    NewDevice, NewRack, NewSite, Rack, Site, Status, Zone, PE_ROLE, SERVER_ROLE,
};
use crate::errors::ProvisionResult;
use crate::report::render_csv;
use crate::repository::InventoryRepository;

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionOutcome {
    pub site: Site,
    /// Racks in zone order
    pub racks: Vec<Rack>,
    /// Devices in creation order
    pub devices: Vec<Device>,
    /// CSV device report as listed back by the store
    pub report: String,
}

pub struct SiteProvisioner<R> {
    repository: R,
    log: JobLog,
}

impl<R: InventoryRepository> SiteProvisioner<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            log: JobLog::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn log(&self) -> &JobLog {
        &self.log
    }

    pub fn into_parts(self) -> (R, JobLog) {
        (self.repository, self.log)
    }

    /// Provision a site, its two racks and their devices
    pub async fn provision(
        &mut self,
        request: &ProvisionRequest,
    ) -> ProvisionResult<ProvisionOutcome> {
        info!(
            "Provisioning site {} via {} ({} switches, {} servers per zone)",
            request.site_name,
            self.repository.name(),
            request.pe_switch_count,
            request.server_count
        );

        match self.run(request).await {
            Ok(outcome) => {
                info!(
                    "Provisioned site {}: {} racks, {} devices",
                    outcome.site,
                    outcome.racks.len(),
                    outcome.devices.len()
                );
                Ok(outcome)
            }
            Err(e) => {
                self.log.failure(format!(
                    "Provisioning of site {} aborted ({}): {}",
                    request.site_name,
                    e.kind(),
                    e
                ));
                Err(e)
            }
        }
    }

    async fn run(&mut self, request: &ProvisionRequest) -> ProvisionResult<ProvisionOutcome> {
        let slug = self.repository.slugify(&request.site_name);
        let site = self
            .repository
            .create_site(NewSite {
                name: request.site_name.clone(),
                slug,
                status: Status::Planned,
            })
            .await?;
        self.log.success(format!("Created new site: {}", site));

        let mut racks = Vec::with_capacity(Zone::ALL.len());
        let mut devices = Vec::new();

        for zone in Zone::ALL {
            let name = rack_name(&request.site_name, zone);
            let slug = self.repository.slugify(&name);
            let rack = self
                .repository
                .create_rack(NewRack {
                    name,
                    slug,
                    site_id: site.id,
                    status: Status::Planned,
                })
                .await?;
            self.log.success(format!("Created new rack: {}", rack));

            let switch_role = self.repository.find_role_by_name(PE_ROLE).await?;
            for i in device_indices(request.pe_switch_count) {
                let name = switch_name(i, zone, &request.site_name);
                let switch = self
                    .create_device(name, &request.pe_switch_model, &site, &rack, &switch_role)
                    .await?;
                self.log.success(format!("Created new switch: {}", switch));
                devices.push(switch);
            }

            let server_role = self.repository.find_role_by_name(SERVER_ROLE).await?;
            for i in device_indices(request.server_count) {
                let name = server_name(i, zone, &site.slug);
                let server = self
                    .create_device(name, &request.server_model, &site, &rack, &server_role)
                    .await?;
                self.log.success(format!("Created new server: {}", server));
                devices.push(server);
            }

            racks.push(rack);
        }

        let inventory = self.repository.list_devices_by_site(site.id).await?;
        debug!("Site {} lists {} devices", site, inventory.len());
        let report = render_csv(&inventory);

        Ok(ProvisionOutcome {
            site,
            racks,
            devices,
            report,
        })
    }

    async fn create_device(
        &mut self,
        name: String,
        device_type: &DeviceType,
        site: &Site,
        rack: &Rack,
        role: &DeviceRole,
    ) -> ProvisionResult<Device> {
        self.repository
            .create_device(NewDevice {
                name,
                device_type: device_type.clone(),
                site_id: site.id,
                rack_id: rack.id,
                status: Status::Planned,
                role: role.clone(),
            })
            .await
    }
}

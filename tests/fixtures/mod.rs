// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for netbox-site-provisioner
//!
//! Provides deterministic stores and requests for provisioning tests.
//!
//! # Design Principles
//! - Every store is built here, seeded with the same catalog
//! - Tests change the catalog only through the helpers below

#![allow(dead_code)]

use netbox_site_provisioner::domain::{DeviceType, PE_ROLE, SERVER_ROLE};
use netbox_site_provisioner::{InMemoryRepository, ProvisionRequest};

pub const SWITCH_MAKE: &str = "Arista";
pub const SWITCH_MODEL: &str = "DCS-7050X3";
pub const SERVER_MAKE: &str = "Dell";
pub const SERVER_MODEL: &str = "PowerEdge R750";

/// Catalog entries every seeded store carries
pub struct Catalog {
    pub switch: DeviceType,
    pub server: DeviceType,
}

fn seed(repo: &mut InMemoryRepository) -> Catalog {
    Catalog {
        switch: repo.add_device_type(SWITCH_MAKE, SWITCH_MODEL),
        server: repo.add_device_type(SERVER_MAKE, SERVER_MODEL),
    }
}

/// Store with both roles and the switch/server models
pub fn seeded_repository() -> (InMemoryRepository, Catalog) {
    let mut repo = InMemoryRepository::with_default_roles();
    let catalog = seed(&mut repo);
    (repo, catalog)
}

/// Store with only the given roles and the switch/server models
pub fn repository_with_roles(roles: &[&str]) -> (InMemoryRepository, Catalog) {
    let mut repo = InMemoryRepository::new();
    for role in roles {
        repo.add_role(role);
    }
    let catalog = seed(&mut repo);
    (repo, catalog)
}

pub fn without_pe_role() -> (InMemoryRepository, Catalog) {
    repository_with_roles(&[SERVER_ROLE])
}

pub fn without_server_role() -> (InMemoryRepository, Catalog) {
    repository_with_roles(&[PE_ROLE])
}

pub fn request(
    catalog: &Catalog,
    site_name: &str,
    pe_switch_count: i64,
    server_count: i64,
) -> ProvisionRequest {
    ProvisionRequest {
        site_name: site_name.to_string(),
        pe_switch_count,
        pe_switch_model: catalog.switch.clone(),
        server_count,
        server_model: catalog.server.clone(),
    }
}

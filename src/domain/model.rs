// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory records
//!
//! Shapes of the DCIM records this crate creates or reads. The records are
//! owned and persisted by the inventory store; ids are assigned by it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status shared by sites, racks and devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Planned,
    Staging,
    Active,
    Decommissioning,
    Retired,
    Offline,
    Failed,
    Inventory,
}

impl Status {
    /// Value used on the NetBox API
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Planned => "planned",
            Status::Staging => "staging",
            Status::Active => "active",
            Status::Decommissioning => "decommissioning",
            Status::Retired => "retired",
            Status::Offline => "offline",
            Status::Failed => "failed",
            Status::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical or logical location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub status: Status,
}

/// Equipment rack inside a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub site_id: u64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// Hardware model from the device catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: u64,
    pub manufacturer: Manufacturer,
    pub model: String,
    pub slug: String,
}

/// Functional classification of a device, e.g. `pe` or `csvr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRole {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// Switch or server assigned to a site and rack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    pub name: String,
    pub device_type: DeviceType,
    pub site_id: u64,
    pub rack_id: Option<u64>,
    pub status: Status,
    pub role: DeviceRole,
}

/// Request to create a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    pub name: String,
    pub slug: String,
    pub status: Status,
}

/// Request to create a rack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRack {
    pub name: String,
    pub slug: String,
    pub site_id: u64,
    pub status: Status,
}

/// Request to create a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub device_type: DeviceType,
    pub site_id: u64,
    pub rack_id: u64,
    pub status: Status,
    pub role: DeviceRole,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.manufacturer.name, self.model)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Reference to a device type as given by an operator
///
/// All-digit input is a NetBox id, anything else is a slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceTypeRef {
    Id(u64),
    Slug(String),
}

impl FromStr for DeviceTypeRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("device type reference is empty".to_string());
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            s.parse()
                .map(DeviceTypeRef::Id)
                .map_err(|e| format!("invalid device type id {}: {}", s, e))
        } else {
            Ok(DeviceTypeRef::Slug(s.to_string()))
        }
    }
}

impl fmt::Display for DeviceTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceTypeRef::Id(id) => write!(f, "#{}", id),
            DeviceTypeRef::Slug(slug) => f.write_str(slug),
        }
    }
}

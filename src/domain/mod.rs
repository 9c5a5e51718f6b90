// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Provisioning Domain
//!
//! Pure pieces of provisioning with no I/O:
//!
//! - [`slugify`] - display name to URL-safe slug
//! - [`Zone`] and the naming functions - rack, switch and server names
//! - [`Site`], [`Rack`], [`Device`], ... - inventory record shapes

pub mod model;
pub mod naming;
pub mod slug;

pub use model::{
    Device, DeviceRole, DeviceType, DeviceTypeRef, Manufacturer, NewDevice, NewRack, NewSite,
    Rack, Site, Status,
};
pub use naming::{
    device_indices, rack_name, server_name, switch_name, Zone, PE_ROLE, SERVER_ROLE,
};
pub use slug::{is_slug, slugify};

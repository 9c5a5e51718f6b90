// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory store adapters
//!
//! Concrete implementations of the InventoryRepository trait for external
//! DCIM systems.

#[cfg(feature = "netbox")]
pub mod netbox;

#[cfg(feature = "netbox")]
pub use netbox::{NetBoxClient, NetBoxConfig};

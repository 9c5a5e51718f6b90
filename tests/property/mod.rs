// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of the naming convention and of complete provisioning runs
//! that must hold for every site name and device count.

mod naming_properties;
mod provisioning_properties;

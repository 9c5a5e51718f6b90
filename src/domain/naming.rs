// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site naming convention
//!
//! Every site is split into two zones, `a` and `b`, each holding one rack:
//!
//! ```text
//! site    foo12
//! rack    foo12_a1            {site_name}_{zone}1
//! switch  pe1a1.foo12         pe{i}{zone}1.{site_name}
//! server  csvr1a1.foo12       csvr{i}{zone}1.{site_slug}
//! ```
//!
//! Switches interpolate the raw site name while servers interpolate the
//! site's lowercased slug. The two only agree when the site name is
//! already a slug.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role name for provider edge switches
pub const PE_ROLE: &str = "pe";

/// Role name for servers
pub const SERVER_ROLE: &str = "csvr";

/// Logical subdivision of a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    A,
    B,
}

impl Zone {
    /// Zones in provisioning order
    pub const ALL: [Zone; 2] = [Zone::A, Zone::B];

    pub fn label(&self) -> &'static str {
        match self {
            Zone::A => "a",
            Zone::B => "b",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rack name for a zone, e.g. `foo12_a1`
pub fn rack_name(site_name: &str, zone: Zone) -> String {
    format!("{}_{}1", site_name, zone)
}

/// PE switch name, e.g. `pe1a1.foo12`
pub fn switch_name(index: i64, zone: Zone, site_name: &str) -> String {
    format!("{}{}{}1.{}", PE_ROLE, index, zone, site_name)
}

/// Server name, e.g. `csvr1a1.foo12`
///
/// `site_slug` is lowercased here regardless of what the store returned.
pub fn server_name(index: i64, zone: Zone, site_slug: &str) -> String {
    format!("{}{}{}1.{}", SERVER_ROLE, index, zone, site_slug.to_lowercase())
}

/// Indices for `count` devices: `1..=count`, empty when `count <= 0`
pub fn device_indices(count: i64) -> impl Iterator<Item = i64> {
    1..=count
}

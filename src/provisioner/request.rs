// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning parameters

use serde::{Deserialize, Serialize};

use crate::domain::DeviceType;
use crate::errors::{ProvisionError, ProvisionResult};

/// Parameters of one provisioning run
///
/// Counts are signed; a count of zero or below creates no devices of that
/// kind. [`ProvisionRequest::validate`] is the caller's check and is not
/// repeated inside provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    /// Name of the new site, e.g. `foo12`
    pub site_name: String,
    pub pe_switch_count: i64,
    pub pe_switch_model: DeviceType,
    pub server_count: i64,
    pub server_model: DeviceType,
}

impl ProvisionRequest {
    /// Check the parameters before handing them to the provisioner
    pub fn validate(&self) -> ProvisionResult<()> {
        if self.site_name.trim().is_empty() {
            return Err(ProvisionError::Configuration(
                "site name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Devices a successful run creates across both zones
    pub fn expected_device_count(&self) -> usize {
        let per_zone = self
            .pe_switch_count
            .max(0)
            .saturating_add(self.server_count.max(0));
        usize::try_from(per_zone)
            .unwrap_or(usize::MAX)
            .saturating_mul(crate::domain::Zone::ALL.len())
    }
}

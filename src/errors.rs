// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for site provisioning

use thiserror::Error;

/// Errors that can occur while provisioning a site
///
/// Every variant is fatal: a run stops at the first error and nothing that
/// was already created is rolled back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    /// The inventory store rejected a create (duplicate slug, bad reference, ...)
    #[error("Duplicate or invalid name: {0}")]
    DuplicateOrInvalidName(String),

    /// A required device role does not exist
    #[error("Device role not found: {0}")]
    MissingRole(String),

    /// A device type reference did not resolve
    #[error("Device type not found: {0}")]
    MissingDeviceType(String),

    /// The inventory store could not be reached or answered unexpectedly
    #[error("Host communication failure: {0}")]
    HostCommunication(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProvisionError {
    /// Short machine-friendly kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ProvisionError::DuplicateOrInvalidName(_) => "duplicate_or_invalid_name",
            ProvisionError::MissingRole(_) => "missing_role",
            ProvisionError::MissingDeviceType(_) => "missing_device_type",
            ProvisionError::HostCommunication(_) => "host_communication",
            ProvisionError::Serialization(_) => "serialization",
            ProvisionError::Configuration(_) => "configuration",
        }
    }
}

/// Result type for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

impl From<serde_json::Error> for ProvisionError {
    fn from(err: serde_json::Error) -> Self {
        ProvisionError::Serialization(err.to_string())
    }
}

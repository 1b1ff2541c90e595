//! PCI device and passthrough domain types.

use serde::{Deserialize, Serialize};

/// PCI device as reported in a host's hardware inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PciDevice {
    /// Bus address (e.g., "0000:02:00.0")
    pub id: String,

    /// Vendor name (e.g., "NVIDIA Corporation")
    pub vendor_name: String,

    /// Bus address of the parent bridge
    pub parent_bridge: String,
}

/// Passthrough capability and state of one device.
///
/// The service is expected to report `active => enabled => capable`, but
/// nothing here relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PassthruFlags {
    pub capable: bool,
    pub enabled: bool,
    pub active: bool,
}

/// Passthrough info entry of a host, keyed by device id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PciPassthruInfo {
    pub id: String,
    pub passthru_capable: bool,
    pub passthru_enabled: bool,
    pub passthru_active: bool,
}

impl PciPassthruInfo {
    pub fn flags(&self) -> PassthruFlags {
        PassthruFlags {
            capable: self.passthru_capable,
            enabled: self.passthru_enabled,
            active: self.passthru_active,
        }
    }
}

/// Derived passthrough status of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassthruStatus {
    /// No passthrough info, or the device cannot be passed through
    NotCapable,

    /// Capable but not configured for passthrough
    Disabled,

    /// Configured for passthrough
    Enabled,

    /// Passed through to a running guest
    Active,
}

impl PassthruStatus {
    /// Status for a device given its info entry, if any.
    ///
    /// Active is checked before enabled before capable, so the result follows
    /// the state hierarchy even when the reported flags are inconsistent.
    pub fn from_flags(flags: Option<PassthruFlags>) -> Self {
        match flags {
            Some(f) if f.active => Self::Active,
            Some(f) if f.enabled => Self::Enabled,
            Some(f) if f.capable => Self::Disabled,
            _ => Self::NotCapable,
        }
    }
}

impl std::fmt::Display for PassthruStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotCapable => write!(f, "Not Capable"),
            Self::Disabled => write!(f, "Disabled"),
            Self::Enabled => write!(f, "Enabled"),
            Self::Active => write!(f, "Active"),
        }
    }
}

/// Passthrough configuration change submitted to the management service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassthruConfigChange {
    pub id: String,
    pub passthru_enabled: bool,
}

//! Host domain types.

use serde::{Deserialize, Serialize};

/// Managed object type of a host.
pub const HOST_SYSTEM_TYPE: &str = "HostSystem";

/// Opaque reference to a host managed object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostRef {
    /// Managed object type (e.g., "HostSystem")
    #[serde(rename = "type")]
    pub kind: String,

    /// Managed object id (e.g., "host-21")
    pub value: String,
}

impl HostRef {
    /// Reference to a `HostSystem` object with the given id.
    pub fn host_system(value: impl Into<String>) -> Self {
        Self { kind: HOST_SYSTEM_TYPE.to_string(), value: value.into() }
    }
}

impl std::fmt::Display for HostRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Summary properties of a host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostSummary {
    /// Configured host name
    pub name: String,
}

/// Property paths of a host the passthrough commands read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostProperty {
    Summary,
    PciDevice,
    PciPassthruInfo,
}

impl HostProperty {
    /// Properties fetched by both the inventory reader and the toggle.
    pub const PASSTHRU: [HostProperty; 3] =
        [HostProperty::Summary, HostProperty::PciDevice, HostProperty::PciPassthruInfo];

    /// Property path as understood by the management service.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::PciDevice => "hardware.pciDevice",
            Self::PciPassthruInfo => "config.pciPassthruInfo",
        }
    }
}

impl std::fmt::Display for HostProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Snapshot of a host's passthrough-related properties.
///
/// Properties that were not requested or not reported are left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSystem {
    pub reference: HostRef,
    pub summary: Option<HostSummary>,
    #[serde(default)]
    pub pci_devices: Vec<super::PciDevice>,
    #[serde(default)]
    pub pci_passthru_info: Vec<super::PciPassthruInfo>,
}

impl HostSystem {
    /// Display name of the host, falling back to the managed object id.
    pub fn name(&self) -> &str {
        match &self.summary {
            Some(summary) if !summary.name.is_empty() => &summary.name,
            _ => &self.reference.value,
        }
    }
}

//! Type conversions between domain types and protobuf types.

use crate::error::ServiceError;
use crate::types::{
    HostRef, HostSummary, HostSystem, PassthruConfigChange, PciDevice, PciPassthruInfo,
};

// Re-export proto types for convenience
pub use ptctl_api::ptctl::v1;

// Type aliases for proto types
type ProtoRef = v1::ManagedObjectReference;
type ProtoHostSystem = v1::HostSystem;
type ProtoPciDevice = v1::PciDevice;
type ProtoPassthruInfo = v1::PciPassthruInfo;
type ProtoPassthruConfig = v1::PciPassthruConfig;

// ============================================================================
// Host Conversions
// ============================================================================

impl From<HostRef> for ProtoRef {
    fn from(host: HostRef) -> Self {
        Self { r#type: host.kind, value: host.value }
    }
}

impl From<&HostRef> for ProtoRef {
    fn from(host: &HostRef) -> Self {
        host.clone().into()
    }
}

impl TryFrom<ProtoRef> for HostRef {
    type Error = ServiceError;

    fn try_from(proto: ProtoRef) -> std::result::Result<Self, Self::Error> {
        if proto.value.is_empty() {
            return Err(ServiceError::InvalidResponse {
                reason: "managed object reference without a value".to_string(),
            });
        }
        Ok(Self { kind: proto.r#type, value: proto.value })
    }
}

impl TryFrom<ProtoHostSystem> for HostSystem {
    type Error = ServiceError;

    fn try_from(proto: ProtoHostSystem) -> std::result::Result<Self, Self::Error> {
        let reference = proto
            .reference
            .ok_or_else(|| ServiceError::InvalidResponse {
                reason: "host record without a reference".to_string(),
            })?
            .try_into()?;

        Ok(Self {
            reference,
            summary: proto.summary.map(|s| HostSummary { name: s.name }),
            pci_devices: proto.pci_device.into_iter().map(Into::into).collect(),
            pci_passthru_info: proto.pci_passthru_info.into_iter().map(Into::into).collect(),
        })
    }
}

// ============================================================================
// PCI Conversions
// ============================================================================

impl From<ProtoPciDevice> for PciDevice {
    fn from(proto: ProtoPciDevice) -> Self {
        Self { id: proto.id, vendor_name: proto.vendor_name, parent_bridge: proto.parent_bridge }
    }
}

impl From<ProtoPassthruInfo> for PciPassthruInfo {
    fn from(proto: ProtoPassthruInfo) -> Self {
        Self {
            id: proto.id,
            passthru_capable: proto.passthru_capable,
            passthru_enabled: proto.passthru_enabled,
            passthru_active: proto.passthru_active,
        }
    }
}

impl From<PassthruConfigChange> for ProtoPassthruConfig {
    fn from(change: PassthruConfigChange) -> Self {
        Self { id: change.id, passthru_enabled: change.passthru_enabled }
    }
}

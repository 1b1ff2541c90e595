//! Correlation of a host's device list with its passthrough info.

use crate::types::{HostSystem, PassthruStatus, PciDevice, PciPassthruInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Passthrough status of every device, in device-list order.
///
/// Devices without an info entry are not capable. Duplicate info ids are
/// resolved in favour of the last entry.
pub fn correlate(devices: &[PciDevice], infos: &[PciPassthruInfo]) -> Vec<PassthruStatus> {
    let by_id: HashMap<&str, &PciPassthruInfo> =
        infos.iter().map(|info| (info.id.as_str(), info)).collect();

    devices
        .iter()
        .map(|device| PassthruStatus::from_flags(by_id.get(device.id.as_str()).map(|i| i.flags())))
        .collect()
}

/// A device with its derived passthrough status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePassthru {
    pub id: String,
    pub vendor_name: String,
    pub parent_bridge: String,
    pub status: PassthruStatus,
}

/// Per-device passthrough status of one host.
pub fn device_statuses(host: &HostSystem) -> Vec<DevicePassthru> {
    let statuses = correlate(&host.pci_devices, &host.pci_passthru_info);

    host.pci_devices
        .iter()
        .zip(statuses)
        .map(|(device, status)| DevicePassthru {
            id: device.id.clone(),
            vendor_name: device.vendor_name.clone(),
            parent_bridge: device.parent_bridge.clone(),
            status,
        })
        .collect()
}

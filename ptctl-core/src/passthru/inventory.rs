//! Passthrough inventory report.

use super::status::{device_statuses, DevicePassthru};
use crate::types::{HostRef, HostSystem, PassthruStatus};
use serde::{Deserialize, Serialize};

/// Passthrough status of every device of one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPassthruReport {
    pub name: String,
    pub reference: HostRef,
    pub devices: Vec<DevicePassthru>,
}

impl From<&HostSystem> for HostPassthruReport {
    fn from(host: &HostSystem) -> Self {
        Self {
            name: host.name().to_string(),
            reference: host.reference.clone(),
            devices: device_statuses(host),
        }
    }
}

/// One line of the flattened report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassthruReportRow {
    pub host_name: String,
    pub device_id: String,
    pub vendor_name: String,
    pub parent_bridge: String,
    pub status: PassthruStatus,
}

/// Passthrough report over a set of hosts.
///
/// Hosts appear in the order the service returned them, devices in
/// device-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassthruReport {
    pub hosts: Vec<HostPassthruReport>,
}

impl PassthruReport {
    pub fn from_hosts(hosts: &[HostSystem]) -> Self {
        Self { hosts: hosts.iter().map(HostPassthruReport::from).collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn rows(&self) -> Vec<PassthruReportRow> {
        self.hosts
            .iter()
            .flat_map(|host| {
                host.devices.iter().map(move |device| PassthruReportRow {
                    host_name: host.name.clone(),
                    device_id: device.id.clone(),
                    vendor_name: device.vendor_name.clone(),
                    parent_bridge: device.parent_bridge.clone(),
                    status: device.status,
                })
            })
            .collect()
    }
}

//! In-memory management service for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ptctl_core::{
    HostLocator, HostProperty, HostRef, HostSummary, HostSystem, InventoryService,
    PassthruConfigChange, PassthruUpdater, PciDevice, PciPassthruInfo, ServiceError,
    ServiceResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock service (doesn't require a management server).
///
/// Updates are applied to the in-memory hosts so later fetches see them.
#[derive(Default)]
pub struct MockService {
    hosts: Mutex<Vec<HostSystem>>,
    updates: Mutex<Vec<(HostRef, Vec<PassthruConfigChange>)>>,
    fetch_calls: AtomicUsize,
    update_calls: AtomicUsize,
    locator_calls: AtomicUsize,
    fail_fetch: Option<ServiceError>,
    fail_update: Option<ServiceError>,
    /// Hosts exist in the finder but not in property retrieval
    hide_from_fetch: bool,
}

impl MockService {
    pub fn new(hosts: Vec<HostSystem>) -> Self {
        Self { hosts: Mutex::new(hosts), ..Default::default() }
    }

    pub fn failing_fetch(mut self, err: ServiceError) -> Self {
        self.fail_fetch = Some(err);
        self
    }

    pub fn failing_update(mut self, err: ServiceError) -> Self {
        self.fail_update = Some(err);
        self
    }

    pub fn hidden_from_fetch(mut self) -> Self {
        self.hide_from_fetch = true;
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Calls of any kind, finder included.
    pub fn total_calls(&self) -> usize {
        self.fetch_calls() + self.update_calls() + self.locator_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<(HostRef, Vec<PassthruConfigChange>)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn info(&self, host: &str, id: &str) -> Option<PciPassthruInfo> {
        let hosts = self.hosts.lock().unwrap();
        hosts
            .iter()
            .find(|h| h.reference.value == host)
            .and_then(|h| h.pci_passthru_info.iter().find(|i| i.id == id).cloned())
    }
}

#[async_trait]
impl InventoryService for MockService {
    async fn retrieve_hosts(
        &self,
        refs: &[HostRef],
        properties: &[HostProperty],
    ) -> ServiceResult<Vec<HostSystem>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_fetch {
            return Err(err.clone());
        }
        if self.hide_from_fetch {
            return Ok(Vec::new());
        }

        let hosts = self.hosts.lock().unwrap();
        Ok(hosts
            .iter()
            .filter(|h| refs.contains(&h.reference))
            .map(|h| HostSystem {
                reference: h.reference.clone(),
                summary: if properties.contains(&HostProperty::Summary) {
                    h.summary.clone()
                } else {
                    None
                },
                pci_devices: if properties.contains(&HostProperty::PciDevice) {
                    h.pci_devices.clone()
                } else {
                    Vec::new()
                },
                pci_passthru_info: if properties.contains(&HostProperty::PciPassthruInfo) {
                    h.pci_passthru_info.clone()
                } else {
                    Vec::new()
                },
            })
            .collect())
    }
}

#[async_trait]
impl PassthruUpdater for MockService {
    async fn update_passthru_config(
        &self,
        host: &HostRef,
        changes: &[PassthruConfigChange],
    ) -> ServiceResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_update {
            return Err(err.clone());
        }

        let mut hosts = self.hosts.lock().unwrap();
        let record = hosts
            .iter_mut()
            .find(|h| &h.reference == host)
            .ok_or_else(|| ServiceError::Fault {
                code: "ManagedObjectNotFound".to_string(),
                message: host.to_string(),
            })?;
        for change in changes {
            if let Some(info) = record.pci_passthru_info.iter_mut().find(|i| i.id == change.id) {
                info.passthru_enabled = change.passthru_enabled;
            }
        }

        self.updates.lock().unwrap().push((host.clone(), changes.to_vec()));
        Ok(())
    }
}

#[async_trait]
impl HostLocator for MockService {
    async fn find_hosts(&self, names: &[String]) -> ServiceResult<Vec<HostRef>> {
        self.locator_calls.fetch_add(1, Ordering::SeqCst);
        let hosts = self.hosts.lock().unwrap();
        let mut found = Vec::new();
        for name in names {
            let matches: Vec<HostRef> = hosts
                .iter()
                .filter(|h| name == "*" || h.name() == name.as_str())
                .map(|h| h.reference.clone())
                .collect();
            if matches.is_empty() {
                return Err(ServiceError::Fault {
                    code: "NotFound".to_string(),
                    message: format!("host '{}' not found", name),
                });
            }
            found.extend(matches);
        }
        Ok(found)
    }

    async fn list_hosts(&self) -> ServiceResult<Vec<HostRef>> {
        self.locator_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.hosts.lock().unwrap().iter().map(|h| h.reference.clone()).collect())
    }
}

/// Host with one device per `(id, capable, enabled, active)` entry.
///
/// Devices with `capable == None` have no passthrough info at all.
pub fn host(value: &str, name: &str, devices: &[(&str, Option<(bool, bool, bool)>)]) -> HostSystem {
    HostSystem {
        reference: HostRef::host_system(value),
        summary: Some(HostSummary { name: name.to_string() }),
        pci_devices: devices
            .iter()
            .map(|(id, _)| PciDevice {
                id: id.to_string(),
                vendor_name: "NVIDIA Corporation".to_string(),
                parent_bridge: "0000:00:01.0".to_string(),
            })
            .collect(),
        pci_passthru_info: devices
            .iter()
            .filter_map(|(id, flags)| {
                flags.map(|(capable, enabled, active)| PciPassthruInfo {
                    id: id.to_string(),
                    passthru_capable: capable,
                    passthru_enabled: enabled,
                    passthru_active: active,
                })
            })
            .collect(),
    }
}

pub fn addrs(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

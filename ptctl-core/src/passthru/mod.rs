//! PCI passthrough inventory and toggling on managed hosts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PCI Passthrough                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PassthruManager                                            │
//! │  ├── list() - Device table with passthrough status          │
//! │  └── toggle() - Flip passthrough on requested devices       │
//! │                                                             │
//! │  status::correlate()                                        │
//! │  └── Join device list with passthru info by device id       │
//! │                                                             │
//! │  toggle::plan_toggle()                                      │
//! │  └── Validate all requested devices before any update       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Safety
//!
//! - **All or nothing**: the update is sent only after every requested
//!   device was found and is passthrough capable. A failed validation issues
//!   no update call at all.
//!
//! - **One update**: all changes for a host go out in a single call. The
//!   update is not retried and not re-checked afterwards.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ptctl_core::passthru::PassthruManager;
//!
//! let manager = PassthruManager::new(service, HostSelector::new(Some("esx-01".into())));
//!
//! let report = manager.list(&[]).await?;
//! let changes = manager.toggle(&["0000:02:00.0".to_string()]).await?;
//! ```

pub mod address;
pub mod inventory;
pub mod status;
pub mod toggle;

pub use address::{is_valid_pci_address, RequestedAddressSet};
pub use inventory::{HostPassthruReport, PassthruReport, PassthruReportRow};
pub use status::{correlate, DevicePassthru};
pub use toggle::plan_toggle;

use crate::error::{PassthruError, Result};
use crate::host::{HostResolution, HostSelector};
use crate::service::ManagementService;
use crate::types::{HostProperty, HostRef, HostSystem, PassthruConfigChange};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Runs passthrough commands against the management service.
pub struct PassthruManager {
    service: Arc<dyn ManagementService>,
    selector: HostSelector,
}

impl PassthruManager {
    pub fn new(service: Arc<dyn ManagementService>, selector: HostSelector) -> Self {
        Self { service, selector }
    }

    /// Passthrough status of every PCI device on the target hosts.
    ///
    /// Targets are the explicit host if one was named; otherwise `names`, or,
    /// when `names` is empty, the single host the session sees. No targets
    /// yields an empty report.
    #[instrument(skip(self))]
    pub async fn list(&self, names: &[String]) -> Result<PassthruReport> {
        let targets = self.resolve_targets(names).await?;
        if targets.is_empty() {
            debug!("No target hosts, nothing to list");
            return Ok(PassthruReport::default());
        }

        let hosts = self.fetch(&targets).await?;
        let report = PassthruReport::from_hosts(&hosts);

        info!(
            hosts = report.hosts.len(),
            devices = report.hosts.iter().map(|h| h.devices.len()).sum::<usize>(),
            "Listed PCI passthrough status"
        );
        Ok(report)
    }

    /// Flip passthrough enablement of every device in `addresses` on the
    /// target host, in one update. Returns the changes that were applied.
    #[instrument(skip(self))]
    pub async fn toggle(&self, addresses: &[String]) -> Result<Vec<PassthruConfigChange>> {
        let mut requested = RequestedAddressSet::new(addresses)?;

        let host_ref = self.selector.resolve(&*self.service).await?.into_host()?;
        let host = self
            .fetch(std::slice::from_ref(&host_ref))
            .await?
            .into_iter()
            .find(|h| h.reference == host_ref)
            .ok_or_else(|| PassthruError::HostNotFound { host: host_ref.value.clone() })?;

        let changes = plan_toggle(&host, &mut requested)?;

        info!(host = %host.name(), devices = changes.len(), "Updating PCI passthrough config");
        self.service.update_passthru_config(&host.reference, &changes).await.map_err(|e| {
            warn!(host = %host.name(), error = %e, "Passthrough update failed");
            PassthruError::RemoteUpdate { host: host.name().to_string(), source: e }
        })?;

        for change in &changes {
            info!(
                host = %host.name(),
                id = %change.id,
                enabled = change.passthru_enabled,
                "Toggled PCI passthrough"
            );
        }
        Ok(changes)
    }

    // --- Private helpers ---

    async fn resolve_targets(&self, names: &[String]) -> Result<Vec<HostRef>> {
        if let Some(host) = self.selector.resolve_explicit(&*self.service).await? {
            return Ok(vec![host]);
        }

        if names.is_empty() {
            let resolution = self.selector.resolve_implied(&*self.service).await?;
            if let HostResolution::Unresolved(reason) = &resolution {
                warn!(%reason, "No default host");
            }
            return Ok(resolution.host().cloned().into_iter().collect());
        }

        self.service
            .find_hosts(names)
            .await
            .map_err(|e| PassthruError::HostResolution { reason: e.to_string() })
    }

    async fn fetch(&self, refs: &[HostRef]) -> Result<Vec<HostSystem>> {
        debug!(hosts = refs.len(), "Retrieving host passthrough properties");
        self.service
            .retrieve_hosts(refs, &HostProperty::PASSTHRU)
            .await
            .map_err(PassthruError::RemoteFetch)
    }
}

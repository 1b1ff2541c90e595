//! Validation of a passthrough toggle request.

use super::address::RequestedAddressSet;
use crate::error::{PassthruError, Result};
use crate::types::{HostSystem, PassthruConfigChange};
use tracing::debug;

/// Build the config changes that flip passthrough on every requested device.
///
/// Info entries are scanned in service order and every entry for a requested
/// device is checked. One that is not capable aborts the scan at once, before
/// missing devices are reported. Duplicate entries yield a single change. Any
/// requested address without an info entry fails the whole request. Nothing
/// is returned unless every requested device can be toggled.
pub fn plan_toggle(
    host: &HostSystem,
    requested: &mut RequestedAddressSet,
) -> Result<Vec<PassthruConfigChange>> {
    let mut changes = Vec::with_capacity(requested.len());

    for info in &host.pci_passthru_info {
        if !requested.contains(&info.id) {
            continue;
        }
        if !info.passthru_capable {
            return Err(PassthruError::DeviceNotCapable {
                id: info.id.clone(),
                host: host.name().to_string(),
            });
        }
        if !requested.mark_found(&info.id) {
            debug!(id = %info.id, "Duplicate passthrough info entry, change already planned");
            continue;
        }
        changes.push(PassthruConfigChange {
            id: info.id.clone(),
            passthru_enabled: !info.passthru_enabled,
        });
    }

    if let Some(id) = requested.missing().next() {
        return Err(PassthruError::DeviceNotFound {
            id: id.to_string(),
            host: host.name().to_string(),
        });
    }

    Ok(changes)
}

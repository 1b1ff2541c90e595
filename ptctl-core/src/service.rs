//! Remote management service abstraction.
//!
//! The passthrough commands talk to the hypervisor management service through
//! these traits. The CLI implements them over gRPC; tests implement them in
//! memory.

use crate::error::ServiceError;
use crate::types::{HostProperty, HostRef, HostSystem, PassthruConfigChange};
use async_trait::async_trait;

/// Result of a call to the management service.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Property retrieval for host managed objects.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Fetch `properties` of every host in `refs` in one round trip.
    ///
    /// Hosts unknown to the service are omitted from the result. Records are
    /// returned in the order the service chooses.
    async fn retrieve_hosts(
        &self,
        refs: &[HostRef],
        properties: &[HostProperty],
    ) -> ServiceResult<Vec<HostSystem>>;
}

/// Passthrough configuration updates on one host.
#[async_trait]
pub trait PassthruUpdater: Send + Sync {
    /// Apply the whole batch of `changes` to `host` in one call.
    async fn update_passthru_config(
        &self,
        host: &HostRef,
        changes: &[PassthruConfigChange],
    ) -> ServiceResult<()>;
}

/// Host lookup in the service inventory.
#[async_trait]
pub trait HostLocator: Send + Sync {
    /// Resolve host names or inventory paths. A pattern may match several
    /// hosts; a name that matches nothing is an error.
    async fn find_hosts(&self, names: &[String]) -> ServiceResult<Vec<HostRef>>;

    /// Hosts matched by a single name or inventory path.
    async fn find_host(&self, name: &str) -> ServiceResult<Vec<HostRef>> {
        self.find_hosts(&[name.to_string()]).await
    }

    /// Every host visible to the session.
    async fn list_hosts(&self) -> ServiceResult<Vec<HostRef>>;
}

/// Everything the passthrough commands need from the management service.
pub trait ManagementService: InventoryService + PassthruUpdater + HostLocator {}

impl<T> ManagementService for T where T: InventoryService + PassthruUpdater + HostLocator {}

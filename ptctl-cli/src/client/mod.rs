//! gRPC client for the hypervisor management service

use anyhow::{Context, Result};
use async_trait::async_trait;
use ptctl_api::ptctl::v1::management_service_client::ManagementServiceClient;
use ptctl_api::ptctl::v1::*;
use ptctl_core::{
    Config, HostLocator, HostProperty, HostRef, HostSystem, InventoryService,
    PassthruConfigChange, PassthruUpdater, ServiceError, ServiceResult,
};
use std::path::PathBuf;
use tokio::net::UnixStream;
use tonic::transport::{Channel, Endpoint, Uri};
use tonic::Code;
use tower::service_fn;
use tracing::debug;

/// Management service gRPC client
#[derive(Clone)]
pub struct ManagementClient {
    client: ManagementServiceClient<Channel>,
}

impl ManagementClient {
    /// Connect to the configured endpoint, or to the local Unix socket when no
    /// endpoint is set.
    pub async fn connect(config: &Config) -> Result<Self> {
        let channel = match &config.endpoint {
            Some(url) => {
                debug!(endpoint = %url, "Connecting to management service");
                configure(Endpoint::from_shared(url.clone())?, config)
                    .connect()
                    .await
                    .with_context(|| {
                        format!("Failed to connect to management service at {}", url)
                    })?
            }
            None => {
                let socket_path = PathBuf::from(&config.socket_path);
                debug!(socket = %socket_path.display(), "Connecting to management service");

                // Create a dummy URI (required by tonic but not used for Unix sockets)
                let connector_path = socket_path.clone();
                configure(Endpoint::try_from("http://[::]:50051")?, config)
                    .connect_with_connector(service_fn(move |_: Uri| {
                        UnixStream::connect(connector_path.clone())
                    }))
                    .await
                    .with_context(|| {
                        format!(
                            "Failed to connect to {}. \
                             Set --endpoint or PTCTL_URL to reach a remote service.",
                            socket_path.display()
                        )
                    })?
            }
        };

        Ok(Self { client: ManagementServiceClient::new(channel) })
    }

    /// Check service health
    pub async fn health(&self) -> Result<(String, String)> {
        let request = tonic::Request::new(HealthRequest {});

        let response = self.client.clone().health(request).await?;
        let health = response.into_inner();

        Ok((health.status, health.version))
    }
}

fn configure(endpoint: Endpoint, config: &Config) -> Endpoint {
    let endpoint = endpoint.connect_timeout(config.connect_timeout());
    match config.request_timeout() {
        Some(timeout) => endpoint.timeout(timeout),
        None => endpoint,
    }
}

/// Map a gRPC status onto the service error taxonomy.
fn service_error(status: tonic::Status) -> ServiceError {
    match status.code() {
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
            ServiceError::Transport(status.message().to_string())
        }
        code => ServiceError::Fault {
            code: format!("{:?}", code),
            message: status.message().to_string(),
        },
    }
}

fn host_refs(refs: Vec<ManagedObjectReference>) -> ServiceResult<Vec<HostRef>> {
    refs.into_iter().map(HostRef::try_from).collect()
}

#[async_trait]
impl InventoryService for ManagementClient {
    async fn retrieve_hosts(
        &self,
        refs: &[HostRef],
        properties: &[HostProperty],
    ) -> ServiceResult<Vec<HostSystem>> {
        let request = tonic::Request::new(RetrieveHostsRequest {
            refs: refs.iter().map(Into::into).collect(),
            property_paths: properties.iter().map(|p| p.path().to_string()).collect(),
        });

        let response = self.client.clone().retrieve_hosts(request).await.map_err(service_error)?;
        response.into_inner().hosts.into_iter().map(HostSystem::try_from).collect()
    }
}

#[async_trait]
impl PassthruUpdater for ManagementClient {
    async fn update_passthru_config(
        &self,
        host: &HostRef,
        changes: &[PassthruConfigChange],
    ) -> ServiceResult<()> {
        let request = tonic::Request::new(UpdatePassthruConfigRequest {
            host: Some(host.into()),
            config: changes.iter().cloned().map(Into::into).collect(),
        });

        self.client.clone().update_passthru_config(request).await.map_err(service_error)?;
        Ok(())
    }
}

#[async_trait]
impl HostLocator for ManagementClient {
    async fn find_hosts(&self, names: &[String]) -> ServiceResult<Vec<HostRef>> {
        let request = tonic::Request::new(FindHostsRequest { names: names.to_vec() });

        let response = self.client.clone().find_hosts(request).await.map_err(service_error)?;
        host_refs(response.into_inner().refs)
    }

    async fn list_hosts(&self) -> ServiceResult<Vec<HostRef>> {
        let request = tonic::Request::new(ListHostsRequest {});

        let response = self.client.clone().list_hosts(request).await.map_err(service_error)?;
        host_refs(response.into_inner().refs)
    }
}

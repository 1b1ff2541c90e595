//! ptctl Core Library
//!
//! Types, service traits and logic for inventorying and toggling PCI
//! passthrough on hosts of a hypervisor management service.

pub mod config;
pub mod error;
pub mod host;
pub mod observability;
pub mod passthru;
pub mod paths;
pub mod proto_convert;
pub mod service;
pub mod types;

// Re-export commonly used items
pub use config::Config;
pub use error::{PassthruError, Result, ServiceError};
pub use host::{HostResolution, HostSelector, UnresolvedReason};
pub use observability::init as init_observability;
pub use passthru::{PassthruManager, PassthruReport, PassthruReportRow};
pub use service::{
    HostLocator, InventoryService, ManagementService, PassthruUpdater, ServiceResult,
};
pub use types::{
    HostProperty, HostRef, HostSummary, HostSystem, PassthruConfigChange, PassthruStatus,
    PciDevice, PciPassthruInfo,
};

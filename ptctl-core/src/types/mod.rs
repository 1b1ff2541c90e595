//! Core domain types for ptctl.

pub mod host;
pub mod pci;

// Re-exports
pub use host::{HostProperty, HostRef, HostSummary, HostSystem};
pub use pci::{PassthruConfigChange, PassthruFlags, PassthruStatus, PciDevice, PciPassthruInfo};

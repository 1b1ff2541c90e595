//! CLI command implementations

pub mod pci;

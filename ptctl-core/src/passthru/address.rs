//! Requested device addresses.

use crate::error::{PassthruError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::warn;

/// Regular expression for a PCI bus address: 0000:02:00.0
static PCI_ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{4}:[0-9a-fA-F]{2}:[0-9a-fA-F]{2}\.[0-7]$")
        .expect("Invalid PCI address regex")
});

/// Check whether `address` looks like a PCI bus address.
pub fn is_valid_pci_address(address: &str) -> bool {
    PCI_ADDRESS_REGEX.is_match(address)
}

/// Device addresses requested for a toggle, each with a found flag.
///
/// Lives for a single toggle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedAddressSet {
    found: BTreeMap<String, bool>,
}

impl RequestedAddressSet {
    /// Build the set with every address marked not found.
    ///
    /// Addresses are trimmed and duplicates collapse. Fails with
    /// [`PassthruError::NoAddresses`] when nothing is left.
    pub fn new<I, S>(addresses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut found = BTreeMap::new();
        for addr in addresses {
            let addr = addr.as_ref().trim();
            if addr.is_empty() {
                continue;
            }
            if !is_valid_pci_address(addr) {
                warn!(
                    address = %addr,
                    "Address does not look like a PCI bus address (expected: 0000:02:00.0)"
                );
            }
            found.insert(addr.to_string(), false);
        }

        if found.is_empty() {
            return Err(PassthruError::NoAddresses);
        }
        Ok(Self { found })
    }

    pub(crate) fn len(&self) -> usize {
        self.found.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.found.contains_key(id)
    }

    /// Mark `id` as found. Returns false when it was not requested or was
    /// already found.
    pub fn mark_found(&mut self, id: &str) -> bool {
        match self.found.get_mut(id) {
            Some(found) if !*found => {
                *found = true;
                true
            }
            _ => false,
        }
    }

    /// Requested addresses not found yet, in address order.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.found.iter().filter(|(_, found)| !**found).map(|(id, _)| id.as_str())
    }
}

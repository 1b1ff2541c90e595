//! Target host resolution.
//!
//! A host is chosen in two explicit steps: the host named by the operator
//! (`--host`, `PTCTL_HOST` or the configured default), then the single host
//! implied by the session when the inventory holds exactly one.

use crate::error::{PassthruError, Result};
use crate::service::HostLocator;
use crate::types::HostRef;
use tracing::debug;

/// Why no host could be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The session sees no hosts at all
    NoHosts,

    /// The session sees several hosts and none was named
    Ambiguous { count: usize },
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHosts => write!(f, "no hosts found"),
            Self::Ambiguous { count } => {
                write!(f, "default host resolves to {} hosts, please specify one with --host", count)
            }
        }
    }
}

/// Outcome of host resolution, with the reason the host was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostResolution {
    /// Named by the operator
    Explicit(HostRef),

    /// The only host visible to the session
    Implied(HostRef),

    Unresolved(UnresolvedReason),
}

impl HostResolution {
    pub fn host(&self) -> Option<&HostRef> {
        match self {
            Self::Explicit(host) | Self::Implied(host) => Some(host),
            Self::Unresolved(_) => None,
        }
    }

    /// The resolved host, or a [`PassthruError::HostResolution`] naming the reason.
    pub fn into_host(self) -> Result<HostRef> {
        match self {
            Self::Explicit(host) | Self::Implied(host) => Ok(host),
            Self::Unresolved(reason) => {
                Err(PassthruError::HostResolution { reason: reason.to_string() })
            }
        }
    }
}

/// Host selection inputs of one command invocation.
#[derive(Debug, Clone, Default)]
pub struct HostSelector {
    explicit: Option<String>,
}

impl HostSelector {
    pub fn new(explicit: Option<String>) -> Self {
        let explicit = explicit.map(|h| h.trim().to_string()).filter(|h| !h.is_empty());
        Self { explicit }
    }

    /// Host name given by the operator, if any.
    pub fn explicit(&self) -> Option<&str> {
        self.explicit.as_deref()
    }

    /// Resolve the explicitly named host. `Ok(None)` when no host was named.
    pub async fn resolve_explicit<L: HostLocator + ?Sized>(
        &self,
        locator: &L,
    ) -> Result<Option<HostRef>> {
        let Some(name) = &self.explicit else {
            return Ok(None);
        };

        let mut found = locator
            .find_host(name)
            .await
            .map_err(|e| PassthruError::HostResolution { reason: format!("{}: {}", name, e) })?;

        match found.len() {
            1 => Ok(found.pop()),
            0 => {
                Err(PassthruError::HostResolution { reason: format!("host '{}' not found", name) })
            }
            n => Err(PassthruError::HostResolution {
                reason: format!("host '{}' resolves to {} hosts", name, n),
            }),
        }
    }

    /// Resolve the host implied by the session.
    pub async fn resolve_implied<L: HostLocator + ?Sized>(
        &self,
        locator: &L,
    ) -> Result<HostResolution> {
        let mut hosts = locator
            .list_hosts()
            .await
            .map_err(|e| PassthruError::HostResolution { reason: e.to_string() })?;

        let resolution = match hosts.len() {
            0 => HostResolution::Unresolved(UnresolvedReason::NoHosts),
            1 => match hosts.pop() {
                Some(host) => HostResolution::Implied(host),
                None => HostResolution::Unresolved(UnresolvedReason::NoHosts),
            },
            count => HostResolution::Unresolved(UnresolvedReason::Ambiguous { count }),
        };

        debug!(resolution = ?resolution, "Resolved implied host");
        Ok(resolution)
    }

    /// Resolve exactly one host: the explicit one first, then the implied one.
    pub async fn resolve<L: HostLocator + ?Sized>(&self, locator: &L) -> Result<HostResolution> {
        if let Some(host) = self.resolve_explicit(locator).await? {
            debug!(host = %host, "Resolved explicit host");
            return Ok(HostResolution::Explicit(host));
        }
        self.resolve_implied(locator).await
    }
}

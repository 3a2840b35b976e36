//! Static access-code registry.

use serde::{Deserialize, Serialize};

/// Downstream service an access code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Proxy,
    Chat,
}

impl Service {
    /// Wire name of the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Proxy => "proxy",
            Service::Chat => "chat",
        }
    }

    /// Front-end page the client is sent to after a successful exchange.
    pub fn redirect_url(&self) -> &'static str {
        match self {
            Service::Proxy => "/proxy",
            Service::Chat => "/chat.html",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registry entry binding a code to a service.
#[derive(Debug, Clone)]
struct AccessEntry {
    code: String,
    service: Service,
}

/// Immutable code → service mapping, built once at startup.
#[derive(Debug, Clone)]
pub struct AccessRegistry {
    entries: Vec<AccessEntry>,
}

impl AccessRegistry {
    /// Build the registry from the two configured codes.
    pub fn new(proxy_code: impl Into<String>, chat_code: impl Into<String>) -> Self {
        Self {
            entries: vec![
                AccessEntry {
                    code: proxy_code.into(),
                    service: Service::Proxy,
                },
                AccessEntry {
                    code: chat_code.into(),
                    service: Service::Chat,
                },
            ],
        }
    }

    /// Resolve a code to its service. Exact match, no normalization.
    pub fn resolve(&self, code: &str) -> Option<Service> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.service)
    }

    /// Configured service names, in registry order.
    pub fn services(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.service.as_str()).collect()
    }
}

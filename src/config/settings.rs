// Configuration structs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Device host name or address (default: webmo.local)
    #[serde(default)]
    pub host: Option<String>,

    /// Per-request timeout applied by the CLI. Unset means no timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// Pick the host to talk to: an explicit one wins over the configured one
    pub fn resolve_host<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.host.as_deref())
    }
}

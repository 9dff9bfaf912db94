//! # Runtime Configuration Module
//!
//! Environment variable-based configuration, read once at startup and then
//! injected into endpoints and the dispatcher. Nothing in the request path
//! reads the environment.
//!
//! ## Environment Variables
//!
//! ### `VALIDIZE_TRACE`
//!
//! When set to `1`, `true`, `yes` or `on` (case-insensitive), validation and
//! processing failures are logged with their message. Responses never carry
//! the message either way.
//!
//! Default: off
//!
//! ### `VALIDIZE_STACK_SIZE`
//!
//! Stack size for endpoint coroutines spawned by the
//! [`Dispatcher`](crate::dispatcher::Dispatcher). Accepts decimal (`16384`) or
//! hexadecimal (`0x4000`).
//!
//! Default: `0x4000` (16 KB)
//!
//! ## Usage
//!
//! ```rust
//! use validize::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("trace: {}, stack size: {} bytes", config.trace, config.stack_size);
//! ```

use std::env;

const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Log failure messages of validation and processing
    pub trace: bool,
    /// Stack size for endpoint coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            trace: false,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let trace = lookup("VALIDIZE_TRACE")
            .map(|val| parse_flag(&val))
            .unwrap_or(false);
        let stack_size = lookup("VALIDIZE_STACK_SIZE")
            .and_then(|val| parse_size(&val))
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig { trace, stack_size }
    }

    /// Copy of this configuration with tracing switched on or off.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}

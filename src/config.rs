//! Centralized configuration and builder for ImageHooks.
//!
//! - HooksConfig::from_env() reads the IH_* environment variables.
//! - HooksBuilder starts from env (or clean defaults) and allows overrides.
//!
//! Tunables:
//! - max_chain_len (IH_MAX_CHAIN_LEN, default 65536)
//! - node_budget (IH_NODE_BUDGET, default unlimited) — cap on live chain nodes;
//!   exhaustion surfaces as OutOfMemory.
//! - error_stack_depth (IH_ERROR_STACK, default 32)

use std::fmt;

use crate::consts::{DEFAULT_ERROR_STACK_DEPTH, DEFAULT_MAX_CHAIN_LEN};

#[derive(Clone, Debug)]
pub struct HooksConfig {
    /// Largest chain length a single rebuild may request.
    /// Env: IH_MAX_CHAIN_LEN
    pub max_chain_len: usize,

    /// Maximum number of live chain nodes (None = unlimited).
    /// Env: IH_NODE_BUDGET (0 or empty => unlimited)
    pub node_budget: Option<u64>,

    /// Depth of the last-error stack.
    /// Env: IH_ERROR_STACK
    pub error_stack_depth: usize,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
            node_budget: None,
            error_stack_depth: DEFAULT_ERROR_STACK_DEPTH,
        }
    }
}

impl HooksConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("IH_MAX_CHAIN_LEN") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.max_chain_len = n;
            }
        }

        if let Ok(v) = std::env::var("IH_NODE_BUDGET") {
            match v.trim().parse::<u64>() {
                Ok(0) | Err(_) => cfg.node_budget = None,
                Ok(n) => cfg.node_budget = Some(n),
            }
        }

        if let Ok(v) = std::env::var("IH_ERROR_STACK") {
            if let Ok(n) = v.trim().parse::<usize>() {
                if n > 0 {
                    cfg.error_stack_depth = n;
                }
            }
        }

        cfg
    }
}

impl fmt::Display for HooksConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HooksConfig {{ max_chain_len: {}, node_budget: {}, error_stack_depth: {} }}",
            self.max_chain_len,
            self.node_budget
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unlimited".to_string()),
            self.error_stack_depth,
        )
    }
}

/// Builder producing a HooksConfig. `ImageLib::builder()` returns this.
#[derive(Clone, Debug)]
pub struct HooksBuilder {
    cfg: HooksConfig,
}

impl Default for HooksBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: HooksConfig::from_env(),
        }
    }
}

impl HooksBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from clean defaults (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: HooksConfig::default(),
        }
    }

    pub fn max_chain_len(mut self, n: usize) -> Self {
        self.cfg.max_chain_len = n;
        self
    }

    pub fn node_budget(mut self, budget: Option<u64>) -> Self {
        self.cfg.node_budget = budget;
        self
    }

    pub fn error_stack_depth(mut self, depth: usize) -> Self {
        self.cfg.error_stack_depth = depth;
        self
    }

    pub fn build(self) -> HooksConfig {
        self.cfg
    }
}

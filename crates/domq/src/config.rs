//! Engine configuration

use serde::{Deserialize, Serialize};

/// Query engine configuration
///
/// `native` replaces the process-wide mode flag of classic query wrappers:
/// it is plain data handed to [`crate::QueryEngine::new`], read on every
/// resolve, never written by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Return bare node sequences instead of capability-wrapped collections
    pub native: bool,
}

impl QueryConfig {
    /// Config with native mode enabled
    pub fn native() -> Self {
        Self { native: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wraps() {
        assert!(!QueryConfig::default().native);
        assert!(QueryConfig::native().native);
    }
}

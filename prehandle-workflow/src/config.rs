use serde::{Deserialize, Serialize};

/// Everything the orchestrator needs that isn't owned by a collaborator
/// crate: just the size of the CPU-bound pool signature verifications are
/// dispatched onto.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreHandleConfig {
    pub signature_verification_threads: usize,
}

impl Default for PreHandleConfig {
    fn default() -> Self {
        Self {
            signature_verification_threads: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_a_nonzero_pool_size() {
        assert!(PreHandleConfig::default().signature_verification_threads > 0);
    }

    #[test]
    fn custom_pool_size_round_trips_through_clone() {
        let config = PreHandleConfig {
            signature_verification_threads: 16,
        };
        assert_eq!(config.clone(), config);
    }
}

//! Long-running service domain types.

use serde::{Deserialize, Serialize};

/// Configuration for a continuously running service.
///
/// The service keeps `desired_count` copies of the stack's task definition
/// running; replacement of stopped tasks is owned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Number of task copies to keep running
    pub desired_count: u32,

    /// Assign a public IP to each task (placement moves to public subnets)
    pub assign_public_ip: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { desired_count: 1, assign_public_ip: true }
    }
}

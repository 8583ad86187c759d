//! Network domain types.

use serde::{Deserialize, Serialize};

/// Lookup request for an existing VPC.
///
/// The VPC is located, never created: stacks bind to networks that already
/// exist in the target account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcLookup {
    /// VPC ID (e.g., "vpc-0123456789abcdef0")
    pub vpc_id: String,

    /// AWS region (e.g., "ap-northeast-1")
    pub region: String,
}

impl VpcLookup {
    pub fn new(vpc_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self { vpc_id: vpc_id.into(), region: region.into() }
    }
}

/// Resolved VPC attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vpc {
    /// VPC ID
    pub vpc_id: String,

    /// AWS region
    pub region: String,

    /// CIDR block (e.g., "10.0.0.0/16")
    pub cidr: String,

    /// Availability zones the subnets span
    pub availability_zones: Vec<String>,

    /// Public subnet IDs (routes to an internet gateway)
    pub public_subnet_ids: Vec<String>,

    /// Private subnet IDs
    pub private_subnet_ids: Vec<String>,
}

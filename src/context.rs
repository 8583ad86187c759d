//! Lookup context for resources that exist outside the stack.
//!
//! Stacks bind to networks they do not own. The context holds pre-resolved
//! attributes for those networks, keyed by region and identifier; resolution
//! against it happens once, at stack construction, and fails fast.

use crate::error::{Result, StratusError};
use crate::types::{Vpc, VpcLookup};
use std::collections::HashMap;
use tracing::{debug, info};

/// Pre-resolved environment attributes consulted during stack construction.
#[derive(Debug, Clone, Default)]
pub struct LookupContext {
    vpcs: HashMap<(String, String), Vpc>,
}

impl LookupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the context with a known VPC.
    pub fn register_vpc(&mut self, vpc: Vpc) {
        debug!(vpc_id = %vpc.vpc_id, region = %vpc.region, "Registering VPC in lookup context");
        self.vpcs.insert((vpc.region.clone(), vpc.vpc_id.clone()), vpc);
    }

    /// Resolve an existing VPC by identifier and region.
    ///
    /// Fails fast if the identifier does not resolve to a registered VPC in
    /// that region; there is no retry.
    pub fn resolve_vpc(&self, lookup: &VpcLookup) -> Result<Vpc> {
        let key = (lookup.region.clone(), lookup.vpc_id.clone());
        match self.vpcs.get(&key) {
            Some(vpc) => {
                info!(vpc_id = %vpc.vpc_id, region = %vpc.region, "Resolved VPC");
                Ok(vpc.clone())
            }
            None => Err(StratusError::VpcNotFound {
                vpc_id: lookup.vpc_id.clone(),
                region: lookup.region.clone(),
            }),
        }
    }
}

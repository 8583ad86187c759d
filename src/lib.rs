//! Stratus Core Library
//!
//! Declarative ECS Fargate stack definitions and CloudFormation-style
//! template synthesis. A stack is built as a dependency-ordered object graph
//! (VPC lookup → image asset → cluster → task definition → service and
//! scheduled task) and synthesized into a deployment template document.

pub mod assets;
pub mod context;
pub mod error;
pub mod observability;
pub mod stack;
pub mod stackfile;
pub mod synth;
pub mod template;
pub mod types;

// Re-export commonly used items
pub use context::LookupContext;
pub use error::{Result, StratusError};
pub use stack::{Cluster, FargateStack, FargateStackConfig, ScheduledTask, Service, TaskDefinition};
pub use stackfile::{Stackfile, StackfileParser};
pub use template::{DeletionPolicy, Resource, Template};
pub use types::{
    ContainerConfig, CpuArchitecture, ImageAsset, ImageAssetConfig, LogConfig, LogDeliveryMode,
    OperatingSystemFamily, PolicyStatement, RuntimePlatform, Schedule, ScheduledTaskConfig,
    ServiceConfig, TaskDefinitionConfig, Vpc, VpcLookup,
};

//! Core domain types for stratus.

pub mod iam;
pub mod image;
pub mod network;
pub mod schedule;
pub mod service;
pub mod task;

// Re-exports
pub use iam::{Effect, PolicyStatement};
pub use image::{ImageAsset, ImageAssetConfig};
pub use network::{Vpc, VpcLookup};
pub use schedule::{Schedule, ScheduledTaskConfig};
pub use service::ServiceConfig;
pub use task::{
    ContainerConfig, CpuArchitecture, LogConfig, LogDeliveryMode, OperatingSystemFamily,
    RuntimePlatform, TaskDefinitionConfig,
};

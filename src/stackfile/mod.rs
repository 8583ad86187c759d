//! Stackfile: the YAML input describing a Fargate stack.
//!
//! The stackfile is the editable surface; it deserializes into sections with
//! serde defaults and converts into a full `FargateStackConfig`.

pub mod parser;

pub use parser::StackfileParser;

use crate::stack::FargateStackConfig;
use crate::types::{
    ContainerConfig, CpuArchitecture, ImageAssetConfig, LogConfig, RuntimePlatform, Schedule,
    ScheduledTaskConfig, ServiceConfig, TaskDefinitionConfig, VpcLookup,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_cpu() -> u32 {
    512
}

fn default_memory() -> u32 {
    1024
}

fn default_count() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_schedule_expression() -> String {
    "cron(0 15 * * ? *)".to_string()
}

/// Top-level stackfile structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stackfile {
    /// Format version (optional; only "1" is recognized)
    #[serde(default)]
    pub version: String,

    /// Stack name
    pub name: String,

    /// VPC to bind to
    pub vpc: VpcSection,

    /// Image build context
    pub image: ImageSection,

    /// Task compute shape
    #[serde(default)]
    pub task: TaskSection,

    /// Long-running service
    #[serde(default)]
    pub service: ServiceSection,

    /// Scheduled task
    #[serde(default)]
    pub schedule: ScheduleSection,
}

/// VPC section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcSection {
    /// Existing VPC ID
    pub id: String,

    /// AWS region
    pub region: String,
}

/// Image section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSection {
    /// Build context directory
    pub directory: PathBuf,

    /// Asset name (defaults to "<stack>-image")
    #[serde(default)]
    pub name: Option<String>,
}

/// Task section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSection {
    /// CPU units (1024 = 1 vCPU)
    #[serde(default = "default_cpu")]
    pub cpu: u32,

    /// Memory limit (MiB)
    #[serde(default = "default_memory")]
    pub memory_mib: u32,

    /// CPU architecture
    #[serde(default)]
    pub architecture: CpuArchitecture,
}

impl Default for TaskSection {
    fn default() -> Self {
        Self {
            cpu: default_cpu(),
            memory_mib: default_memory(),
            architecture: CpuArchitecture::default(),
        }
    }
}

/// Service section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSection {
    /// Number of task copies to keep running
    #[serde(default = "default_count")]
    pub desired_count: u32,

    /// Assign public IPs to tasks
    #[serde(default = "default_true")]
    pub assign_public_ip: bool,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self { desired_count: default_count(), assign_public_ip: true }
    }
}

/// Schedule section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSection {
    /// Schedule expression
    #[serde(default = "default_schedule_expression")]
    pub expression: String,

    /// Tasks launched per invocation
    #[serde(default = "default_count")]
    pub desired_count: u32,

    /// Whether the schedule fires
    #[serde(default)]
    pub enabled: bool,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            expression: default_schedule_expression(),
            desired_count: default_count(),
            enabled: false,
        }
    }
}

impl Stackfile {
    /// Convert into a full stack configuration, deriving names and filling
    /// defaults from the stack name.
    pub fn into_stack_config(self) -> FargateStackConfig {
        let name = self.name;
        let asset_name = self.image.name.unwrap_or_else(|| format!("{}-image", name));

        FargateStackConfig {
            vpc: VpcLookup::new(self.vpc.id, self.vpc.region),
            image: ImageAssetConfig::new(asset_name, self.image.directory),
            task_definition: TaskDefinitionConfig {
                family: format!("{}-task", name),
                cpu: self.task.cpu,
                memory_mib: self.task.memory_mib,
                runtime_platform: RuntimePlatform {
                    cpu_architecture: self.task.architecture,
                    ..RuntimePlatform::default()
                },
                container: ContainerConfig {
                    name: format!("{}-container", name),
                    log: LogConfig { stream_prefix: name.clone(), ..LogConfig::default() },
                    ..ContainerConfig::default()
                },
                ..TaskDefinitionConfig::default()
            },
            service: ServiceConfig {
                desired_count: self.service.desired_count,
                assign_public_ip: self.service.assign_public_ip,
            },
            scheduled_task: ScheduledTaskConfig {
                rule_name: format!("{}-scheduled", name),
                schedule: Schedule::expression(self.schedule.expression),
                desired_task_count: self.schedule.desired_count,
                enabled: self.schedule.enabled,
            },
            name,
        }
    }
}

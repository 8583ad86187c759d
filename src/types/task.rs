//! Task definition domain types.

use crate::types::iam::PolicyStatement;
use serde::{Deserialize, Serialize};

/// CPU architecture for the runtime platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CpuArchitecture {
    X86_64,
    #[default]
    Arm64,
}

impl std::fmt::Display for CpuArchitecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpuArchitecture::X86_64 => write!(f, "X86_64"),
            CpuArchitecture::Arm64 => write!(f, "ARM64"),
        }
    }
}

impl std::str::FromStr for CpuArchitecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(CpuArchitecture::X86_64),
            "arm64" | "aarch64" => Ok(CpuArchitecture::Arm64),
            _ => Err(format!("Unknown CPU architecture: {}", s)),
        }
    }
}

/// Operating system family for the runtime platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystemFamily {
    #[default]
    Linux,
}

impl std::fmt::Display for OperatingSystemFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingSystemFamily::Linux => write!(f, "LINUX"),
        }
    }
}

/// Runtime platform (OS family + CPU architecture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuntimePlatform {
    /// Operating system family
    pub os_family: OperatingSystemFamily,

    /// CPU architecture
    pub cpu_architecture: CpuArchitecture,
}

/// Log delivery mode for the awslogs driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogDeliveryMode {
    Blocking,
    #[default]
    NonBlocking,
}

impl std::fmt::Display for LogDeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogDeliveryMode::Blocking => write!(f, "blocking"),
            LogDeliveryMode::NonBlocking => write!(f, "non-blocking"),
        }
    }
}

/// Container log configuration (awslogs driver).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log stream prefix
    pub stream_prefix: String,

    /// Delivery mode; non-blocking drops logs rather than stalling the
    /// container when delivery falls behind
    pub mode: LogDeliveryMode,

    /// In-memory buffer for non-blocking delivery (MiB)
    pub max_buffer_mib: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            stream_prefix: "stratus".to_string(),
            mode: LogDeliveryMode::NonBlocking,
            max_buffer_mib: 25,
        }
    }
}

/// Container specification within a task definition.
///
/// The image reference is not part of the configuration; it is taken from the
/// stack's built image asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Container name
    pub name: String,

    /// Whether task failure of this container stops the task
    pub essential: bool,

    /// Log configuration
    pub log: LogConfig,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self { name: "app".to_string(), essential: true, log: LogConfig::default() }
    }
}

/// Task definition configuration: compute shape, container spec, and the
/// permission policies attached to the execution and task roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinitionConfig {
    /// Task definition family name
    pub family: String,

    /// CPU units (1024 = 1 vCPU)
    pub cpu: u32,

    /// Memory limit (MiB)
    pub memory_mib: u32,

    /// Runtime platform
    pub runtime_platform: RuntimePlatform,

    /// Statements attached to the execution role (image pull, log delivery)
    pub execution_statements: Vec<PolicyStatement>,

    /// Statements attached to the task role (workload permissions)
    pub task_statements: Vec<PolicyStatement>,

    /// The single container the task runs
    pub container: ContainerConfig,
}

impl Default for TaskDefinitionConfig {
    fn default() -> Self {
        Self {
            family: "app".to_string(),
            cpu: 512,
            memory_mib: 1024,
            runtime_platform: RuntimePlatform::default(),
            execution_statements: PolicyStatement::execution_defaults(),
            task_statements: PolicyStatement::task_defaults(),
            container: ContainerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_architecture_from_str() {
        assert_eq!("arm64".parse::<CpuArchitecture>().unwrap(), CpuArchitecture::Arm64);
        assert_eq!("aarch64".parse::<CpuArchitecture>().unwrap(), CpuArchitecture::Arm64);
        assert_eq!("x86_64".parse::<CpuArchitecture>().unwrap(), CpuArchitecture::X86_64);
        assert!("sparc".parse::<CpuArchitecture>().is_err());
    }

    #[test]
    fn test_runtime_platform_display_values() {
        let platform = RuntimePlatform::default();
        assert_eq!(platform.os_family.to_string(), "LINUX");
        assert_eq!(platform.cpu_architecture.to_string(), "ARM64");
    }

    #[test]
    fn test_default_log_config_is_non_blocking() {
        let log = LogConfig::default();
        assert_eq!(log.mode, LogDeliveryMode::NonBlocking);
        assert_eq!(log.max_buffer_mib, 25);
        assert_eq!(log.mode.to_string(), "non-blocking");
    }
}

//! Stackfile parser.
//!
//! Parses YAML stackfiles and validates them.

use super::Stackfile;
use crate::error::{Result, StratusError};
use std::path::Path;
use tracing::{info, instrument};

/// Parser for stackfiles.
pub struct StackfileParser;

impl StackfileParser {
    /// Parse a stackfile from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The YAML is invalid
    /// - The format version is unsupported
    /// - Required fields are missing or empty
    #[instrument(skip(content))]
    pub fn parse(content: &str) -> Result<Stackfile> {
        info!("Parsing stackfile");

        let stackfile: Stackfile = serde_yaml::from_str(content)
            .map_err(|e| StratusError::StackfileParseError { reason: e.to_string() })?;

        Self::validate_version(&stackfile.version)?;
        Self::validate(&stackfile)?;

        Ok(stackfile)
    }

    /// Parse a stackfile from a file path.
    #[instrument]
    pub fn parse_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Stackfile> {
        let path = path.as_ref();
        info!("Reading stackfile from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| StratusError::FileReadError {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Validate that the format version is supported.
    fn validate_version(version: &str) -> Result<()> {
        if version.is_empty() || version == "1" {
            Ok(())
        } else {
            Err(StratusError::UnsupportedStackfileVersion { version: version.to_string() })
        }
    }

    /// Validate required fields.
    fn validate(stackfile: &Stackfile) -> Result<()> {
        if stackfile.name.is_empty() {
            return Err(StratusError::StackfileParseError {
                reason: "Stack name must not be empty".to_string(),
            });
        }
        if stackfile.vpc.id.is_empty() {
            return Err(StratusError::StackfileParseError {
                reason: "VPC id must not be empty".to_string(),
            });
        }
        if stackfile.vpc.region.is_empty() {
            return Err(StratusError::StackfileParseError {
                reason: "VPC region must not be empty".to_string(),
            });
        }
        if stackfile.image.directory.as_os_str().is_empty() {
            return Err(StratusError::StackfileParseError {
                reason: "Image build directory must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CpuArchitecture;

    const MINIMAL: &str = r#"
name: demo
vpc:
  id: vpc-0a1b2c3d
  region: ap-northeast-1
image:
  directory: ./app
"#;

    #[test]
    fn test_parse_minimal_stackfile() {
        let stackfile = StackfileParser::parse(MINIMAL).unwrap();
        assert_eq!(stackfile.name, "demo");
        assert_eq!(stackfile.task.cpu, 512);
        assert_eq!(stackfile.task.memory_mib, 1024);
        assert_eq!(stackfile.task.architecture, CpuArchitecture::Arm64);
        assert_eq!(stackfile.service.desired_count, 1);
        assert!(stackfile.service.assign_public_ip);
        assert_eq!(stackfile.schedule.expression, "cron(0 15 * * ? *)");
        assert!(!stackfile.schedule.enabled);
    }

    #[test]
    fn test_parse_full_stackfile() {
        let content = r#"
version: "1"
name: demo
vpc:
  id: vpc-0a1b2c3d
  region: ap-northeast-1
image:
  directory: ./app
  name: demo-image
task:
  cpu: 1024
  memory_mib: 2048
  architecture: x86_64
service:
  desired_count: 3
  assign_public_ip: false
schedule:
  expression: "rate(1 hour)"
  desired_count: 2
  enabled: true
"#;
        let stackfile = StackfileParser::parse(content).unwrap();
        assert_eq!(stackfile.task.cpu, 1024);
        assert_eq!(stackfile.task.architecture, CpuArchitecture::X86_64);
        assert_eq!(stackfile.service.desired_count, 3);
        assert!(stackfile.schedule.enabled);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let content = MINIMAL.replace("name: demo", "name: demo\nversion: \"2\"");
        let err = StackfileParser::parse(&content);
        assert!(matches!(err, Err(StratusError::UnsupportedStackfileVersion { .. })));
    }

    #[test]
    fn test_empty_vpc_id_rejected() {
        let content = MINIMAL.replace("id: vpc-0a1b2c3d", "id: \"\"");
        let err = StackfileParser::parse(&content);
        assert!(matches!(err, Err(StratusError::StackfileParseError { .. })));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = StackfileParser::parse("name: [unclosed");
        assert!(matches!(err, Err(StratusError::StackfileParseError { .. })));
    }

    #[test]
    fn test_into_stack_config_derives_names() {
        let stackfile = StackfileParser::parse(MINIMAL).unwrap();
        let config = stackfile.into_stack_config();
        assert_eq!(config.name, "demo");
        assert_eq!(config.image.asset_name, "demo-image");
        assert_eq!(config.task_definition.family, "demo-task");
        assert_eq!(config.task_definition.container.name, "demo-container");
        assert_eq!(config.scheduled_task.rule_name, "demo-scheduled");
        assert_eq!(config.scheduled_task.schedule.as_str(), "cron(0 15 * * ? *)");
    }
}

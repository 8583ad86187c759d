//! Scheduled task domain types.

use serde::{Deserialize, Serialize};

/// Schedule expression (cron or rate form).
///
/// Passed through to the platform scheduler unvalidated; expression errors
/// surface at deploy time, not at synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(String);

impl Schedule {
    /// Schedule from a raw expression (e.g., "rate(5 minutes)").
    pub fn expression(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// Schedule from cron fields (e.g., "0 15 * * ? *").
    pub fn cron(fields: &str) -> Self {
        Self(format!("cron({})", fields))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a cron-scheduled one-off task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTaskConfig {
    /// Rule name
    pub rule_name: String,

    /// Schedule expression
    pub schedule: Schedule,

    /// Number of task copies launched per invocation
    pub desired_task_count: u32,

    /// Whether the rule fires; false keeps the rule in place but disabled
    pub enabled: bool,
}

impl Default for ScheduledTaskConfig {
    fn default() -> Self {
        Self {
            rule_name: "scheduled-task".to_string(),
            schedule: Schedule::cron("0 15 * * ? *"),
            desired_task_count: 1,
            enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cron_wraps_fields() {
        let schedule = Schedule::cron("0 15 * * ? *");
        assert_eq!(schedule.as_str(), "cron(0 15 * * ? *)");
    }

    #[test]
    fn test_expression_passthrough() {
        let schedule = Schedule::expression("rate(1 hour)");
        assert_eq!(schedule.as_str(), "rate(1 hour)");
    }

    #[test]
    fn test_scheduled_task_disabled_by_default() {
        assert!(!ScheduledTaskConfig::default().enabled);
    }
}

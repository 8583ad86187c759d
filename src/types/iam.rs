//! IAM policy statement types.
//!
//! Statements are inert records attached to task-definition roles; policy
//! evaluation is owned by the identity platform.

use serde::{Deserialize, Serialize};

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Allow => write!(f, "Allow"),
            Effect::Deny => write!(f, "Deny"),
        }
    }
}

/// A single IAM policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStatement {
    /// Statement effect
    pub effect: Effect,

    /// Allowed or denied actions
    pub actions: Vec<String>,

    /// Resource ARNs the statement applies to
    pub resources: Vec<String>,
}

impl PolicyStatement {
    /// Allow the given actions on all resources.
    pub fn allow(actions: &[&str]) -> Self {
        Self {
            effect: Effect::Allow,
            actions: actions.iter().map(|a| a.to_string()).collect(),
            resources: vec!["*".to_string()],
        }
    }

    /// Default execution-role statements: registry pull and log-stream write.
    pub fn execution_defaults() -> Vec<PolicyStatement> {
        vec![Self::allow(&[
            "ecr:GetAuthorizationToken",
            "ecr:BatchCheckLayerAvailability",
            "ecr:GetDownloadUrlForLayer",
            "ecr:BatchGetImage",
            "logs:CreateLogStream",
            "logs:PutLogEvents",
        ])]
    }

    /// Default task-role statements: execution permissions plus broad data
    /// access (S3 and RDS Data API).
    pub fn task_defaults() -> Vec<PolicyStatement> {
        vec![Self::allow(&[
            "ecr:GetAuthorizationToken",
            "ecr:BatchCheckLayerAvailability",
            "ecr:GetDownloadUrlForLayer",
            "ecr:BatchGetImage",
            "logs:CreateLogStream",
            "logs:PutLogEvents",
            "s3:*",
            "s3-object-lambda:*",
            "rds-data:ExecuteSql",
            "rds-data:ExecuteStatement",
            "rds-data:BatchExecuteStatement",
        ])]
    }
}

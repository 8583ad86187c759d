//! Stack-to-template synthesis.
//!
//! Renders the records held by a built stack into template resources, wiring
//! `Ref` / `Fn::GetAtt` / `DependsOn` edges that mirror construction order.
//! The rendered template is validated before it is returned.

use crate::error::Result;
use crate::stack::FargateStack;
use crate::template::{DeletionPolicy, Resource, Template};
use crate::types::PolicyStatement;
use serde_json::{json, Value};
use tracing::{info, instrument};

/// Logical ids of the synthesized resources.
pub const CLUSTER_ID: &str = "Cluster";
pub const EXECUTION_ROLE_ID: &str = "ExecutionRole";
pub const TASK_ROLE_ID: &str = "TaskRole";
pub const EVENTS_ROLE_ID: &str = "EventsRole";
pub const LOG_GROUP_ID: &str = "LogGroup";
pub const TASK_DEFINITION_ID: &str = "TaskDefinition";
pub const SERVICE_ID: &str = "Service";
pub const SCHEDULED_RULE_ID: &str = "ScheduledTaskRule";

/// Renderer from stack records to a deployment template.
pub struct TemplateSynthesizer;

impl TemplateSynthesizer {
    /// Synthesize the deployment template for a built stack.
    #[instrument(skip(stack), fields(stack = %stack.name()))]
    pub fn synthesize(stack: &FargateStack) -> Result<Template> {
        info!("Synthesizing deployment template");

        let mut template = Template::new();
        template.add_resource(CLUSTER_ID, Self::cluster(stack));
        template.add_resource(EXECUTION_ROLE_ID, Self::execution_role(stack));
        template.add_resource(TASK_ROLE_ID, Self::task_role(stack));
        template.add_resource(LOG_GROUP_ID, Self::log_group(stack));
        template.add_resource(TASK_DEFINITION_ID, Self::task_definition(stack));
        template.add_resource(SERVICE_ID, Self::service(stack));
        template.add_resource(EVENTS_ROLE_ID, Self::events_role(stack));
        template.add_resource(SCHEDULED_RULE_ID, Self::scheduled_rule(stack));

        template.validate()?;
        info!(resources = template.len(), "Template synthesized");
        Ok(template)
    }

    fn cluster(stack: &FargateStack) -> Resource {
        Resource {
            resource_type: "AWS::ECS::Cluster".to_string(),
            properties: json!({
                "ClusterName": stack.cluster().name,
            }),
            deletion_policy: Some(DeletionPolicy::Delete),
            depends_on: vec![],
        }
    }

    fn assume_role_policy(service: &str) -> Value {
        json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": { "Service": service },
                "Action": "sts:AssumeRole",
            }],
        })
    }

    fn statements_json(statements: &[PolicyStatement]) -> Value {
        Value::Array(
            statements
                .iter()
                .map(|s| {
                    json!({
                        "Effect": s.effect.to_string(),
                        "Action": s.actions,
                        "Resource": s.resources,
                    })
                })
                .collect(),
        )
    }

    fn role(name: String, principal: &str, statements: Value) -> Resource {
        Resource {
            resource_type: "AWS::IAM::Role".to_string(),
            properties: json!({
                "RoleName": name,
                "AssumeRolePolicyDocument": Self::assume_role_policy(principal),
                "Policies": [{
                    "PolicyName": format!("{}-policy", name),
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": statements,
                    },
                }],
            }),
            deletion_policy: None,
            depends_on: vec![],
        }
    }

    fn execution_role(stack: &FargateStack) -> Resource {
        Self::role(
            format!("{}-execution", stack.name()),
            "ecs-tasks.amazonaws.com",
            Self::statements_json(&stack.task_definition().config.execution_statements),
        )
    }

    fn task_role(stack: &FargateStack) -> Resource {
        Self::role(
            format!("{}-task", stack.name()),
            "ecs-tasks.amazonaws.com",
            Self::statements_json(&stack.task_definition().config.task_statements),
        )
    }

    /// Role the platform scheduler assumes to launch the scheduled task.
    fn events_role(stack: &FargateStack) -> Resource {
        let statements = json!([
            {
                "Effect": "Allow",
                "Action": "ecs:RunTask",
                "Resource": { "Ref": TASK_DEFINITION_ID },
            },
            {
                "Effect": "Allow",
                "Action": "iam:PassRole",
                "Resource": [
                    { "Fn::GetAtt": [EXECUTION_ROLE_ID, "Arn"] },
                    { "Fn::GetAtt": [TASK_ROLE_ID, "Arn"] },
                ],
            },
        ]);
        Self::role(format!("{}-events", stack.name()), "events.amazonaws.com", statements)
    }

    fn log_group(stack: &FargateStack) -> Resource {
        Resource {
            resource_type: "AWS::Logs::LogGroup".to_string(),
            properties: json!({
                "LogGroupName": format!("/ecs/{}", stack.name()),
                "RetentionInDays": 30,
            }),
            deletion_policy: Some(DeletionPolicy::Delete),
            depends_on: vec![],
        }
    }

    fn task_definition(stack: &FargateStack) -> Resource {
        let task = stack.task_definition();
        let container = &task.config.container;
        let log = &container.log;

        Resource {
            resource_type: "AWS::ECS::TaskDefinition".to_string(),
            properties: json!({
                "Family": task.config.family,
                "Cpu": task.config.cpu.to_string(),
                "Memory": task.config.memory_mib.to_string(),
                "NetworkMode": "awsvpc",
                "RequiresCompatibilities": ["FARGATE"],
                "RuntimePlatform": {
                    "OperatingSystemFamily": task.config.runtime_platform.os_family.to_string(),
                    "CpuArchitecture": task.config.runtime_platform.cpu_architecture.to_string(),
                },
                "ExecutionRoleArn": { "Fn::GetAtt": [EXECUTION_ROLE_ID, "Arn"] },
                "TaskRoleArn": { "Fn::GetAtt": [TASK_ROLE_ID, "Arn"] },
                "ContainerDefinitions": [{
                    "Name": container.name,
                    "Image": task.image.image_uri,
                    "Essential": container.essential,
                    "LogConfiguration": {
                        "LogDriver": "awslogs",
                        "Options": {
                            "awslogs-group": { "Ref": LOG_GROUP_ID },
                            "awslogs-region": stack.vpc().region,
                            "awslogs-stream-prefix": log.stream_prefix,
                            "mode": log.mode.to_string(),
                            "max-buffer-size": format!("{}m", log.max_buffer_mib),
                        },
                    },
                }],
            }),
            deletion_policy: Some(DeletionPolicy::Delete),
            depends_on: vec![],
        }
    }

    fn service(stack: &FargateStack) -> Resource {
        let service = stack.service();
        let vpc = stack.vpc();

        // Public IP assignment requires placement in public subnets
        let subnets = if service.config.assign_public_ip {
            &vpc.public_subnet_ids
        } else {
            &vpc.private_subnet_ids
        };

        Resource {
            resource_type: "AWS::ECS::Service".to_string(),
            properties: json!({
                "ServiceName": format!("{}-service", stack.name()),
                "Cluster": { "Ref": CLUSTER_ID },
                "TaskDefinition": { "Ref": TASK_DEFINITION_ID },
                "DesiredCount": service.config.desired_count,
                "LaunchType": "FARGATE",
                "NetworkConfiguration": {
                    "AwsvpcConfiguration": {
                        "AssignPublicIp": if service.config.assign_public_ip { "ENABLED" } else { "DISABLED" },
                        "Subnets": subnets,
                    },
                },
            }),
            deletion_policy: Some(DeletionPolicy::Delete),
            depends_on: vec![TASK_DEFINITION_ID.to_string()],
        }
    }

    fn scheduled_rule(stack: &FargateStack) -> Resource {
        let scheduled = stack.scheduled_task();
        let vpc = stack.vpc();

        // Scheduled invocations stay off the public internet when possible
        let subnets = if vpc.private_subnet_ids.is_empty() {
            &vpc.public_subnet_ids
        } else {
            &vpc.private_subnet_ids
        };

        Resource {
            resource_type: "AWS::Events::Rule".to_string(),
            properties: json!({
                "Name": scheduled.config.rule_name,
                "ScheduleExpression": scheduled.config.schedule.as_str(),
                "State": if scheduled.config.enabled { "ENABLED" } else { "DISABLED" },
                "Targets": [{
                    "Id": "ScheduledTask",
                    "Arn": { "Fn::GetAtt": [CLUSTER_ID, "Arn"] },
                    "RoleArn": { "Fn::GetAtt": [EVENTS_ROLE_ID, "Arn"] },
                    "EcsParameters": {
                        "TaskDefinitionArn": { "Ref": TASK_DEFINITION_ID },
                        "TaskCount": scheduled.config.desired_task_count,
                        "LaunchType": "FARGATE",
                        "NetworkConfiguration": {
                            "AwsVpcConfiguration": {
                                "Subnets": subnets,
                                "AssignPublicIp": "DISABLED",
                            },
                        },
                    },
                }],
            }),
            deletion_policy: None,
            depends_on: vec![TASK_DEFINITION_ID.to_string()],
        }
    }
}

//! ECS Fargate stack assembly.
//!
//! Builds the dependency-ordered resource graph: VPC lookup → image asset →
//! cluster → task definition → (service, scheduled task). Construction is a
//! single synchronous pass; each step consumes the output of the previous
//! one, so a record cannot exist before its dependency. Fields are populated
//! in that order and exposed read-only afterwards.

use crate::assets::ImageAssetBuilder;
use crate::context::LookupContext;
use crate::error::Result;
use crate::synth::TemplateSynthesizer;
use crate::template::Template;
use crate::types::{
    ImageAsset, ImageAssetConfig, ScheduledTaskConfig, ServiceConfig, TaskDefinitionConfig, Vpc,
    VpcLookup,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Full configuration for a Fargate stack, one section per resource kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FargateStackConfig {
    /// Stack name
    pub name: String,

    /// Existing VPC to bind the cluster to
    pub vpc: VpcLookup,

    /// Container image build context
    pub image: ImageAssetConfig,

    /// Task definition (compute shape, container, policies)
    pub task_definition: TaskDefinitionConfig,

    /// Long-running service
    pub service: ServiceConfig,

    /// Cron-scheduled one-off task
    pub scheduled_task: ScheduledTaskConfig,
}

/// Cluster record: logical grouping bound to the resolved VPC.
///
/// Torn down with the stack (destroy removal policy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster name
    pub name: String,

    /// VPC the cluster is bound to
    pub vpc_id: String,
}

/// Task definition record: compute shape plus the built image it runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Configuration (family, cpu/memory, platform, container, policies)
    pub config: TaskDefinitionConfig,

    /// The image asset the single container references
    pub image: ImageAsset,
}

/// Service record: a service bound to its cluster and task definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Configuration (desired count, public IP)
    pub config: ServiceConfig,

    /// Cluster the service runs in
    pub cluster_name: String,

    /// Task definition family the service runs
    pub task_family: String,
}

/// Scheduled task record: bound to cluster, task definition, and VPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Configuration (schedule, count, enabled flag)
    pub config: ScheduledTaskConfig,

    /// Cluster invocations run in
    pub cluster_name: String,

    /// Task definition family invoked on schedule
    pub task_family: String,

    /// VPC invocations are placed in
    pub vpc_id: String,
}

/// A built stack: resolved and constructed resource records.
#[derive(Debug, Clone)]
pub struct FargateStack {
    name: String,
    vpc: Vpc,
    image_asset: ImageAsset,
    cluster: Cluster,
    task_definition: TaskDefinition,
    service: Service,
    scheduled_task: ScheduledTask,
}

impl FargateStack {
    /// Build the stack resource graph in fixed dependency order.
    ///
    /// # Errors
    ///
    /// Returns an error if the VPC lookup does not resolve or the image
    /// build context is missing. Either failure aborts construction
    /// immediately; there is no partial stack.
    #[instrument(skip(config, context), fields(stack = %config.name))]
    pub fn build(config: FargateStackConfig, context: &LookupContext) -> Result<Self> {
        info!("Building stack resource graph");

        let vpc = context.resolve_vpc(&config.vpc)?;
        let image_asset = ImageAssetBuilder::build(&config.image)?;

        let cluster =
            Cluster { name: format!("{}-cluster", config.name), vpc_id: vpc.vpc_id.clone() };

        let task_definition =
            TaskDefinition { config: config.task_definition, image: image_asset.clone() };

        let service = Service {
            config: config.service,
            cluster_name: cluster.name.clone(),
            task_family: task_definition.config.family.clone(),
        };

        let scheduled_task = ScheduledTask {
            config: config.scheduled_task,
            cluster_name: cluster.name.clone(),
            task_family: task_definition.config.family.clone(),
            vpc_id: vpc.vpc_id.clone(),
        };

        info!("Stack resource graph complete");
        Ok(Self { name: config.name, vpc, image_asset, cluster, task_definition, service, scheduled_task })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vpc(&self) -> &Vpc {
        &self.vpc
    }

    pub fn image_asset(&self) -> &ImageAsset {
        &self.image_asset
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    pub fn task_definition(&self) -> &TaskDefinition {
        &self.task_definition
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn scheduled_task(&self) -> &ScheduledTask {
        &self.scheduled_task
    }

    /// Synthesize the deployment template for this stack.
    pub fn synth(&self) -> Result<Template> {
        TemplateSynthesizer::synthesize(self)
    }
}

//! Synthesized deployment template.
//!
//! The output of stack synthesis: a CloudFormation-shaped document mapping
//! logical ids to resources. The template validates its own reference graph:
//! every `Ref`, `Fn::GetAtt` and `DependsOn` target must exist, and the graph
//! must be acyclic.

use crate::error::{Result, StratusError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Removal policy applied when the stack is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionPolicy {
    Delete,
    Retain,
}

/// A single resource in the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    /// Provider resource type (e.g., "AWS::ECS::Cluster")
    #[serde(rename = "Type")]
    pub resource_type: String,

    /// Resource properties
    pub properties: Value,

    /// Removal policy
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deletion_policy: Option<DeletionPolicy>,

    /// Explicit ordering edges beyond property references
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub depends_on: Vec<String>,
}

/// Synthesized deployment template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource under a logical id.
    pub fn add_resource(&mut self, logical_id: impl Into<String>, resource: Resource) {
        self.resources.insert(logical_id.into(), resource);
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn get_resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    /// All resources of the given provider type.
    pub fn find_resources(&self, resource_type: &str) -> Vec<(&str, &Resource)> {
        self.resources
            .iter()
            .filter(|(_, r)| r.resource_type == resource_type)
            .map(|(id, r)| (id.as_str(), r))
            .collect()
    }

    /// Distinct provider types present in the template.
    pub fn resource_types(&self) -> BTreeSet<&str> {
        self.resources.values().map(|r| r.resource_type.as_str()).collect()
    }

    pub fn logical_ids(&self) -> Vec<&str> {
        self.resources.keys().map(|id| id.as_str()).collect()
    }

    pub fn resources(&self) -> impl Iterator<Item = (&String, &Resource)> {
        self.resources.iter()
    }

    /// Logical ids a resource references through `Ref`, `Fn::GetAtt` or
    /// `DependsOn`. Pseudo references (`AWS::*`) are not logical ids and are
    /// excluded.
    pub fn referenced_logical_ids(resource: &Resource) -> BTreeSet<String> {
        let mut refs = BTreeSet::new();
        Self::collect_refs(&resource.properties, &mut refs);
        for dep in &resource.depends_on {
            refs.insert(dep.clone());
        }
        refs.retain(|target| !target.starts_with("AWS::"));
        refs
    }

    fn collect_refs(value: &Value, out: &mut BTreeSet<String>) {
        match value {
            Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(Value::String(target)) = map.get("Ref") {
                        out.insert(target.clone());
                        return;
                    }
                    match map.get("Fn::GetAtt") {
                        Some(Value::Array(parts)) => {
                            if let Some(Value::String(target)) = parts.first() {
                                out.insert(target.clone());
                            }
                            return;
                        }
                        Some(Value::String(shorthand)) => {
                            if let Some((target, _)) = shorthand.split_once('.') {
                                out.insert(target.to_string());
                            }
                            return;
                        }
                        _ => {}
                    }
                }
                for nested in map.values() {
                    Self::collect_refs(nested, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    Self::collect_refs(item, out);
                }
            }
            _ => {}
        }
    }

    /// Validate the reference graph: every referenced object must exist, and
    /// references must not form a cycle.
    pub fn validate(&self) -> Result<()> {
        // Build reference graph and check for dangling targets
        let mut graph: HashMap<&str, Vec<String>> = HashMap::new();
        for (id, resource) in &self.resources {
            let refs = Self::referenced_logical_ids(resource);
            for target in &refs {
                if !self.resources.contains_key(target) {
                    return Err(StratusError::DanglingReference {
                        resource: id.clone(),
                        target: target.clone(),
                    });
                }
            }
            graph.insert(id.as_str(), refs.into_iter().collect());
        }

        // Check for cycles using DFS
        for id in self.resources.keys() {
            let mut visited = HashSet::new();
            let mut stack = HashSet::new();
            if Self::has_cycle(&graph, id, &mut visited, &mut stack) {
                return Err(StratusError::CircularDependency { resource: id.clone() });
            }
        }

        Ok(())
    }

    fn has_cycle(
        graph: &HashMap<&str, Vec<String>>,
        node: &str,
        visited: &mut HashSet<String>,
        stack: &mut HashSet<String>,
    ) -> bool {
        if stack.contains(node) {
            return true;
        }
        if visited.contains(node) {
            return false;
        }

        visited.insert(node.to_string());
        stack.insert(node.to_string());

        if let Some(targets) = graph.get(node) {
            for target in targets {
                if Self::has_cycle(graph, target, visited, stack) {
                    return true;
                }
            }
        }

        stack.remove(node);
        false
    }

    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| StratusError::TemplateSerialization { reason: e.to_string() })
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StratusError::TemplateSerialization { reason: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(resource_type: &str, properties: Value) -> Resource {
        Resource {
            resource_type: resource_type.to_string(),
            properties,
            deletion_policy: None,
            depends_on: vec![],
        }
    }

    #[test]
    fn test_referenced_ids_from_ref_and_getatt() {
        let r = resource(
            "AWS::ECS::Service",
            json!({
                "Cluster": { "Ref": "Cluster" },
                "Role": { "Fn::GetAtt": ["TaskRole", "Arn"] },
                "Region": { "Ref": "AWS::Region" },
            }),
        );
        let refs = Template::referenced_logical_ids(&r);
        assert!(refs.contains("Cluster"));
        assert!(refs.contains("TaskRole"));
        assert!(!refs.iter().any(|t| t.starts_with("AWS::")));
    }

    #[test]
    fn test_depends_on_counts_as_reference() {
        let mut r = resource("AWS::ECS::Service", json!({}));
        r.depends_on.push("TaskDefinition".to_string());
        assert!(Template::referenced_logical_ids(&r).contains("TaskDefinition"));
    }

    #[test]
    fn test_validate_accepts_resolved_references() {
        let mut template = Template::new();
        template.add_resource("Cluster", resource("AWS::ECS::Cluster", json!({})));
        template.add_resource(
            "Service",
            resource("AWS::ECS::Service", json!({ "Cluster": { "Ref": "Cluster" } })),
        );
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_reference() {
        let mut template = Template::new();
        template.add_resource(
            "Service",
            resource("AWS::ECS::Service", json!({ "Cluster": { "Ref": "Cluster" } })),
        );
        let err = template.validate();
        assert!(matches!(err, Err(StratusError::DanglingReference { .. })));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let mut template = Template::new();
        template.add_resource("A", resource("AWS::ECS::Cluster", json!({ "X": { "Ref": "B" } })));
        template.add_resource("B", resource("AWS::ECS::Cluster", json!({ "X": { "Ref": "A" } })));
        let err = template.validate();
        assert!(matches!(err, Err(StratusError::CircularDependency { .. })));
    }

    #[test]
    fn test_serialized_shape() {
        let mut template = Template::new();
        let mut cluster = resource("AWS::ECS::Cluster", json!({ "ClusterName": "demo" }));
        cluster.deletion_policy = Some(DeletionPolicy::Delete);
        template.add_resource("Cluster", cluster);

        let doc = template.to_json().unwrap();
        assert_eq!(doc["Resources"]["Cluster"]["Type"], "AWS::ECS::Cluster");
        assert_eq!(doc["Resources"]["Cluster"]["DeletionPolicy"], "Delete");
        assert_eq!(doc["Resources"]["Cluster"]["Properties"]["ClusterName"], "demo");
    }
}

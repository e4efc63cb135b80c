//! ROS 2-style YAML parameter files and per-node parameter declaration.
//!
//! ```yaml
//! /**:
//!   ros__parameters:
//!     period_ms: 500
//!
//! /main_navigation_node:
//!   ros__parameters:
//!     wall_distance_threshold: 0.8
//! ```
//!
//! Node selectors: `/**` matches every node, `/ns/**` every node under `/ns`,
//! `/ns/*` one level under `/ns`, anything else must equal the node's fully
//! qualified name. Entries later in the file override earlier ones.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{NodeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterType {
    NotSet,
    Bool,
    Integer,
    Double,
    String,
    ByteArray,
    BoolArray,
    IntegerArray,
    DoubleArray,
    StringArray,
}

/// A typed parameter value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ParameterValue {
    #[default]
    NotSet,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(std::string::String),
    ByteArray(Vec<u8>),
    BoolArray(Vec<bool>),
    IntegerArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<std::string::String>),
}

impl ParameterValue {
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Self::NotSet => ParameterType::NotSet,
            Self::Bool(_) => ParameterType::Bool,
            Self::Integer(_) => ParameterType::Integer,
            Self::Double(_) => ParameterType::Double,
            Self::String(_) => ParameterType::String,
            Self::ByteArray(_) => ParameterType::ByteArray,
            Self::BoolArray(_) => ParameterType::BoolArray,
            Self::IntegerArray(_) => ParameterType::IntegerArray,
            Self::DoubleArray(_) => ParameterType::DoubleArray,
            Self::StringArray(_) => ParameterType::StringArray,
        }
    }
}

/// Load parameter overrides from a YAML file for the given node.
///
/// Returns only the parameters whose selector matches `node_fqn`.
pub fn load_parameter_file(path: &Path, node_fqn: &str) -> Result<HashMap<String, ParameterValue>> {
    let content = std::fs::read_to_string(path).map_err(|source| NodeError::ParameterFile {
        path: path.to_path_buf(),
        source,
    })?;
    load_parameter_string(&content, node_fqn)
}

/// Parse a YAML string and extract parameter overrides for the given node.
pub fn load_parameter_string(yaml: &str, node_fqn: &str) -> Result<HashMap<String, ParameterValue>> {
    if yaml.trim().is_empty() {
        return Ok(HashMap::new());
    }
    let doc: Value = serde_yaml::from_str(yaml)?;
    if doc.is_null() {
        return Ok(HashMap::new());
    }

    let mapping = doc
        .as_mapping()
        .ok_or_else(|| NodeError::ParameterFormat("YAML root must be a mapping".to_string()))?;

    let mut result = HashMap::new();

    for (key, node_val) in mapping {
        let selector = key
            .as_str()
            .ok_or_else(|| NodeError::ParameterFormat("YAML keys must be strings".to_string()))?;

        if !matches_node(selector, node_fqn) {
            continue;
        }

        let node_map = node_val.as_mapping().ok_or_else(|| {
            NodeError::ParameterFormat(format!("value for '{selector}' must be a mapping"))
        })?;

        let Some(params) = node_map.get("ros__parameters") else {
            continue;
        };
        let params_map = params.as_mapping().ok_or_else(|| {
            NodeError::ParameterFormat("ros__parameters must be a mapping".to_string())
        })?;

        for (pname, pval) in params_map {
            let name = pname.as_str().ok_or_else(|| {
                NodeError::ParameterFormat("parameter names must be strings".to_string())
            })?;

            if let Some(value) = yaml_value_to_parameter(pval) {
                result.insert(name.to_string(), value);
            }
        }
    }

    Ok(result)
}

fn matches_node(selector: &str, node_fqn: &str) -> bool {
    if selector == "/**" || selector == "**" {
        return true;
    }

    if let Some(prefix) = selector.strip_suffix("/**") {
        return node_fqn.starts_with(prefix);
    }

    if let Some(prefix) = selector.strip_suffix("/*") {
        let Some(rest) = node_fqn.strip_prefix(prefix) else {
            return false;
        };
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        return !rest.is_empty() && !rest.contains('/');
    }

    selector == node_fqn
}

fn yaml_value_to_parameter(val: &Value) -> Option<ParameterValue> {
    match val {
        Value::Bool(b) => Some(ParameterValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(ParameterValue::Integer)
            .or_else(|| n.as_f64().map(ParameterValue::Double)),
        Value::String(s) => Some(ParameterValue::String(s.clone())),
        Value::Sequence(seq) => infer_sequence_type(seq),
        Value::Null => Some(ParameterValue::NotSet),
        _ => None,
    }
}

fn infer_sequence_type(seq: &[Value]) -> Option<ParameterValue> {
    match seq.first() {
        None => Some(ParameterValue::StringArray(vec![])),
        Some(Value::Bool(_)) => seq
            .iter()
            .map(Value::as_bool)
            .collect::<Option<Vec<_>>>()
            .map(ParameterValue::BoolArray),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {
            let ints = seq.iter().map(Value::as_i64).collect::<Option<Vec<_>>>()?;
            if seq.len() > 1 && ints.iter().all(|i| (0..=255).contains(i)) {
                Some(ParameterValue::ByteArray(
                    ints.iter().filter_map(|&i| u8::try_from(i).ok()).collect(),
                ))
            } else {
                Some(ParameterValue::IntegerArray(ints))
            }
        }
        Some(Value::Number(_)) => seq
            .iter()
            .map(Value::as_f64)
            .collect::<Option<Vec<_>>>()
            .map(ParameterValue::DoubleArray),
        Some(Value::String(_)) => seq
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(ParameterValue::StringArray),
        _ => None,
    }
}

/// Parameters of one node: declared defaults overridden from a file.
#[derive(Debug, Clone, Default)]
pub struct NodeParameters {
    node_name: String,
    overrides: HashMap<String, ParameterValue>,
}

impl NodeParameters {
    /// Node without overrides: every declaration yields its default.
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            overrides: HashMap::new(),
        }
    }

    /// Overrides for `node_name` from `path`, or none when `path` is `None`.
    pub fn load(node_name: impl Into<String>, path: Option<&Path>) -> Result<Self> {
        let mut params = Self::new(node_name);
        if let Some(path) = path {
            params.overrides = load_parameter_file(path, &params.fqn())?;
        }
        Ok(params)
    }

    pub fn from_yaml(node_name: impl Into<String>, yaml: &str) -> Result<Self> {
        let mut params = Self::new(node_name);
        params.overrides = load_parameter_string(yaml, &params.fqn())?;
        Ok(params)
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// Fully qualified name in the root namespace.
    pub fn fqn(&self) -> String {
        format!("/{}", self.node_name)
    }

    fn lookup(&self, name: &str) -> Option<&ParameterValue> {
        self.overrides
            .get(name)
            .filter(|v| !matches!(v, ParameterValue::NotSet))
    }

    fn type_error(name: &str, expected: ParameterType, found: &ParameterValue) -> NodeError {
        NodeError::ParameterType {
            name: name.to_string(),
            expected,
            found: found.parameter_type(),
        }
    }

    pub fn declare_i64(&self, name: &str, default: i64) -> Result<i64> {
        let value = match self.lookup(name) {
            None => default,
            Some(ParameterValue::Integer(i)) => *i,
            Some(other) => return Err(Self::type_error(name, ParameterType::Integer, other)),
        };
        debug!("[PRM] {}: {} = {}", self.node_name, name, value);
        Ok(value)
    }

    /// Integers are accepted for double parameters.
    pub fn declare_f64(&self, name: &str, default: f64) -> Result<f64> {
        let value = match self.lookup(name) {
            None => default,
            Some(ParameterValue::Double(d)) => *d,
            Some(ParameterValue::Integer(i)) => *i as f64,
            Some(other) => return Err(Self::type_error(name, ParameterType::Double, other)),
        };
        debug!("[PRM] {}: {} = {}", self.node_name, name, value);
        Ok(value)
    }

    /// A period in milliseconds; must be positive.
    pub fn declare_period_ms(&self, name: &str, default_ms: u64) -> Result<Duration> {
        let default = i64::try_from(default_ms).unwrap_or(i64::MAX);
        let ms = self.declare_i64(name, default)?;
        match u64::try_from(ms) {
            Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
            _ => Err(NodeError::InvalidParameter {
                name: name.to_string(),
                reason: format!("period must be positive, got {ms}"),
            }),
        }
    }
}

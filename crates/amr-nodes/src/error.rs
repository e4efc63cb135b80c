use std::path::PathBuf;

use custom_interfaces::action::{GoalEvent, GoalStatus};

use crate::params::ParameterType;

pub type Result<T> = std::result::Result<T, NodeError>;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error(transparent)]
    Interface(#[from] custom_interfaces::Error),

    #[error("failed to read parameter file {path:?}: {source}")]
    ParameterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    ParameterYaml(#[from] serde_yaml::Error),

    #[error("malformed parameter file: {0}")]
    ParameterFormat(String),

    #[error("parameter '{name}' expected {expected}, found {found}")]
    ParameterType {
        name: String,
        expected: ParameterType,
        found: ParameterType,
    },

    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("invalid goal transition: {event} from {from}")]
    InvalidTransition { from: GoalStatus, event: GoalEvent },

    #[error("{0} channel closed")]
    ChannelClosed(&'static str),

    #[error("action worker panicked")]
    WorkerPanicked,
}

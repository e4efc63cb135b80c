//! `custom_interfaces` ROS 2 interface package
//!
//! Records for the package's messages, services and actions, plus what a
//! middleware needs to carry them:
//! - value semantics (`Record`) and fluent staged builders
//! - type metadata (`MessageTypeInfo`, `RosService`, `RosAction`)
//! - CDR little-endian encoding through the `cdr` crate
//! - static introspection tables and RIHS01 type hashes
//! - a process-wide, once-initialized type-support registry
//!
//! The handful of foreign ROS types these records and the demo nodes refer to
//! are bundled alongside.

pub mod action;
pub mod builtin_interfaces;
pub mod error;
pub mod geometry_msgs;
pub mod introspection;
mod macros;
pub mod msg;
pub mod registry;
pub mod schema;
pub mod sensor_msgs;
pub mod sequence;
pub mod srv;
pub mod std_msgs;
pub mod std_srvs;
pub mod traits;
pub mod unique_identifier_msgs;

pub use error::{Error, Result, SequenceError};
pub use schema::TypeHash;
pub use sequence::Sequence;
pub use traits::{CdrSerdes, MessageTypeInfo, Record, RosMessage, RosService};

//! `unique_identifier_msgs/msg/UUID`, the goal identifier of every action.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_message;
use crate::introspection::{Collection, FieldType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uuid {
    pub uuid: [u8; 16],
}

impl Uuid {
    /// Random version 4 identifier.
    pub fn new_v4() -> Self {
        Self {
            uuid: *uuid::Uuid::new_v4().as_bytes(),
        }
    }

    pub const fn from_bytes(uuid: [u8; 16]) -> Self {
        Self { uuid }
    }

    /// `false` for the all-zero identifier, which ROS reserves for "every goal".
    pub fn is_valid(&self) -> bool {
        self.uuid.iter().any(|&b| b != 0)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.uuid
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        uuid::Uuid::from_bytes(self.uuid).fmt(f)
    }
}

impl_message! {
    Uuid,
    package: "unique_identifier_msgs",
    interface: "msg",
    name: "UUID",
    fields: [
        uuid: FieldType::UInt8 => Collection::Array(16),
    ],
}

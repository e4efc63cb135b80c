use serde::{Deserialize, Serialize};

use crate::impl_message;
use crate::introspection::FieldType;
use crate::traits::MessageTypeInfo;

/// `geometry_msgs/msg/Vector3`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// `geometry_msgs/msg/Twist`, the velocity command published on `cmd_vel`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist {
    /// All-zero command: stop.
    pub fn stop() -> Self {
        Self::default()
    }

    pub fn forward(speed: f64) -> Self {
        Self {
            linear: Vector3 {
                x: speed,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn yaw(rate: f64) -> Self {
        Self {
            angular: Vector3 {
                z: rate,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl_message! {
    Vector3,
    package: "geometry_msgs",
    interface: "msg",
    name: "Vector3",
    fields: [
        x: FieldType::Float64,
        y: FieldType::Float64,
        z: FieldType::Float64,
    ],
}

impl_message! {
    Twist,
    package: "geometry_msgs",
    interface: "msg",
    name: "Twist",
    fields: [
        linear: FieldType::Message(<Vector3 as MessageTypeInfo>::members),
        angular: FieldType::Message(<Vector3 as MessageTypeInfo>::members),
    ],
}

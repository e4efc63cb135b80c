use serde::{Deserialize, Serialize};

use crate::introspection::FieldType;
use crate::{impl_message, staged_builder};

/// `custom_interfaces/msg/Temperature`, degrees Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Temperature {
    pub temperature: i32,
}

impl_message! {
    Temperature,
    package: "custom_interfaces",
    interface: "msg",
    name: "Temperature",
    fields: [temperature: FieldType::Int32],
}

staged_builder!(Temperature, InitTemperatureTemperature => temperature: i32);

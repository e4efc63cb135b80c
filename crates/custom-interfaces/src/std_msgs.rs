use serde::{Deserialize, Serialize};

use crate::builtin_interfaces::Time;
use crate::impl_message;
use crate::introspection::FieldType;
use crate::traits::MessageTypeInfo;

/// `std_msgs/msg/Header`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

impl_message! {
    Header,
    package: "std_msgs",
    interface: "msg",
    name: "Header",
    fields: [
        stamp: FieldType::Message(<Time as MessageTypeInfo>::members),
        frame_id: FieldType::String,
    ],
}

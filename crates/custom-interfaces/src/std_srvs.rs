use serde::{Deserialize, Serialize};

use crate::introspection::FieldType;
use crate::{define_service, impl_message};

/// `std_srvs/srv/Empty`
pub struct Empty;

/// Empty structures carry one placeholder byte on the wire, as generated IDL does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyRequest {
    pub structure_needs_at_least_one_member: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse {
    pub structure_needs_at_least_one_member: u8,
}

impl_message! {
    EmptyRequest,
    package: "std_srvs",
    interface: "srv",
    name: "Empty_Request",
    fields: [
        structure_needs_at_least_one_member: FieldType::UInt8,
    ],
}

impl_message! {
    EmptyResponse,
    package: "std_srvs",
    interface: "srv",
    name: "Empty_Response",
    fields: [
        structure_needs_at_least_one_member: FieldType::UInt8,
    ],
}

define_service! {
    Empty,
    package: "std_srvs",
    name: "Empty",
    Request: EmptyRequest,
    Response: EmptyResponse,
}

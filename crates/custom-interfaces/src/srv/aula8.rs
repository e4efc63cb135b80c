use serde::{Deserialize, Serialize};

use crate::introspection::FieldType;
use crate::{define_service, impl_message, staged_builder};

/// `custom_interfaces/srv/Aula8`: add two integers.
pub struct Aula8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aula8Request {
    pub a: i64,
    pub b: i64,
}

/// `sum` is whatever the server put there; nothing ties it to the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aula8Response {
    pub sum: i64,
}

impl_message! {
    Aula8Request,
    package: "custom_interfaces",
    interface: "srv",
    name: "Aula8_Request",
    fields: [
        a: FieldType::Int64,
        b: FieldType::Int64,
    ],
}

impl_message! {
    Aula8Response,
    package: "custom_interfaces",
    interface: "srv",
    name: "Aula8_Response",
    fields: [sum: FieldType::Int64],
}

staged_builder!(Aula8Request, InitAula8RequestA => a: i64, InitAula8RequestB => b: i64);
staged_builder!(Aula8Response, InitAula8ResponseSum => sum: i64);

define_service! {
    Aula8,
    package: "custom_interfaces",
    name: "Aula8",
    Request: Aula8Request,
    Response: Aula8Response,
}

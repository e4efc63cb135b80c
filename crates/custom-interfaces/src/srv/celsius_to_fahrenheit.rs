use serde::{Deserialize, Serialize};

use crate::introspection::FieldType;
use crate::{define_service, impl_message, staged_builder};

/// `custom_interfaces/srv/CelsiusToFahrenheit`
pub struct CelsiusToFahrenheit;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CelsiusToFahrenheitRequest {
    pub celsius: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CelsiusToFahrenheitResponse {
    pub fahrenheit: f64,
}

impl_message! {
    CelsiusToFahrenheitRequest,
    package: "custom_interfaces",
    interface: "srv",
    name: "CelsiusToFahrenheit_Request",
    fields: [celsius: FieldType::Float64],
}

impl_message! {
    CelsiusToFahrenheitResponse,
    package: "custom_interfaces",
    interface: "srv",
    name: "CelsiusToFahrenheit_Response",
    fields: [fahrenheit: FieldType::Float64],
}

staged_builder!(
    CelsiusToFahrenheitRequest,
    InitCelsiusToFahrenheitRequestCelsius => celsius: f64
);
staged_builder!(
    CelsiusToFahrenheitResponse,
    InitCelsiusToFahrenheitResponseFahrenheit => fahrenheit: f64
);

define_service! {
    CelsiusToFahrenheit,
    package: "custom_interfaces",
    name: "CelsiusToFahrenheit",
    Request: CelsiusToFahrenheitRequest,
    Response: CelsiusToFahrenheitResponse,
}

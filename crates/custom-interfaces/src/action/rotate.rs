//! `custom_interfaces/action/Rotate`: turn in place by an angle in degrees.

use serde::{Deserialize, Serialize};

use super::{FeedbackMessage, GetResultRequest, GetResultResponse, SendGoalRequest, SendGoalResponse};
use crate::introspection::FieldType;
use crate::{define_action, impl_message, staged_builder};

pub struct Rotate;

/// Signed angle in degrees; positive turns counter-clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotateGoal {
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotateResult {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotateFeedback {
    pub remaining_degrees: f64,
}

pub type RotateSendGoalRequest = SendGoalRequest<Rotate>;
pub type RotateSendGoalResponse = SendGoalResponse<Rotate>;
pub type RotateGetResultRequest = GetResultRequest<Rotate>;
pub type RotateGetResultResponse = GetResultResponse<Rotate>;
pub type RotateFeedbackMessage = FeedbackMessage<Rotate>;

impl_message! {
    RotateGoal,
    package: "custom_interfaces",
    interface: "action",
    name: "Rotate_Goal",
    fields: [angle: FieldType::Float64],
}

impl_message! {
    RotateResult,
    package: "custom_interfaces",
    interface: "action",
    name: "Rotate_Result",
    fields: [success: FieldType::Bool],
}

impl_message! {
    RotateFeedback,
    package: "custom_interfaces",
    interface: "action",
    name: "Rotate_Feedback",
    fields: [remaining_degrees: FieldType::Float64],
}

staged_builder!(RotateGoal, InitRotateGoalAngle => angle: f64);
staged_builder!(RotateResult, InitRotateResultSuccess => success: bool);
staged_builder!(RotateFeedback, InitRotateFeedbackRemainingDegrees => remaining_degrees: f64);

define_action! {
    Rotate,
    package: "custom_interfaces",
    name: "Rotate",
    Goal: RotateGoal,
    Result: RotateResult,
    Feedback: RotateFeedback,
}

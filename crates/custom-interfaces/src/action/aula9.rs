//! `custom_interfaces/action/Aula9`: count up to a number.

use serde::{Deserialize, Serialize};

use super::{FeedbackMessage, GetResultRequest, GetResultResponse, SendGoalRequest, SendGoalResponse};
use crate::introspection::FieldType;
use crate::{define_action, impl_message, staged_builder};

pub struct Aula9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aula9Goal {
    pub count_up_to: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aula9Result {
    pub final_count: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aula9Feedback {
    pub current_number: i32,
}

pub type Aula9SendGoalRequest = SendGoalRequest<Aula9>;
pub type Aula9SendGoalResponse = SendGoalResponse<Aula9>;
pub type Aula9GetResultRequest = GetResultRequest<Aula9>;
pub type Aula9GetResultResponse = GetResultResponse<Aula9>;
pub type Aula9FeedbackMessage = FeedbackMessage<Aula9>;

impl_message! {
    Aula9Goal,
    package: "custom_interfaces",
    interface: "action",
    name: "Aula9_Goal",
    fields: [count_up_to: FieldType::Int32],
}

impl_message! {
    Aula9Result,
    package: "custom_interfaces",
    interface: "action",
    name: "Aula9_Result",
    fields: [final_count: FieldType::Int32],
}

impl_message! {
    Aula9Feedback,
    package: "custom_interfaces",
    interface: "action",
    name: "Aula9_Feedback",
    fields: [current_number: FieldType::Int32],
}

staged_builder!(Aula9Goal, InitAula9GoalCountUpTo => count_up_to: i32);
staged_builder!(Aula9Result, InitAula9ResultFinalCount => final_count: i32);
staged_builder!(Aula9Feedback, InitAula9FeedbackCurrentNumber => current_number: i32);

define_action! {
    Aula9,
    package: "custom_interfaces",
    name: "Aula9",
    Goal: Aula9Goal,
    Result: Aula9Result,
    Feedback: Aula9Feedback,
}

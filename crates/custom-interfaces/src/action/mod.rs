//! Actions: the `RosAction` trait, the generated envelope records and the
//! ROS 2 goal state machine.
//!
//! Every action `X` exchanges five envelopes besides its own goal, result and
//! feedback records:
//!
//! | Envelope | Carried over |
//! |---|---|
//! | [`SendGoalRequest`] / [`SendGoalResponse`] | `X/_action/send_goal` |
//! | [`GetResultRequest`] / [`GetResultResponse`] | `X/_action/get_result` |
//! | [`FeedbackMessage`] | `X/_action/feedback` |
//!
//! The envelopes are generic over the action so their CDR layout, metadata and
//! introspection tables come from the action's `define_action!` invocation.

use std::fmt;
use std::marker::PhantomData;

use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::builtin_interfaces::Time;
use crate::error::Error;
use crate::impl_message;
use crate::introspection::{ActionMembers, FieldType, MessageMembers};
use crate::traits::{MessageTypeInfo, RosMessage};
use crate::unique_identifier_msgs::Uuid;

pub mod aula9;
pub mod rotate;

pub use aula9::*;
pub use rotate::*;

/// Metadata strings of one envelope record.
#[derive(Debug, Clone, Copy)]
pub struct WrapperNames {
    pub type_name: &'static str,
    pub data_type: &'static str,
    pub dds_type_name: &'static str,
}

/// Every ROS name derived from an action definition.
#[derive(Debug, Clone, Copy)]
pub struct ActionTypeNames {
    /// `package/action/Name`
    pub action: &'static str,
    /// `package/action/Name_SendGoal`
    pub send_goal: &'static str,
    /// `package/action/Name_GetResult`
    pub get_result: &'static str,
    pub send_goal_request: WrapperNames,
    pub send_goal_response: WrapperNames,
    pub get_result_request: WrapperNames,
    pub get_result_response: WrapperNames,
    pub feedback_message: WrapperNames,
}

/// Core trait for ROS 2 actions
pub trait RosAction: Send + Sync + 'static {
    type Goal: RosMessage;
    type Result: RosMessage;
    type Feedback: RosMessage;

    const NAMES: ActionTypeNames;

    fn members() -> &'static ActionMembers;

    fn type_name() -> &'static str {
        Self::NAMES.action
    }

    fn send_goal_service(action_name: &str) -> String {
        format!("{action_name}/_action/send_goal")
    }

    fn get_result_service(action_name: &str) -> String {
        format!("{action_name}/_action/get_result")
    }

    fn cancel_goal_service(action_name: &str) -> String {
        format!("{action_name}/_action/cancel_goal")
    }

    fn feedback_topic(action_name: &str) -> String {
        format!("{action_name}/_action/feedback")
    }

    fn status_topic(action_name: &str) -> String {
        format!("{action_name}/_action/status")
    }
}

/// Status of an action goal.
///
/// Travels as the `int8 status` of a get-result response.
///
/// ```
/// # use custom_interfaces::action::GoalStatus;
/// let status = GoalStatus::Executing;
/// assert!(status.is_active());
/// assert!(!status.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[repr(i8)]
pub enum GoalStatus {
    /// Unknown status (initial state).
    Unknown = 0,
    /// Goal has been accepted by the server.
    Accepted = 1,
    /// Goal is currently being executed.
    Executing = 2,
    /// Goal is being canceled.
    Canceling = 3,
    /// Goal completed successfully.
    Succeeded = 4,
    /// Goal was canceled.
    Canceled = 5,
    /// Goal failed/aborted.
    Aborted = 6,
}

impl GoalStatus {
    /// Active states are `Accepted`, `Executing`, and `Canceling`.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Accepted | Self::Executing | Self::Canceling)
    }

    /// Terminal states are `Succeeded`, `Canceled`, and `Aborted`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Canceled | Self::Aborted)
    }

    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

impl TryFrom<i8> for GoalStatus {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Error> {
        Ok(match value {
            0 => Self::Unknown,
            1 => Self::Accepted,
            2 => Self::Executing,
            3 => Self::Canceling,
            4 => Self::Succeeded,
            5 => Self::Canceled,
            6 => Self::Aborted,
            other => return Err(Error::InvalidGoalStatus(other)),
        })
    }
}

/// Events that can trigger goal state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum GoalEvent {
    /// Start executing an accepted goal.
    Execute,
    /// Request to cancel the goal.
    CancelGoal,
    /// Goal execution completed successfully.
    Succeed,
    /// Goal execution failed.
    Abort,
    /// Goal was successfully canceled.
    Canceled,
}

/// Transitions a goal status based on an event.
///
/// Implements the ROS 2 action state machine. Invalid transitions return
/// `GoalStatus::Unknown`.
///
/// ```
/// # use custom_interfaces::action::{GoalStatus, GoalEvent, transition_goal_state};
/// let new_status = transition_goal_state(GoalStatus::Accepted, GoalEvent::Execute);
/// assert_eq!(new_status, GoalStatus::Executing);
/// ```
pub fn transition_goal_state(current: GoalStatus, event: GoalEvent) -> GoalStatus {
    match (current, event) {
        // From ACCEPTED
        (GoalStatus::Accepted, GoalEvent::Execute) => GoalStatus::Executing,
        (GoalStatus::Accepted, GoalEvent::CancelGoal) => GoalStatus::Canceling,

        // From EXECUTING
        (GoalStatus::Executing, GoalEvent::CancelGoal) => GoalStatus::Canceling,
        (GoalStatus::Executing, GoalEvent::Succeed) => GoalStatus::Succeeded,
        (GoalStatus::Executing, GoalEvent::Abort) => GoalStatus::Aborted,

        // From CANCELING
        (GoalStatus::Canceling, GoalEvent::Canceled) => GoalStatus::Canceled,
        (GoalStatus::Canceling, GoalEvent::Succeed) => GoalStatus::Succeeded,
        (GoalStatus::Canceling, GoalEvent::Abort) => GoalStatus::Aborted,

        _ => GoalStatus::Unknown,
    }
}

/// `action_msgs/msg/GoalInfo`: a goal id and its acceptance stamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalInfo {
    pub goal_id: Uuid,
    pub stamp: Time,
}

impl GoalInfo {
    /// Info stamped with the current wall-clock time.
    pub fn new(goal_id: Uuid) -> Self {
        Self {
            goal_id,
            stamp: Time::now(),
        }
    }
}

impl_message! {
    GoalInfo,
    package: "action_msgs",
    interface: "msg",
    name: "GoalInfo",
    fields: [
        goal_id: FieldType::Message(<Uuid as MessageTypeInfo>::members),
        stamp: FieldType::Message(<Time as MessageTypeInfo>::members),
    ],
}

// Envelope records

/// Request to send a goal to an action server.
pub struct SendGoalRequest<A: RosAction> {
    pub goal_id: Uuid,
    pub goal: A::Goal,
}

/// Whether the goal was accepted, stamped with the acceptance time.
pub struct SendGoalResponse<A: RosAction> {
    pub accepted: bool,
    pub stamp: Time,
    _action: PhantomData<A>,
}

/// Request for the result of a goal.
pub struct GetResultRequest<A: RosAction> {
    pub goal_id: Uuid,
    _action: PhantomData<A>,
}

/// Final status (as `int8`) and result of a goal.
pub struct GetResultResponse<A: RosAction> {
    pub status: i8,
    pub result: A::Result,
}

/// Progress update published while a goal executes.
pub struct FeedbackMessage<A: RosAction> {
    pub goal_id: Uuid,
    pub feedback: A::Feedback,
}

impl<A: RosAction> SendGoalRequest<A> {
    pub fn new(goal_id: Uuid, goal: A::Goal) -> Self {
        Self { goal_id, goal }
    }
}

impl<A: RosAction> SendGoalResponse<A> {
    pub fn new(accepted: bool, stamp: Time) -> Self {
        Self {
            accepted,
            stamp,
            _action: PhantomData,
        }
    }
}

impl<A: RosAction> GetResultRequest<A> {
    pub fn new(goal_id: Uuid) -> Self {
        Self {
            goal_id,
            _action: PhantomData,
        }
    }
}

impl<A: RosAction> GetResultResponse<A> {
    pub fn new(status: GoalStatus, result: A::Result) -> Self {
        Self {
            status: status.as_i8(),
            result,
        }
    }

    /// Decoded `status`; fails for values outside the ROS status range.
    pub fn goal_status(&self) -> crate::Result<GoalStatus> {
        GoalStatus::try_from(self.status)
    }
}

impl<A: RosAction> FeedbackMessage<A> {
    pub fn new(goal_id: Uuid, feedback: A::Feedback) -> Self {
        Self { goal_id, feedback }
    }
}

// Value contract. Derives would put bounds on `A` itself, which is only a marker.

impl<A: RosAction> Default for SendGoalRequest<A> {
    fn default() -> Self {
        Self::new(Uuid::default(), A::Goal::default())
    }
}

impl<A: RosAction> Default for SendGoalResponse<A> {
    fn default() -> Self {
        Self::new(false, Time::default())
    }
}

impl<A: RosAction> Default for GetResultRequest<A> {
    fn default() -> Self {
        Self::new(Uuid::default())
    }
}

impl<A: RosAction> Default for GetResultResponse<A> {
    fn default() -> Self {
        Self {
            status: GoalStatus::Unknown.as_i8(),
            result: A::Result::default(),
        }
    }
}

impl<A: RosAction> Default for FeedbackMessage<A> {
    fn default() -> Self {
        Self::new(Uuid::default(), A::Feedback::default())
    }
}

impl<A: RosAction> Clone for SendGoalRequest<A> {
    fn clone(&self) -> Self {
        Self::new(self.goal_id, self.goal.clone())
    }
}

impl<A: RosAction> Clone for SendGoalResponse<A> {
    fn clone(&self) -> Self {
        Self::new(self.accepted, self.stamp)
    }
}

impl<A: RosAction> Clone for GetResultRequest<A> {
    fn clone(&self) -> Self {
        Self::new(self.goal_id)
    }
}

impl<A: RosAction> Clone for GetResultResponse<A> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            result: self.result.clone(),
        }
    }
}

impl<A: RosAction> Clone for FeedbackMessage<A> {
    fn clone(&self) -> Self {
        Self::new(self.goal_id, self.feedback.clone())
    }
}

impl<A: RosAction> PartialEq for SendGoalRequest<A> {
    fn eq(&self, other: &Self) -> bool {
        self.goal_id == other.goal_id && self.goal == other.goal
    }
}

impl<A: RosAction> PartialEq for SendGoalResponse<A> {
    fn eq(&self, other: &Self) -> bool {
        self.accepted == other.accepted && self.stamp == other.stamp
    }
}

impl<A: RosAction> PartialEq for GetResultRequest<A> {
    fn eq(&self, other: &Self) -> bool {
        self.goal_id == other.goal_id
    }
}

impl<A: RosAction> PartialEq for GetResultResponse<A> {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && self.result == other.result
    }
}

impl<A: RosAction> PartialEq for FeedbackMessage<A> {
    fn eq(&self, other: &Self) -> bool {
        self.goal_id == other.goal_id && self.feedback == other.feedback
    }
}

impl<A: RosAction> fmt::Debug for SendGoalRequest<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(A::NAMES.send_goal_request.type_name)
            .field("goal_id", &self.goal_id)
            .field("goal", &self.goal)
            .finish()
    }
}

impl<A: RosAction> fmt::Debug for SendGoalResponse<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(A::NAMES.send_goal_response.type_name)
            .field("accepted", &self.accepted)
            .field("stamp", &self.stamp)
            .finish()
    }
}

impl<A: RosAction> fmt::Debug for GetResultRequest<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(A::NAMES.get_result_request.type_name)
            .field("goal_id", &self.goal_id)
            .finish()
    }
}

impl<A: RosAction> fmt::Debug for GetResultResponse<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(A::NAMES.get_result_response.type_name)
            .field("status", &self.status)
            .field("result", &self.result)
            .finish()
    }
}

impl<A: RosAction> fmt::Debug for FeedbackMessage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(A::NAMES.feedback_message.type_name)
            .field("goal_id", &self.goal_id)
            .field("feedback", &self.feedback)
            .finish()
    }
}

// Wire format: fields in declaration order, the action marker never travels.

impl<A: RosAction> Serialize for SendGoalRequest<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SendGoalRequest", 2)?;
        state.serialize_field("goal_id", &self.goal_id)?;
        state.serialize_field("goal", &self.goal)?;
        state.end()
    }
}

impl<'de, A: RosAction> Deserialize<'de> for SendGoalRequest<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct SendGoalRequestHelper<G> {
            goal_id: Uuid,
            goal: G,
        }
        let helper = SendGoalRequestHelper::<A::Goal>::deserialize(deserializer)?;
        Ok(Self::new(helper.goal_id, helper.goal))
    }
}

impl<A: RosAction> Serialize for SendGoalResponse<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SendGoalResponse", 2)?;
        state.serialize_field("accepted", &self.accepted)?;
        state.serialize_field("stamp", &self.stamp)?;
        state.end()
    }
}

impl<'de, A: RosAction> Deserialize<'de> for SendGoalResponse<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct SendGoalResponseHelper {
            accepted: bool,
            stamp: Time,
        }
        let helper = SendGoalResponseHelper::deserialize(deserializer)?;
        Ok(Self::new(helper.accepted, helper.stamp))
    }
}

impl<A: RosAction> Serialize for GetResultRequest<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GetResultRequest", 1)?;
        state.serialize_field("goal_id", &self.goal_id)?;
        state.end()
    }
}

impl<'de, A: RosAction> Deserialize<'de> for GetResultRequest<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct GetResultRequestHelper {
            goal_id: Uuid,
        }
        let helper = GetResultRequestHelper::deserialize(deserializer)?;
        Ok(Self::new(helper.goal_id))
    }
}

impl<A: RosAction> Serialize for GetResultResponse<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GetResultResponse", 2)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("result", &self.result)?;
        state.end()
    }
}

impl<'de, A: RosAction> Deserialize<'de> for GetResultResponse<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct GetResultResponseHelper<R> {
            status: i8,
            result: R,
        }
        let helper = GetResultResponseHelper::<A::Result>::deserialize(deserializer)?;
        Ok(Self {
            status: helper.status,
            result: helper.result,
        })
    }
}

impl<A: RosAction> Serialize for FeedbackMessage<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FeedbackMessage", 2)?;
        state.serialize_field("goal_id", &self.goal_id)?;
        state.serialize_field("feedback", &self.feedback)?;
        state.end()
    }
}

impl<'de, A: RosAction> Deserialize<'de> for FeedbackMessage<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct FeedbackMessageHelper<F> {
            goal_id: Uuid,
            feedback: F,
        }
        let helper = FeedbackMessageHelper::<A::Feedback>::deserialize(deserializer)?;
        Ok(Self::new(helper.goal_id, helper.feedback))
    }
}

macro_rules! impl_envelope_type_info {
    ($wrapper:ident, $names:ident, |$m:ident| $table:expr) => {
        impl<A: RosAction> MessageTypeInfo for $wrapper<A> {
            const TYPE_NAME: &'static str = A::NAMES.$names.type_name;
            const DATA_TYPE: &'static str = A::NAMES.$names.data_type;
            const DDS_TYPE_NAME: &'static str = A::NAMES.$names.dds_type_name;

            fn members() -> &'static MessageMembers {
                let $m = A::members();
                $table
            }
        }
    };
}

impl_envelope_type_info!(SendGoalRequest, send_goal_request, |m| m.send_goal.request);
impl_envelope_type_info!(SendGoalResponse, send_goal_response, |m| m.send_goal.response);
impl_envelope_type_info!(GetResultRequest, get_result_request, |m| m.get_result.request);
impl_envelope_type_info!(GetResultResponse, get_result_response, |m| m.get_result.response);
impl_envelope_type_info!(FeedbackMessage, feedback_message, |m| m.feedback_message);

// Staged builders, one setter per stage in declaration order.

impl<A: RosAction> SendGoalRequest<A> {
    pub fn builder() -> InitSendGoalRequestGoalId<A> {
        InitSendGoalRequestGoalId {
            msg: Self::default(),
        }
    }
}

#[must_use]
pub struct InitSendGoalRequestGoalId<A: RosAction> {
    msg: SendGoalRequest<A>,
}

impl<A: RosAction> InitSendGoalRequestGoalId<A> {
    pub fn goal_id(mut self, arg: Uuid) -> InitSendGoalRequestGoal<A> {
        self.msg.goal_id = arg;
        InitSendGoalRequestGoal { msg: self.msg }
    }
}

#[must_use]
pub struct InitSendGoalRequestGoal<A: RosAction> {
    msg: SendGoalRequest<A>,
}

impl<A: RosAction> InitSendGoalRequestGoal<A> {
    pub fn goal(mut self, arg: A::Goal) -> SendGoalRequest<A> {
        self.msg.goal = arg;
        self.msg
    }
}

impl<A: RosAction> SendGoalResponse<A> {
    pub fn builder() -> InitSendGoalResponseAccepted<A> {
        InitSendGoalResponseAccepted {
            msg: Self::default(),
        }
    }
}

#[must_use]
pub struct InitSendGoalResponseAccepted<A: RosAction> {
    msg: SendGoalResponse<A>,
}

impl<A: RosAction> InitSendGoalResponseAccepted<A> {
    pub fn accepted(mut self, arg: bool) -> InitSendGoalResponseStamp<A> {
        self.msg.accepted = arg;
        InitSendGoalResponseStamp { msg: self.msg }
    }
}

#[must_use]
pub struct InitSendGoalResponseStamp<A: RosAction> {
    msg: SendGoalResponse<A>,
}

impl<A: RosAction> InitSendGoalResponseStamp<A> {
    pub fn stamp(mut self, arg: Time) -> SendGoalResponse<A> {
        self.msg.stamp = arg;
        self.msg
    }
}

impl<A: RosAction> GetResultRequest<A> {
    pub fn builder() -> InitGetResultRequestGoalId<A> {
        InitGetResultRequestGoalId {
            msg: Self::default(),
        }
    }
}

#[must_use]
pub struct InitGetResultRequestGoalId<A: RosAction> {
    msg: GetResultRequest<A>,
}

impl<A: RosAction> InitGetResultRequestGoalId<A> {
    pub fn goal_id(mut self, arg: Uuid) -> GetResultRequest<A> {
        self.msg.goal_id = arg;
        self.msg
    }
}

impl<A: RosAction> GetResultResponse<A> {
    pub fn builder() -> InitGetResultResponseStatus<A> {
        InitGetResultResponseStatus {
            msg: Self::default(),
        }
    }
}

#[must_use]
pub struct InitGetResultResponseStatus<A: RosAction> {
    msg: GetResultResponse<A>,
}

impl<A: RosAction> InitGetResultResponseStatus<A> {
    pub fn status(mut self, arg: i8) -> InitGetResultResponseResult<A> {
        self.msg.status = arg;
        InitGetResultResponseResult { msg: self.msg }
    }
}

#[must_use]
pub struct InitGetResultResponseResult<A: RosAction> {
    msg: GetResultResponse<A>,
}

impl<A: RosAction> InitGetResultResponseResult<A> {
    pub fn result(mut self, arg: A::Result) -> GetResultResponse<A> {
        self.msg.result = arg;
        self.msg
    }
}

impl<A: RosAction> FeedbackMessage<A> {
    pub fn builder() -> InitFeedbackMessageGoalId<A> {
        InitFeedbackMessageGoalId {
            msg: Self::default(),
        }
    }
}

#[must_use]
pub struct InitFeedbackMessageGoalId<A: RosAction> {
    msg: FeedbackMessage<A>,
}

impl<A: RosAction> InitFeedbackMessageGoalId<A> {
    pub fn goal_id(mut self, arg: Uuid) -> InitFeedbackMessageFeedback<A> {
        self.msg.goal_id = arg;
        InitFeedbackMessageFeedback { msg: self.msg }
    }
}

#[must_use]
pub struct InitFeedbackMessageFeedback<A: RosAction> {
    msg: FeedbackMessage<A>,
}

impl<A: RosAction> InitFeedbackMessageFeedback<A> {
    pub fn feedback(mut self, arg: A::Feedback) -> FeedbackMessage<A> {
        self.msg.feedback = arg;
        self.msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_goal_status_i8_roundtrip() {
        for status in GoalStatus::iter() {
            assert_eq!(GoalStatus::try_from(status.as_i8()).unwrap(), status);
        }
        assert!(matches!(
            GoalStatus::try_from(7),
            Err(Error::InvalidGoalStatus(7))
        ));
    }

    #[test]
    fn test_goal_status_classification() {
        let active: Vec<_> = GoalStatus::iter().filter(GoalStatus::is_active).collect();
        assert_eq!(
            active,
            [GoalStatus::Accepted, GoalStatus::Executing, GoalStatus::Canceling]
        );
        let terminal: Vec<_> = GoalStatus::iter().filter(GoalStatus::is_terminal).collect();
        assert_eq!(
            terminal,
            [GoalStatus::Succeeded, GoalStatus::Canceled, GoalStatus::Aborted]
        );
    }

    #[test]
    fn test_terminal_states_reject_every_event() {
        let events = [
            GoalEvent::Execute,
            GoalEvent::CancelGoal,
            GoalEvent::Succeed,
            GoalEvent::Abort,
            GoalEvent::Canceled,
        ];
        for status in GoalStatus::iter().filter(GoalStatus::is_terminal) {
            for event in events {
                assert_eq!(transition_goal_state(status, event), GoalStatus::Unknown);
            }
        }
    }

    #[test]
    fn test_cancel_path() {
        let canceling = transition_goal_state(GoalStatus::Executing, GoalEvent::CancelGoal);
        assert_eq!(canceling, GoalStatus::Canceling);
        assert_eq!(
            transition_goal_state(canceling, GoalEvent::Canceled),
            GoalStatus::Canceled
        );
    }
}

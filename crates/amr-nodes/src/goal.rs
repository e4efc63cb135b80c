//! Action goals.
//!
//! The server side works on a [`GoalHandle`] whose state is tracked at compile
//! time (`Accepted`, then `Executing`) and at run time by the goal state
//! machine of `custom_interfaces::action`. Terminal methods consume the handle
//! and yield the [`GoalOutcome`] that answers the client's get-result request,
//! so an executor cannot return without ending its goal.
//!
//! [`send_goal`] drives one whole exchange in process: send-goal, feedback
//! stream, optional cancel, get-result. Every envelope crosses a CDR
//! encode/decode.

use std::marker::PhantomData;
use std::sync::Arc;

use custom_interfaces::RosMessage;
use custom_interfaces::action::{
    FeedbackMessage, GetResultRequest, GetResultResponse, GoalEvent, GoalInfo, GoalStatus,
    RosAction, SendGoalRequest, SendGoalResponse, transition_goal_state,
};
use custom_interfaces::builtin_interfaces::Time;
use custom_interfaces::unique_identifier_msgs::Uuid;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{NodeError, Result};

/// Marker type representing a goal that has been accepted but not yet executing.
pub struct Accepted;

/// Marker type representing a goal that is currently executing.
pub struct Executing;

pub type AcceptedGoal<A> = GoalHandle<A, Accepted>;
pub type ExecutingGoal<A> = GoalHandle<A, Executing>;

/// Status shared between a goal handle and its controls.
#[derive(Debug)]
struct GoalState {
    status: Mutex<GoalStatus>,
}

impl GoalState {
    fn apply(&self, event: GoalEvent) -> Result<GoalStatus> {
        let mut status = self.status.lock();
        let next = transition_goal_state(*status, event);
        if next == GoalStatus::Unknown {
            return Err(NodeError::InvalidTransition {
                from: *status,
                event,
            });
        }
        *status = next;
        Ok(next)
    }
}

/// Server-side view of one goal.
pub struct GoalHandle<A: RosAction, State> {
    goal: A::Goal,
    info: GoalInfo,
    state: Arc<GoalState>,
    feedback_tx: flume::Sender<Vec<u8>>,
    _state: PhantomData<State>,
}

impl<A: RosAction, State> GoalHandle<A, State> {
    pub fn goal(&self) -> &A::Goal {
        &self.goal
    }

    pub fn info(&self) -> &GoalInfo {
        &self.info
    }

    pub fn status(&self) -> GoalStatus {
        *self.state.status.lock()
    }

    /// Handle for requesting cancellation from outside the executor.
    pub fn control(&self) -> GoalControl {
        GoalControl {
            goal_id: self.info.goal_id,
            state: self.state.clone(),
        }
    }
}

impl<A: RosAction> GoalHandle<A, Accepted> {
    /// Goal freshly accepted by a server; feedback goes to `feedback_tx` as
    /// CDR-encoded feedback messages.
    pub fn new(info: GoalInfo, goal: A::Goal, feedback_tx: flume::Sender<Vec<u8>>) -> Self {
        Self {
            goal,
            info,
            state: Arc::new(GoalState {
                status: Mutex::new(GoalStatus::Accepted),
            }),
            feedback_tx,
            _state: PhantomData,
        }
    }

    /// Begin executing.
    ///
    /// A goal whose cancellation was requested while it waited stays
    /// `Canceling`; the executor observes it through `is_cancel_requested`.
    pub fn execute(self) -> Result<GoalHandle<A, Executing>> {
        if self.status() != GoalStatus::Canceling {
            self.state.apply(GoalEvent::Execute)?;
        }
        debug!("[ACT] Executing goal {}", self.info.goal_id);
        Ok(GoalHandle {
            goal: self.goal,
            info: self.info,
            state: self.state,
            feedback_tx: self.feedback_tx,
            _state: PhantomData,
        })
    }
}

impl<A: RosAction> GoalHandle<A, Executing> {
    pub fn publish_feedback(&self, feedback: A::Feedback) -> Result<()> {
        let msg = FeedbackMessage::<A>::new(self.info.goal_id, feedback);
        self.feedback_tx
            .send(msg.to_cdr()?)
            .map_err(|_| NodeError::ChannelClosed("feedback"))
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.status() == GoalStatus::Canceling
    }

    pub fn succeed(self, result: A::Result) -> Result<GoalOutcome<A>> {
        self.terminate(GoalEvent::Succeed, result)
    }

    pub fn abort(self, result: A::Result) -> Result<GoalOutcome<A>> {
        self.terminate(GoalEvent::Abort, result)
    }

    /// Acknowledge a cancel request. Fails unless one is pending.
    pub fn canceled(self, result: A::Result) -> Result<GoalOutcome<A>> {
        self.terminate(GoalEvent::Canceled, result)
    }

    fn terminate(self, event: GoalEvent, result: A::Result) -> Result<GoalOutcome<A>> {
        let status = self.state.apply(event)?;
        debug!("[ACT] Goal {} terminated: {}", self.info.goal_id, status);
        Ok(GoalOutcome {
            goal_id: self.info.goal_id,
            status,
            result,
        })
    }
}

/// Terminal status and result of a goal.
pub struct GoalOutcome<A: RosAction> {
    goal_id: Uuid,
    status: GoalStatus,
    result: A::Result,
}

impl<A: RosAction> GoalOutcome<A> {
    pub fn goal_id(&self) -> Uuid {
        self.goal_id
    }

    pub fn status(&self) -> GoalStatus {
        self.status
    }

    pub fn result(&self) -> &A::Result {
        &self.result
    }

    pub fn into_response(self) -> GetResultResponse<A> {
        GetResultResponse::new(self.status, self.result)
    }
}

impl<A: RosAction> std::fmt::Debug for GoalOutcome<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalOutcome")
            .field("goal_id", &self.goal_id)
            .field("status", &self.status)
            .field("result", &self.result)
            .finish()
    }
}

/// Cancellation side of a goal, usable from any thread.
#[derive(Debug, Clone)]
pub struct GoalControl {
    goal_id: Uuid,
    state: Arc<GoalState>,
}

impl GoalControl {
    pub fn goal_id(&self) -> Uuid {
        self.goal_id
    }

    pub fn status(&self) -> GoalStatus {
        *self.state.status.lock()
    }

    /// Request cancellation. Returns whether the request was accepted, which
    /// is the case only for an active goal not already canceling.
    pub fn request_cancel(&self) -> bool {
        match self.state.apply(GoalEvent::CancelGoal) {
            Ok(_) => {
                debug!("[ACT] Cancel requested for goal {}", self.goal_id);
                true
            }
            Err(e) => {
                debug!("[ACT] Cancel request ignored: {}", e);
                false
            }
        }
    }
}

/// Server half of an action.
pub trait ActionServer<A: RosAction>: Send {
    /// Decide on an incoming goal. Accepts everything by default.
    fn accept(&mut self, goal: &A::Goal) -> bool {
        let _ = goal;
        true
    }

    /// Run an accepted goal to a terminal state.
    fn execute(&mut self, goal: ExecutingGoal<A>, clock: &dyn Clock) -> Result<GoalOutcome<A>>;
}

/// What the client wants after seeing a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackControl {
    Continue,
    Cancel,
}

/// Client half of an action.
pub trait GoalObserver<A: RosAction> {
    fn on_goal_response(&mut self, accepted: bool) {
        let _ = accepted;
    }

    fn on_feedback(&mut self, feedback: &A::Feedback) -> FeedbackControl {
        let _ = feedback;
        FeedbackControl::Continue
    }

    fn on_result(&mut self, response: &GetResultResponse<A>) {
        let _ = response;
    }
}

/// Observer that only collects what it is told.
pub struct RecordingObserver<A: RosAction> {
    pub accepted: Option<bool>,
    pub feedback: Vec<A::Feedback>,
    /// Request cancellation once this many feedback messages arrived.
    pub cancel_after: Option<usize>,
}

impl<A: RosAction> Default for RecordingObserver<A> {
    fn default() -> Self {
        Self {
            accepted: None,
            feedback: Vec::new(),
            cancel_after: None,
        }
    }
}

impl<A: RosAction> GoalObserver<A> for RecordingObserver<A> {
    fn on_goal_response(&mut self, accepted: bool) {
        self.accepted = Some(accepted);
    }

    fn on_feedback(&mut self, feedback: &A::Feedback) -> FeedbackControl {
        self.feedback.push(feedback.clone());
        match self.cancel_after {
            Some(n) if self.feedback.len() >= n => FeedbackControl::Cancel,
            _ => FeedbackControl::Continue,
        }
    }
}

/// Send `goal` to `server` on `action_name` and follow it to its result.
///
/// The server executes on a scoped worker thread while this thread decodes
/// feedback and hands it to `observer`. Returns `None` when the goal is
/// rejected.
pub fn send_goal<A, S, O>(
    action_name: &str,
    server: &mut S,
    observer: &mut O,
    goal: A::Goal,
    clock: &dyn Clock,
) -> Result<Option<GetResultResponse<A>>>
where
    A: RosAction,
    S: ActionServer<A> + ?Sized,
    O: GoalObserver<A> + ?Sized,
{
    // send_goal service
    let request = SendGoalRequest::<A>::new(Uuid::new_v4(), goal);
    let request_bytes = request.to_cdr()?;
    debug!(
        "[ACT] Sending goal {} on {}",
        request.goal_id,
        A::send_goal_service(action_name)
    );
    let request = SendGoalRequest::<A>::from_cdr(&request_bytes)?;

    let accepted = server.accept(&request.goal);
    let info = GoalInfo::new(request.goal_id);
    let stamp = if accepted { info.stamp } else { Time::zero() };
    let response = SendGoalResponse::<A>::new(accepted, stamp);
    let response = SendGoalResponse::<A>::from_cdr(&response.to_cdr()?)?;
    observer.on_goal_response(response.accepted);
    if !response.accepted {
        debug!("[ACT] Goal {} rejected", request.goal_id);
        return Ok(None);
    }

    let goal_id = request.goal_id;
    let (feedback_tx, feedback_rx) = flume::unbounded();
    let handle = AcceptedGoal::<A>::new(info, request.goal, feedback_tx);
    let control = handle.control();
    let handle = handle.execute()?;

    let outcome = std::thread::scope(|scope| {
        let worker = scope.spawn(move || server.execute(handle, clock));

        // Iteration ends once the handle, and with it the sender, is dropped.
        let mut feedback_error = None;
        for bytes in feedback_rx.iter() {
            let msg = match FeedbackMessage::<A>::from_cdr(&bytes) {
                Ok(msg) => msg,
                Err(e) => {
                    feedback_error.get_or_insert(NodeError::from(e));
                    continue;
                }
            };
            if msg.goal_id != goal_id {
                warn!("[ACT] Dropping feedback for unknown goal {}", msg.goal_id);
                continue;
            }
            if observer.on_feedback(&msg.feedback) == FeedbackControl::Cancel {
                control.request_cancel();
            }
        }

        let outcome = worker.join().map_err(|_| NodeError::WorkerPanicked)??;
        match feedback_error {
            Some(e) => Err(e),
            None => Ok(outcome),
        }
    })?;

    // get_result service
    let request = GetResultRequest::<A>::new(goal_id);
    debug!(
        "[ACT] Requesting result of {} on {}",
        goal_id,
        A::get_result_service(action_name)
    );
    let request = GetResultRequest::<A>::from_cdr(&request.to_cdr()?)?;
    if request.goal_id != outcome.goal_id() {
        warn!("[ACT] Goal {} not found", request.goal_id);
        return Ok(None);
    }
    let response = outcome.into_response();
    let response = GetResultResponse::<A>::from_cdr(&response.to_cdr()?)?;
    observer.on_result(&response);
    Ok(Some(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use custom_interfaces::action::{Aula9, Aula9Feedback, Aula9Goal, Aula9Result};

    fn accepted_goal() -> (AcceptedGoal<Aula9>, flume::Receiver<Vec<u8>>) {
        let (tx, rx) = flume::unbounded();
        let handle = AcceptedGoal::<Aula9>::new(
            GoalInfo::new(Uuid::new_v4()),
            Aula9Goal { count_up_to: 3 },
            tx,
        );
        (handle, rx)
    }

    #[test]
    fn test_goal_lifecycle() {
        let (handle, rx) = accepted_goal();
        assert_eq!(handle.status(), GoalStatus::Accepted);
        let handle = handle.execute().unwrap();
        assert_eq!(handle.status(), GoalStatus::Executing);

        handle
            .publish_feedback(Aula9Feedback { current_number: 1 })
            .unwrap();
        let msg = FeedbackMessage::<Aula9>::from_cdr(&rx.recv().unwrap()).unwrap();
        assert_eq!(msg.goal_id, handle.info().goal_id);
        assert_eq!(msg.feedback.current_number, 1);

        let outcome = handle.succeed(Aula9Result { final_count: 3 }).unwrap();
        assert_eq!(outcome.status(), GoalStatus::Succeeded);
        assert_eq!(outcome.into_response().status, 4);
    }

    #[test]
    fn test_canceled_requires_cancel_request() {
        let (handle, _rx) = accepted_goal();
        let handle = handle.execute().unwrap();
        let err = handle.canceled(Aula9Result::default()).unwrap_err();
        assert!(matches!(
            err,
            NodeError::InvalidTransition {
                from: GoalStatus::Executing,
                event: GoalEvent::Canceled
            }
        ));
    }

    #[test]
    fn test_cancel_request() {
        let (handle, _rx) = accepted_goal();
        let handle = handle.execute().unwrap();
        let control = handle.control();
        assert!(control.request_cancel());
        assert!(handle.is_cancel_requested());
        // A second request is not a transition.
        assert!(!control.request_cancel());

        let outcome = handle.canceled(Aula9Result { final_count: 1 }).unwrap();
        assert_eq!(outcome.status(), GoalStatus::Canceled);
        assert_eq!(control.status(), GoalStatus::Canceled);
        assert!(!control.request_cancel());
    }

    #[test]
    fn test_cancel_before_execute_keeps_canceling() {
        let (handle, _rx) = accepted_goal();
        assert!(handle.control().request_cancel());
        let handle = handle.execute().unwrap();
        assert!(handle.is_cancel_requested());
    }

    struct Rejecting;

    impl ActionServer<Aula9> for Rejecting {
        fn accept(&mut self, _goal: &Aula9Goal) -> bool {
            false
        }

        fn execute(
            &mut self,
            goal: ExecutingGoal<Aula9>,
            _clock: &dyn Clock,
        ) -> Result<GoalOutcome<Aula9>> {
            goal.abort(Aula9Result::default())
        }
    }

    #[test]
    fn test_rejected_goal_has_no_result() {
        let mut observer = RecordingObserver::<Aula9>::default();
        let response = send_goal::<Aula9, _, _>(
            "aula9_action",
            &mut Rejecting,
            &mut observer,
            Aula9Goal { count_up_to: 2 },
            &SimulatedClock::new(),
        )
        .unwrap();
        assert!(response.is_none());
        assert_eq!(observer.accepted, Some(false));
        assert!(observer.feedback.is_empty());
    }

    struct Panicking;

    impl ActionServer<Aula9> for Panicking {
        fn execute(
            &mut self,
            _goal: ExecutingGoal<Aula9>,
            _clock: &dyn Clock,
        ) -> Result<GoalOutcome<Aula9>> {
            panic!("executor failure");
        }
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let mut observer = RecordingObserver::<Aula9>::default();
        let result = send_goal::<Aula9, _, _>(
            "aula9_action",
            &mut Panicking,
            &mut observer,
            Aula9Goal { count_up_to: 2 },
            &SimulatedClock::new(),
        );
        assert!(matches!(result, Err(NodeError::WorkerPanicked)));
    }
}

//! Aula9 count-up action.

use std::time::Duration;

use custom_interfaces::action::{
    Aula9, Aula9Feedback, Aula9Goal, Aula9GetResultResponse, Aula9Result, GoalStatus,
};
use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::Result;
use crate::goal::{ActionServer, ExecutingGoal, FeedbackControl, GoalObserver, GoalOutcome};
use crate::params::NodeParameters;

pub const ACTION: &str = "aula9_action";
pub const SERVER_NODE: &str = "aula9_action_server";
pub const CLIENT_NODE: &str = "aula9_action_client";

/// Publishes `0..count_up_to` as feedback, one number per period, then
/// succeeds with `final_count = max(count_up_to, 0)`.
pub struct CountUpServer {
    period: Duration,
}

impl CountUpServer {
    /// Reads `period_ms` (default 1000).
    pub fn new(params: &NodeParameters) -> Result<Self> {
        Ok(Self {
            period: params.declare_period_ms("period_ms", 1000)?,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl ActionServer<Aula9> for CountUpServer {
    fn execute(
        &mut self,
        goal: ExecutingGoal<Aula9>,
        clock: &dyn Clock,
    ) -> Result<GoalOutcome<Aula9>> {
        info!("Executing goal...");
        let target = goal.goal().count_up_to.max(0);
        let mut published = 0;
        for current_number in 0..target {
            if goal.is_cancel_requested() {
                info!("Goal canceled after {} numbers", published);
                return goal.canceled(Aula9Result {
                    final_count: published,
                });
            }
            goal.publish_feedback(Aula9Feedback { current_number })?;
            info!("Publishing feedback: {}", current_number);
            published += 1;
            clock.sleep(self.period);
        }
        info!("Goal succeeded!");
        goal.succeed(Aula9Result {
            final_count: target,
        })
    }
}

/// Client side: logs feedback and the result, optionally canceling after a
/// number of feedback messages.
#[derive(Debug, Default)]
pub struct CountUpClient {
    cancel_after: Option<usize>,
    numbers: Vec<i32>,
    final_count: Option<i32>,
}

impl CountUpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_after(mut self, feedback_count: usize) -> Self {
        self.cancel_after = Some(feedback_count);
        self
    }

    /// Numbers received as feedback, in order.
    pub fn numbers(&self) -> &[i32] {
        &self.numbers
    }

    pub fn final_count(&self) -> Option<i32> {
        self.final_count
    }

    pub fn goal(count_up_to: i32) -> Aula9Goal {
        Aula9Goal::builder().count_up_to(count_up_to)
    }
}

impl GoalObserver<Aula9> for CountUpClient {
    fn on_goal_response(&mut self, accepted: bool) {
        if accepted {
            info!("Goal accepted");
        } else {
            warn!("Goal rejected");
        }
    }

    fn on_feedback(&mut self, feedback: &Aula9Feedback) -> FeedbackControl {
        info!("Received feedback: {}", feedback.current_number);
        self.numbers.push(feedback.current_number);
        match self.cancel_after {
            Some(n) if self.numbers.len() >= n => FeedbackControl::Cancel,
            _ => FeedbackControl::Continue,
        }
    }

    fn on_result(&mut self, response: &Aula9GetResultResponse) {
        match response.goal_status() {
            Ok(GoalStatus::Succeeded) => info!("Result: {}", response.result.final_count),
            Ok(status) => warn!("Goal finished {}: {}", status, response.result.final_count),
            Err(e) => warn!("Goal finished with {}", e),
        }
        self.final_count = Some(response.result.final_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::clock::{SimulatedClock, SteadyClock};
    use crate::goal::{AcceptedGoal, send_goal};
    use custom_interfaces::action::GoalInfo;
    use custom_interfaces::unique_identifier_msgs::Uuid;
    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn server(period_ms: u64) -> CountUpServer {
        let params = NodeParameters::from_yaml(
            SERVER_NODE,
            &format!("/**:\n  ros__parameters:\n    period_ms: {period_ms}\n"),
        )
        .unwrap();
        CountUpServer::new(&params).unwrap()
    }

    #[test]
    fn test_counts_up_to_goal() {
        let mut server = server(1000);
        let mut client = CountUpClient::new();
        let clock = SimulatedClock::new();
        let response = send_goal::<Aula9, _, _>(ACTION, &mut server, &mut client, CountUpClient::goal(5), &clock)
            .unwrap()
            .unwrap();
        assert_eq!(response.goal_status().unwrap(), GoalStatus::Succeeded);
        assert_eq!(response.result.final_count, 5);
        assert_eq!(client.numbers(), [0, 1, 2, 3, 4]);
        assert_eq!(client.final_count(), Some(5));
        assert_eq!(clock.now(), Duration::from_secs(5));
    }

    #[test]
    fn test_non_positive_goal_succeeds_immediately() {
        let mut server = server(1000);
        let clock = SimulatedClock::new();
        for count_up_to in [0, -3] {
            let mut client = CountUpClient::new();
            let response = send_goal::<Aula9, _, _>(
                ACTION,
                &mut server,
                &mut client,
                CountUpClient::goal(count_up_to),
                &clock,
            )
            .unwrap()
            .unwrap();
            assert_eq!(response.status, 4);
            assert_eq!(response.result.final_count, 0);
            assert!(client.numbers().is_empty());
        }
    }

    #[test]
    fn test_cancel_stops_counting() {
        let mut server = server(20);
        let mut client = CountUpClient::new().cancel_after(2);
        let response = send_goal::<Aula9, _, _>(
            ACTION,
            &mut server,
            &mut client,
            CountUpClient::goal(50),
            &SteadyClock::new(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(response.goal_status().unwrap(), GoalStatus::Canceled);
        let published = response.result.final_count;
        assert!((2..50).contains(&published), "{published}");
        assert_eq!(client.numbers().len(), published as usize);
    }

    #[test]
    fn test_server_logs_feedback_and_success() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();

        let (tx, rx) = flume::unbounded();
        let handle =
            AcceptedGoal::<Aula9>::new(GoalInfo::new(Uuid::new_v4()), CountUpClient::goal(2), tx);
        let outcome = tracing::subscriber::with_default(subscriber, || -> Result<GoalOutcome<Aula9>> {
            server(1000).execute(handle.execute()?, &SimulatedClock::new())
        })
        .unwrap();
        assert_eq!(outcome.status(), GoalStatus::Succeeded);
        assert_eq!(rx.drain().count(), 2);

        let text = String::from_utf8(logs.0.lock().clone()).unwrap();
        assert!(text.contains("Executing goal..."), "{text}");
        assert!(text.contains("Publishing feedback: 0"), "{text}");
        assert!(text.contains("Publishing feedback: 1"), "{text}");
        assert!(text.contains("Goal succeeded!"), "{text}");
    }
}

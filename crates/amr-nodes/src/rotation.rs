//! Rotation action server: turns the robot in place by publishing angular
//! velocity on `cmd_vel` for as long as the requested angle takes.

use std::time::Duration;

use custom_interfaces::action::{Rotate, RotateFeedback, RotateGoal, RotateResult};
use custom_interfaces::geometry_msgs::Twist;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::{NodeError, Result};
use crate::goal::{ActionServer, ExecutingGoal, GoalOutcome};
use crate::params::NodeParameters;
use crate::pubsub::Publisher;

pub const ACTION: &str = "rotate";
pub const CMD_VEL_TOPIC: &str = "cmd_vel";
pub const NODE: &str = "rotation_action_server";

pub struct RotationServer<P> {
    cmd_vel: P,
    /// rad/s
    rotation_speed: f64,
    feedback_period: Duration,
}

impl<P: Publisher<Twist>> RotationServer<P> {
    /// Reads `rotation_speed` (default 0.5) and `feedback_period_ms` (default 100).
    pub fn new(cmd_vel: P, params: &NodeParameters) -> Result<Self> {
        let rotation_speed = params.declare_f64("rotation_speed", 0.5)?;
        if !(rotation_speed.is_finite() && rotation_speed > 0.0) {
            return Err(NodeError::InvalidParameter {
                name: "rotation_speed".to_string(),
                reason: format!("must be a positive number of rad/s, got {rotation_speed}"),
            });
        }
        let feedback_period = params.declare_period_ms("feedback_period_ms", 100)?;
        info!("Rotation action server initialized");
        Ok(Self {
            cmd_vel,
            rotation_speed,
            feedback_period,
        })
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    fn stop_robot(&self) -> Result<()> {
        self.cmd_vel.publish(&Twist::stop())
    }
}

impl<P: Publisher<Twist>> ActionServer<Rotate> for RotationServer<P> {
    fn accept(&mut self, goal: &RotateGoal) -> bool {
        info!("Received goal request to rotate {} degrees", goal.angle);
        if !goal.angle.is_finite() {
            warn!("Rejecting non-finite rotation angle {}", goal.angle);
            return false;
        }
        true
    }

    fn execute(
        &mut self,
        goal: ExecutingGoal<Rotate>,
        clock: &dyn Clock,
    ) -> Result<GoalOutcome<Rotate>> {
        info!("Executing rotation goal");
        let target_angle = goal.goal().angle;
        let target_degrees = target_angle.abs();
        let direction = if target_angle > 0.0 { 1.0 } else { -1.0 };
        let command = Twist::yaw(direction * self.rotation_speed);
        let time_for_rotation = target_degrees.to_radians() / self.rotation_speed;

        let start = clock.now();
        let mut elapsed = 0.0;
        while elapsed < time_for_rotation {
            if goal.is_cancel_requested() {
                self.stop_robot()?;
                info!("Goal canceled");
                return goal.canceled(RotateResult { success: false });
            }
            self.cmd_vel.publish(&command)?;
            elapsed = clock.since(start).as_secs_f64();
            let progress = (elapsed / time_for_rotation).min(1.0);
            goal.publish_feedback(RotateFeedback {
                remaining_degrees: target_degrees * (1.0 - progress),
            })?;
            clock.sleep(self.feedback_period);
        }

        self.stop_robot()?;
        info!("Rotation completed successfully");
        goal.succeed(RotateResult { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::goal::{RecordingObserver, send_goal};
    use crate::pubsub::loopback;
    use custom_interfaces::action::GoalStatus;

    fn params(yaml: &str) -> NodeParameters {
        NodeParameters::from_yaml(NODE, yaml).unwrap()
    }

    #[test]
    fn test_rotation_feedback_counts_down() {
        let (cmd_vel, twists) = loopback::<Twist>(CMD_VEL_TOPIC);
        // 90 degrees at pi/2 rad/s takes one second.
        let yaml = format!(
            "/rotation_action_server:\n  ros__parameters:\n    rotation_speed: {}\n    feedback_period_ms: 300\n",
            std::f64::consts::FRAC_PI_2
        );
        let mut server = RotationServer::new(cmd_vel, &params(&yaml)).unwrap();
        let mut observer = RecordingObserver::<Rotate>::default();
        let clock = SimulatedClock::new();

        let response = send_goal::<Rotate, _, _>(
            ACTION,
            &mut server,
            &mut observer,
            RotateGoal { angle: 90.0 },
            &clock,
        )
        .unwrap()
        .unwrap();
        assert_eq!(response.goal_status().unwrap(), GoalStatus::Succeeded);
        assert!(response.result.success);

        let remaining: Vec<f64> = observer.feedback.iter().map(|f| f.remaining_degrees).collect();
        assert_eq!(remaining.len(), 5);
        assert_eq!(remaining[0], 90.0);
        assert!(remaining.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(remaining[4], 0.0);

        let twists = twists.drain().unwrap();
        assert_eq!(twists.len(), 6);
        assert!(twists[..5].iter().all(|t| t.angular.z > 0.0));
        assert_eq!(twists[5], Twist::stop());
    }

    #[test]
    fn test_negative_angle_turns_clockwise() {
        let (cmd_vel, twists) = loopback::<Twist>(CMD_VEL_TOPIC);
        let mut server = RotationServer::new(cmd_vel, &NodeParameters::new(NODE)).unwrap();
        let mut observer = RecordingObserver::<Rotate>::default();
        send_goal::<Rotate, _, _>(
            ACTION,
            &mut server,
            &mut observer,
            RotateGoal { angle: -45.0 },
            &SimulatedClock::new(),
        )
        .unwrap()
        .unwrap();
        let first = twists.recv().unwrap();
        assert_eq!(first.angular.z, -0.5);
        assert_eq!(observer.feedback[0].remaining_degrees, 45.0);
    }

    #[test]
    fn test_zero_angle_succeeds_without_turning() {
        let (cmd_vel, twists) = loopback::<Twist>(CMD_VEL_TOPIC);
        let mut server = RotationServer::new(cmd_vel, &NodeParameters::new(NODE)).unwrap();
        let mut observer = RecordingObserver::<Rotate>::default();
        let response = send_goal::<Rotate, _, _>(
            ACTION,
            &mut server,
            &mut observer,
            RotateGoal { angle: 0.0 },
            &SimulatedClock::new(),
        )
        .unwrap()
        .unwrap();
        assert!(response.result.success);
        assert!(observer.feedback.is_empty());
        assert_eq!(twists.drain().unwrap(), [Twist::stop()]);
    }

    #[test]
    fn test_cancel_stops_robot() {
        let (cmd_vel, twists) = loopback::<Twist>(CMD_VEL_TOPIC);
        let yaml = "/**:\n  ros__parameters:\n    rotation_speed: 0.01\n    feedback_period_ms: 20\n";
        let mut server = RotationServer::new(cmd_vel, &params(yaml)).unwrap();
        let mut observer = RecordingObserver::<Rotate> {
            cancel_after: Some(1),
            ..Default::default()
        };
        let response = send_goal::<Rotate, _, _>(
            ACTION,
            &mut server,
            &mut observer,
            RotateGoal { angle: 180.0 },
            &crate::clock::SteadyClock::new(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(response.goal_status().unwrap(), GoalStatus::Canceled);
        assert!(!response.result.success);
        assert_eq!(twists.drain().unwrap().last(), Some(&Twist::stop()));
    }

    #[test]
    fn test_rejects_non_finite_angle() {
        let (cmd_vel, _twists) = loopback::<Twist>(CMD_VEL_TOPIC);
        let mut server = RotationServer::new(cmd_vel, &NodeParameters::new(NODE)).unwrap();
        let mut observer = RecordingObserver::<Rotate>::default();
        let response = send_goal::<Rotate, _, _>(
            ACTION,
            &mut server,
            &mut observer,
            RotateGoal { angle: f64::NAN },
            &SimulatedClock::new(),
        )
        .unwrap();
        assert!(response.is_none());
        assert_eq!(observer.accepted, Some(false));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        for speed in ["0.0", "-0.5"] {
            let (cmd_vel, _twists) = loopback::<Twist>(CMD_VEL_TOPIC);
            let yaml = format!("/**:\n  ros__parameters:\n    rotation_speed: {speed}\n");
            assert!(matches!(
                RotationServer::new(cmd_vel, &params(&yaml)),
                Err(NodeError::InvalidParameter { .. })
            ));
        }
    }
}

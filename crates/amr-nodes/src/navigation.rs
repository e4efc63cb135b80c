//! Wall-avoiding navigation: drive forward until a laser scan shows a wall
//! ahead, then ask the rotation server to turn.

use custom_interfaces::action::{GoalStatus, Rotate, RotateFeedback, RotateGetResultResponse, RotateGoal};
use custom_interfaces::geometry_msgs::Twist;
use custom_interfaces::sensor_msgs::LaserScan;
use custom_interfaces::std_srvs::{Empty, EmptyRequest, EmptyResponse};
use tracing::{debug, error, info};

use crate::clock::Clock;
use crate::error::Result;
use crate::goal::{ActionServer, FeedbackControl, GoalObserver, send_goal};
use crate::params::NodeParameters;
use crate::pubsub::Publisher;
use crate::rotation;
use crate::service::ServiceHandler;

pub const NODE: &str = "main_navigation_node";
pub const SCAN_TOPIC: &str = "scan";
pub const START_SERVICE: &str = "start_navigation";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationConfig {
    /// Metres; a closer reading ahead triggers a rotation.
    pub wall_distance_threshold: f64,
    /// m/s
    pub forward_speed: f64,
    /// Degrees turned per rotation goal.
    pub rotation_angle: f64,
}

impl NavigationConfig {
    pub fn from_params(params: &NodeParameters) -> Result<Self> {
        Ok(Self {
            wall_distance_threshold: params.declare_f64("wall_distance_threshold", 0.5)?,
            forward_speed: params.declare_f64("forward_speed", 0.2)?,
            rotation_angle: params.declare_f64("rotation_angle", 90.0)?,
        })
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            wall_distance_threshold: 0.5,
            forward_speed: 0.2,
            rotation_angle: 90.0,
        }
    }
}

/// What the controller did with a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanDecision {
    /// Navigation has not been started.
    Idle,
    /// The middle third of the scan held no readings.
    Ignored,
    MoveForward,
    /// Stopped in front of a wall; the goal should go to the rotation server.
    Rotate(RotateGoal),
    /// A rotation is in progress.
    Waiting,
}

/// Minimum reading of the middle third of `ranges`, `[len/3, 2*len/3)`.
///
/// NaN readings are skipped. `None` when that window is empty.
pub fn front_distance(ranges: &[f32]) -> Option<f32> {
    let front = &ranges[ranges.len() / 3..2 * ranges.len() / 3];
    if front.is_empty() {
        return None;
    }
    Some(front.iter().copied().fold(f32::INFINITY, f32::min))
}

pub struct NavigationController<P> {
    cmd_vel: P,
    config: NavigationConfig,
    is_navigating: bool,
    is_rotating: bool,
}

impl<P: Publisher<Twist>> NavigationController<P> {
    pub fn new(cmd_vel: P, config: NavigationConfig) -> Self {
        info!("Main navigation node initialized");
        Self {
            cmd_vel,
            config,
            is_navigating: false,
            is_rotating: false,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn is_navigating(&self) -> bool {
        self.is_navigating
    }

    pub fn is_rotating(&self) -> bool {
        self.is_rotating
    }

    /// Begin navigating. Returns `false` if navigation was already running.
    pub fn start_navigation(&mut self) -> bool {
        if self.is_navigating {
            info!("Navigation already in progress");
            return false;
        }
        info!("Starting navigation");
        self.is_navigating = true;
        true
    }

    pub fn on_scan(&mut self, scan: &LaserScan) -> Result<ScanDecision> {
        if !self.is_navigating {
            return Ok(ScanDecision::Idle);
        }
        let Some(min_distance) = front_distance(scan.ranges.as_slice()) else {
            debug!("Scan with {} ranges has no front readings", scan.ranges.len());
            return Ok(ScanDecision::Ignored);
        };
        if self.is_rotating {
            return Ok(ScanDecision::Waiting);
        }
        if f64::from(min_distance) < self.config.wall_distance_threshold {
            info!("Wall detected at {}m. Starting rotation.", min_distance);
            self.cmd_vel.publish(&Twist::stop())?;
            self.is_rotating = true;
            return Ok(ScanDecision::Rotate(RotateGoal {
                angle: self.config.rotation_angle,
            }));
        }
        self.cmd_vel.publish(&Twist::forward(self.config.forward_speed))?;
        Ok(ScanDecision::MoveForward)
    }

    /// Feed `scans` through the controller, sending every rotation goal to
    /// `rotation_server` and waiting for its result before the next scan.
    pub fn drive<S, I>(
        &mut self,
        scans: I,
        rotation_server: &mut S,
        clock: &dyn Clock,
    ) -> Result<Vec<ScanDecision>>
    where
        S: ActionServer<Rotate> + ?Sized,
        I: IntoIterator<Item = LaserScan>,
    {
        let mut decisions = Vec::new();
        for scan in scans {
            let decision = self.on_scan(&scan)?;
            if let ScanDecision::Rotate(goal) = decision {
                let sent =
                    send_goal::<Rotate, _, _>(rotation::ACTION, rotation_server, self, goal, clock);
                if let Err(e) = sent {
                    error!("Rotation goal failed: {}", e);
                    self.is_rotating = false;
                    return Err(e);
                }
            }
            decisions.push(decision);
        }
        Ok(decisions)
    }
}

impl<P: Publisher<Twist>> ServiceHandler<Empty> for NavigationController<P> {
    fn handle(&mut self, _request: EmptyRequest) -> Result<EmptyResponse> {
        self.start_navigation();
        Ok(EmptyResponse::default())
    }
}

impl<P: Publisher<Twist>> GoalObserver<Rotate> for NavigationController<P> {
    fn on_goal_response(&mut self, accepted: bool) {
        if accepted {
            info!("Rotation goal accepted");
        } else {
            error!("Rotation goal rejected");
            self.is_rotating = false;
        }
    }

    fn on_feedback(&mut self, feedback: &RotateFeedback) -> FeedbackControl {
        info!("Remaining degrees: {}", feedback.remaining_degrees);
        FeedbackControl::Continue
    }

    fn on_result(&mut self, response: &RotateGetResultResponse) {
        if response.status == GoalStatus::Succeeded.as_i8() {
            info!("Rotation completed successfully");
        } else {
            error!("Rotation failed with status: {}", response.status);
        }
        self.is_rotating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubsub::loopback;
    use crate::service::call_service;

    fn controller() -> (
        NavigationController<crate::pubsub::LoopbackPublisher<Twist>>,
        crate::pubsub::LoopbackSubscriber<Twist>,
    ) {
        let (cmd_vel, twists) = loopback::<Twist>("cmd_vel");
        (NavigationController::new(cmd_vel, NavigationConfig::default()), twists)
    }

    #[test]
    fn test_front_distance_uses_middle_third() {
        assert_eq!(front_distance(&[0.1, 3.0, 2.0, 5.0, 4.0, 0.2]), Some(2.0));
        assert_eq!(front_distance(&[1.0, 0.3, 1.0]), Some(0.3));
        assert_eq!(front_distance(&[1.0, 2.0]), Some(1.0));
        assert_eq!(front_distance(&[1.0]), None);
        assert_eq!(front_distance(&[]), None);
        assert_eq!(front_distance(&[1.0, f32::NAN, 1.0]), Some(f32::INFINITY));
    }

    #[test]
    fn test_idle_until_started() {
        let (mut nav, twists) = controller();
        let scan = LaserScan::from_ranges(vec![1.0; 9]);
        assert_eq!(nav.on_scan(&scan).unwrap(), ScanDecision::Idle);
        assert!(!twists.is_ready());

        call_service::<Empty, _>(START_SERVICE, &mut nav, &EmptyRequest::default()).unwrap();
        assert!(nav.is_navigating());
        assert!(!nav.start_navigation());
        assert_eq!(nav.on_scan(&scan).unwrap(), ScanDecision::MoveForward);
        assert_eq!(twists.recv().unwrap(), Twist::forward(0.2));
    }

    #[test]
    fn test_wall_triggers_rotation() {
        let (mut nav, twists) = controller();
        nav.start_navigation();
        let scan = LaserScan::from_ranges(vec![2.0, 2.0, 2.0, 0.4, 2.0, 2.0, 2.0, 2.0, 2.0]);
        assert_eq!(
            nav.on_scan(&scan).unwrap(),
            ScanDecision::Rotate(RotateGoal { angle: 90.0 })
        );
        assert!(nav.is_rotating());
        assert_eq!(twists.recv().unwrap(), Twist::stop());
        assert_eq!(nav.on_scan(&scan).unwrap(), ScanDecision::Waiting);
        assert!(!twists.is_ready());

        nav.on_result(&RotateGetResultResponse::new(
            GoalStatus::Aborted,
            Default::default(),
        ));
        assert!(!nav.is_rotating());
    }

    #[test]
    fn test_rejected_goal_clears_rotation() {
        let (mut nav, _twists) = controller();
        nav.start_navigation();
        nav.on_scan(&LaserScan::from_ranges(vec![0.1; 3])).unwrap();
        assert!(nav.is_rotating());
        nav.on_goal_response(false);
        assert!(!nav.is_rotating());
    }

    struct BrokenServer;

    impl ActionServer<Rotate> for BrokenServer {
        fn execute(
            &mut self,
            _goal: crate::goal::ExecutingGoal<Rotate>,
            _clock: &dyn Clock,
        ) -> Result<crate::goal::GoalOutcome<Rotate>> {
            Err(crate::error::NodeError::ChannelClosed("cmd_vel"))
        }
    }

    #[test]
    fn test_failed_goal_clears_rotation() {
        let (mut nav, _twists) = controller();
        nav.start_navigation();
        let wall = LaserScan::from_ranges(vec![0.1; 3]);
        let clock = crate::clock::SimulatedClock::new();

        let err = nav
            .drive([wall.clone()], &mut BrokenServer, &clock)
            .unwrap_err();
        assert!(matches!(err, crate::error::NodeError::ChannelClosed("cmd_vel")));
        assert!(!nav.is_rotating());
        assert_eq!(
            nav.on_scan(&wall).unwrap(),
            ScanDecision::Rotate(RotateGoal { angle: 90.0 })
        );
    }

    #[test]
    fn test_empty_front_is_ignored() {
        let (mut nav, twists) = controller();
        nav.start_navigation();
        assert_eq!(
            nav.on_scan(&LaserScan::from_ranges(vec![0.1])).unwrap(),
            ScanDecision::Ignored
        );
        assert!(!twists.is_ready());
    }
}

//! Demo nodes for the `custom_interfaces` package.
//!
//! Each node is plain synchronous logic over the interface records. Exchanges
//! between nodes run in process: topics through [`pubsub::loopback`], services
//! through [`service::call_service`], actions through [`goal::send_goal`], all
//! of them crossing a CDR encode/decode.

pub mod adder;
pub mod clock;
pub mod count_action;
pub mod counter;
pub mod error;
pub mod goal;
pub mod navigation;
pub mod params;
pub mod pubsub;
pub mod rotation;
pub mod service;
pub mod temperature;

pub use error::{NodeError, Result};

pub mod prelude {
    pub use crate::clock::{Clock, SimulatedClock, SteadyClock};
    pub use crate::error::{NodeError, Result};
    pub use crate::goal::{
        ActionServer, ExecutingGoal, FeedbackControl, GoalControl, GoalHandle, GoalObserver,
        GoalOutcome, send_goal,
    };
    pub use crate::params::{NodeParameters, ParameterType, ParameterValue};
    pub use crate::pubsub::{LoopbackPublisher, LoopbackSubscriber, Publisher, loopback};
    pub use crate::service::{ServiceHandler, call_service};
}

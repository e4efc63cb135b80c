//! `builtin_interfaces` records used by the action envelopes.

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::impl_message;
use crate::introspection::FieldType;

/// `builtin_interfaces/msg/Time`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

impl Time {
    pub const fn new(sec: i32, nanosec: u32) -> Self {
        Self { sec, nanosec }
    }

    pub const fn zero() -> Self {
        Self { sec: 0, nanosec: 0 }
    }

    /// Wall-clock time. Clocks set before the epoch read as zero and seconds
    /// saturate at `i32::MAX`.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default();
        Self::from(elapsed)
    }

    pub fn as_nanos(&self) -> i64 {
        i64::from(self.sec) * 1_000_000_000 + i64::from(self.nanosec)
    }
}

impl From<Duration> for Time {
    fn from(d: Duration) -> Self {
        Self {
            sec: i32::try_from(d.as_secs()).unwrap_or(i32::MAX),
            nanosec: d.subsec_nanos(),
        }
    }
}

impl_message! {
    Time,
    package: "builtin_interfaces",
    interface: "msg",
    name: "Time",
    fields: [
        sec: FieldType::Int32,
        nanosec: FieldType::UInt32,
    ],
}

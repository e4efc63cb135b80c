use serde::{Deserialize, Serialize};

use crate::impl_message;
use crate::introspection::{Collection, FieldType};
use crate::sequence::Sequence;
use crate::std_msgs::Header;
use crate::traits::MessageTypeInfo;

/// `sensor_msgs/msg/LaserScan`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    pub header: Header,
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_increment: f32,
    pub time_increment: f32,
    pub scan_time: f32,
    pub range_min: f32,
    pub range_max: f32,
    pub ranges: Sequence<f32>,
    pub intensities: Sequence<f32>,
}

impl LaserScan {
    /// Scan carrying only `ranges`; the geometry fields stay at zero.
    pub fn from_ranges(ranges: Vec<f32>) -> Self {
        Self {
            ranges: Sequence::from_vec(ranges),
            ..Default::default()
        }
    }
}

impl_message! {
    LaserScan,
    package: "sensor_msgs",
    interface: "msg",
    name: "LaserScan",
    fields: [
        header: FieldType::Message(<Header as MessageTypeInfo>::members),
        angle_min: FieldType::Float32,
        angle_max: FieldType::Float32,
        angle_increment: FieldType::Float32,
        time_increment: FieldType::Float32,
        scan_time: FieldType::Float32,
        range_min: FieldType::Float32,
        range_max: FieldType::Float32,
        ranges: FieldType::Float32 => Collection::Sequence,
        intensities: FieldType::Float32 => Collection::Sequence,
    ],
}

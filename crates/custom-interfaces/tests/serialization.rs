use custom_interfaces::action::{
    Aula9, Aula9FeedbackMessage, Aula9GetResultResponse, Aula9Result, GoalStatus, Rotate,
    RotateGoal, RotateSendGoalRequest, SendGoalResponse,
};
use custom_interfaces::builtin_interfaces::Time;
use custom_interfaces::msg::Aula7;
use custom_interfaces::sensor_msgs::LaserScan;
use custom_interfaces::sequence::{Sequence, deserialize_bounded};
use custom_interfaces::srv::Aula8Request;
use custom_interfaces::unique_identifier_msgs::Uuid;
use custom_interfaces::{CdrSerdes, Error, RosMessage};
use serde::{Deserialize, Serialize};

#[test]
fn test_aula8_request_wire_layout() {
    let bytes = Aula8Request { a: 2, b: 3 }.to_cdr().unwrap();
    let mut expected = vec![0x00, 0x01, 0x00, 0x00];
    expected.extend_from_slice(&2i64.to_le_bytes());
    expected.extend_from_slice(&3i64.to_le_bytes());
    assert_eq!(bytes, expected);
    assert_eq!(Aula8Request::from_cdr(&bytes).unwrap(), Aula8Request { a: 2, b: 3 });
}

#[test]
fn test_aula7_string_is_length_prefixed_and_terminated() {
    let bytes = Aula7 {
        count: 1,
        message: "hi".to_string(),
    }
    .to_cdr()
    .unwrap();
    assert_eq!(
        bytes,
        [0x00, 0x01, 0x00, 0x00, 1, 0, 0, 0, 3, 0, 0, 0, b'h', b'i', 0]
    );
}

#[test]
fn test_send_goal_request_carries_goal_id_first() {
    let goal_id = Uuid::from_bytes([7; 16]);
    let request = RotateSendGoalRequest::builder()
        .goal_id(goal_id)
        .goal(RotateGoal { angle: -90.0 });
    let bytes = request.to_cdr().unwrap();

    assert_eq!(&bytes[4..20], &[7; 16]);
    assert_eq!(&bytes[20..28], &(-90.0f64).to_le_bytes());
    assert_eq!(RotateSendGoalRequest::from_cdr(&bytes).unwrap(), request);
}

#[test]
fn test_envelopes_decode_back() {
    let response = SendGoalResponse::<Rotate>::builder()
        .accepted(true)
        .stamp(Time::new(12, 34));
    let bytes = CdrSerdes::serialize(&response).unwrap();
    assert_eq!(CdrSerdes::<SendGoalResponse<Rotate>>::deserialize(&bytes).unwrap(), response);

    let result = Aula9GetResultResponse::new(GoalStatus::Succeeded, Aula9Result { final_count: 5 });
    let decoded = Aula9GetResultResponse::from_cdr(&result.to_cdr().unwrap()).unwrap();
    assert_eq!(decoded.goal_status().unwrap(), GoalStatus::Succeeded);
    assert_eq!(decoded.result.final_count, 5);

    let feedback = Aula9FeedbackMessage::new(Uuid::new_v4(), Default::default());
    assert_eq!(
        Aula9FeedbackMessage::from_cdr(&feedback.to_cdr().unwrap()).unwrap(),
        feedback
    );
}

#[test]
fn test_unknown_status_value_is_reported() {
    let mut response = custom_interfaces::action::GetResultResponse::<Aula9>::default();
    response.status = 42;
    let decoded = Aula9GetResultResponse::from_cdr(&response.to_cdr().unwrap()).unwrap();
    assert!(matches!(decoded.goal_status(), Err(Error::InvalidGoalStatus(42))));
}

#[test]
fn test_laser_scan_sequences() {
    let scan = LaserScan::from_ranges(vec![0.5, 1.5, 2.5]);
    let decoded = LaserScan::from_cdr(&scan.to_cdr().unwrap()).unwrap();
    assert_eq!(decoded.ranges.as_slice(), &[0.5, 1.5, 2.5]);
    assert!(decoded.intensities.is_empty());
}

#[test]
fn test_truncated_payload_is_an_error() {
    let bytes = Aula8Request { a: 2, b: 3 }.to_cdr().unwrap();
    assert!(matches!(
        Aula8Request::from_cdr(&bytes[..10]),
        Err(Error::Cdr(_))
    ));
    assert!(matches!(
        Aula8Request::from_cdr(&bytes[..3]),
        Err(Error::TruncatedHeader(3))
    ));
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Bounded {
    #[serde(deserialize_with = "deserialize_bounded::<_, i32, 2>")]
    items: Sequence<i32>,
}

#[test]
fn test_bounded_sequence_rejects_oversized_payload() {
    let fits = Bounded {
        items: Sequence::from_vec(vec![1, 2]),
    };
    let decoded: Bounded = CdrSerdes::deserialize(&CdrSerdes::serialize(&fits).unwrap()).unwrap();
    assert_eq!(decoded, fits);
    assert_eq!(decoded.items.bound(), Some(2));

    let too_long = Bounded {
        items: Sequence::from_vec(vec![1, 2, 3]),
    };
    let bytes = CdrSerdes::serialize(&too_long).unwrap();
    assert!(CdrSerdes::<Bounded>::deserialize(&bytes).is_err());
}

use std::io::Write;
use std::time::Duration;

use amr_nodes::count_action::{self, CountUpServer};
use amr_nodes::navigation::{self, NavigationConfig};
use amr_nodes::params::NodeParameters;
use amr_nodes::pubsub::loopback;
use amr_nodes::rotation::{self, RotationServer};
use amr_nodes::NodeError;
use custom_interfaces::geometry_msgs::Twist;

const PARAMS: &str = r#"
/**:
  ros__parameters:
    period_ms: 200

/main_navigation_node:
  ros__parameters:
    wall_distance_threshold: 0.8
    rotation_angle: -45

/rotation_action_server:
  ros__parameters:
    rotation_speed: 1.0
"#;

fn params_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_nodes_read_their_own_sections() {
    let file = params_file(PARAMS);

    let nav = NodeParameters::load(navigation::NODE, Some(file.path())).unwrap();
    let config = NavigationConfig::from_params(&nav).unwrap();
    assert_eq!(
        config,
        NavigationConfig {
            wall_distance_threshold: 0.8,
            forward_speed: 0.2,
            rotation_angle: -45.0,
        }
    );

    let server = CountUpServer::new(
        &NodeParameters::load(count_action::SERVER_NODE, Some(file.path())).unwrap(),
    )
    .unwrap();
    assert_eq!(server.period(), Duration::from_millis(200));

    let (cmd_vel, _twists) = loopback::<Twist>(rotation::CMD_VEL_TOPIC);
    let rotation = RotationServer::new(
        cmd_vel,
        &NodeParameters::load(rotation::NODE, Some(file.path())).unwrap(),
    )
    .unwrap();
    assert_eq!(rotation.rotation_speed(), 1.0);
}

#[test]
fn test_no_file_means_defaults() {
    let nav = NodeParameters::load(navigation::NODE, None).unwrap();
    assert_eq!(
        NavigationConfig::from_params(&nav).unwrap(),
        NavigationConfig::default()
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = NodeParameters::load(navigation::NODE, Some(path.as_path())).unwrap_err();
    assert!(matches!(err, NodeError::ParameterFile { .. }));
}

#[test]
fn test_malformed_yaml() {
    let file = params_file("/**:\n  ros__parameters: [unclosed\n");
    let err = NodeParameters::load(navigation::NODE, Some(file.path())).unwrap_err();
    assert!(matches!(err, NodeError::ParameterYaml(_)));
}

#[test]
fn test_type_mismatch_names_the_parameter() {
    let file = params_file("/**:\n  ros__parameters:\n    forward_speed: fast\n");
    let nav = NodeParameters::load(navigation::NODE, Some(file.path())).unwrap();
    let err = NavigationConfig::from_params(&nav).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter 'forward_speed' expected double, found string"
    );
}

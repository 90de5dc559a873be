//! Named topic catalog.
//!
//! The fixed table of logical listener keys the registry is seeded with.
//! This is configuration, enumerated once at startup — the registry itself
//! never interprets the bindings beyond passing their hints to the bus.

use rover_core::TopicBinding;

/// The default named-topic catalog.
///
/// Keys are stable logical identifiers chosen for the GUI's vocabulary, not
/// raw topic names, so the same topic can be reused under different keys.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn default_catalog() -> Vec<(&'static str, TopicBinding)> {
    vec![
        (
            "erlangData",
            TopicBinding::new("/iot/exercise/erlang_trigger", "std_msgs/Int8"),
        ),
        (
            "estopTrigger",
            TopicBinding::new("/base/estop", "std_msgs/UInt8").logged(),
        ),
        (
            "gpioTrigger",
            TopicBinding::new("/nx_gpio/battery_state", "sensor_msgs/BatteryState").logged(),
        ),
        (
            "imuCalibration",
            TopicBinding::new("/iot/exercise/calibration_status", "std_msgs/Int8"),
        ),
        (
            "imuConnection",
            TopicBinding::new("iot/exercise/connect_status", "std_msgs/Int8").logged(),
        ),
        (
            "imuData",
            TopicBinding::new("/iot/exercise/single_trigger", "std_msgs/Int8"),
        ),
        (
            "navigationPath",
            TopicBinding::new("/nav_interface/global_path", "nav_msgs/Path"),
        ),
        (
            "odometryValue",
            TopicBinding::new("/ctrl_interface/odomDistance", "std_msgs/Float32"),
        ),
        (
            "robotPosition",
            TopicBinding::new("/robot_pose", "geometry_msgs/Pose").with_throttle(250),
        ),
        (
            "wristbandConnection",
            TopicBinding::new("/iot/vitals_connected", "std_msgs/Int8").logged(),
        ),
        (
            "wristbandData",
            TopicBinding::new("/iot/vitals_measured", "geometry_msgs/Vector3").logged(),
        ),
        (
            "qrCodeUser",
            TopicBinding::new("/QR_interface/userID", "std_msgs/String").logged(),
        ),
        (
            "guiTrigger",
            TopicBinding::new("/hri_interface/gui_trigger", "std_msgs/String").logged(),
        ),
        (
            "screenFlip",
            TopicBinding::new("/ctrl_interface/trigger_to_gui", "std_msgs/Int8").logged(),
        ),
        (
            "robotTask",
            TopicBinding::new("/task_manager/task", "rob_interface/RobTask").logged(),
        ),
        (
            "faceId",
            TopicBinding::new("/top_cv/face_id", "std_msgs/Int8"),
        ),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

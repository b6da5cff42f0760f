// ---------------------------------------------------------------------------
// Config option table
// ---------------------------------------------------------------------------

/// One entry of the key/value config: its default value and the comment
/// rendered above it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOption {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl ConfigOption {
    pub const fn new(
        key: &'static str,
        default: &'static str,
        description: &'static str,
        required: bool,
    ) -> Self {
        Self { key, default, description, required }
    }
}

pub const BLOCK_GROUP_NAME: &str = "blockGroupName";
pub const SMART_DELAY_TIME: &str = "smartDelayTime";
pub const SPACE_MAIN_THRUST: &str = "spaceMainThrust";
pub const GYRO_RESPONSIVENESS: &str = "gyroResponsiveness";
pub const MAX_PITCH: &str = "maxPitch";
pub const MAX_ROLL: &str = "maxRoll";
pub const GYRO_VELOCITY_SCALE: &str = "gyroVelocityScale";
pub const START_COMMAND: &str = "startCommand";

/// Options written by a fresh or reset config, in render order.
pub fn default_options() -> Vec<ConfigOption> {
    vec![
        ConfigOption::new(
            BLOCK_GROUP_NAME,
            "Flight Assist",
            "Block group that contains all required blocks.",
            true,
        ),
        ConfigOption::new(
            SMART_DELAY_TIME,
            "20",
            "Duration to wait in ticks before overriding gyros in smart mode.",
            true,
        ),
        ConfigOption::new(
            SPACE_MAIN_THRUST,
            "backward",
            "Direction of your main thrust used by the vector module.",
            true,
        ),
        ConfigOption::new(
            GYRO_RESPONSIVENESS,
            "8",
            "Tuning variable. Lower = faster but may over-shoot more.",
            true,
        ),
        ConfigOption::new(MAX_PITCH, "45", "Max pitch used by hover module.", true),
        ConfigOption::new(MAX_ROLL, "45", "Max roll used by hover module.", true),
        ConfigOption::new(
            GYRO_VELOCITY_SCALE,
            "0.2",
            "Tuning variable used to adjust gyroscope response.",
            true,
        ),
        ConfigOption::new(
            START_COMMAND,
            "hover smart",
            "Command ran automatically upon successful compilation.",
            false,
        ),
    ]
}

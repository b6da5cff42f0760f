use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlightAssistError {
    #[error("config error: unable to parse line: {line}")]
    ConfigParse { line: String },

    #[error("config error: missing value for required key: {key}")]
    MissingConfigKey { key: String },

    #[error("config error: invalid value '{value}' for key: {key}")]
    InvalidConfigValue { key: String, value: String },

    #[error("unidentified thrust direction '{0}'")]
    UnknownDirection(String),

    #[error("{group} does not contain a cockpit or remote control block")]
    NoShipController { group: String },

    #[error("{group} does not contain any gyroscopes")]
    NoGyros { group: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlightAssistError>;

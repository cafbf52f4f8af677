use thiserror::Error;

/// Errors raised by the block catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("No function configuration registered for type '{0}'")]
    ConfigurationNotFound(String),
}

/// Errors that can occur while loading a flow document.
///
/// Any of these means the document is corrupt. Loading never skips a block
/// or connection to recover, since that would silently drop wiring.
#[derive(Error, Debug, Clone)]
pub enum FlowLoadError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(String),

    #[error("Block '{block_id}' has an unregistered function type: '{type_name}'")]
    InvalidFunctionType { block_id: String, type_name: String },

    #[error("Id '{0}' is used by more than one element in the flow")]
    DuplicateId(String),

    #[error(
        "Connection '{connection_id}' references input/output '{input_output_id}', which was not found in any block"
    )]
    DanglingConnection {
        connection_id: String,
        input_output_id: String,
    },

    #[error("Connection '{connection_id}' is not a valid wiring: {reason}")]
    InvalidConnection { connection_id: String, reason: String },
}

/// Errors that can occur while writing a flow document.
#[derive(Error, Debug, Clone)]
pub enum FlowSaveError {
    #[error("Failed to serialize flow: {0}")]
    SerializeError(String),

    #[error("Connection '{connection_id}' references pin {pin} of block '{block_id}', which does not exist")]
    UnresolvedPin {
        connection_id: String,
        block_id: String,
        pin: u32,
    },
}

/// Errors returned by designer commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    #[error("Block '{0}' not found")]
    BlockNotFound(String),

    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("Pin {pin} not found on block '{block_id}'")]
    PinNotFound { block_id: String, pin: u32 },

    #[error("Cannot connect {start} to {end}: {reason}")]
    IncompatiblePins {
        start: String,
        end: String,
        reason: String,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors reading a designer configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(String),

    #[error("Invalid config: {0}")]
    Parse(String),
}

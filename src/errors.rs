//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Search query is empty, whitespace-only, or too long.
    InvalidQuery(String),
    /// The external search program could not be resolved on `PATH`.
    NotFound(String),
    /// The external search program ran but exited unsuccessfully.
    Execution(String),
    /// A tool, resource, or prompt name is not registered.
    UnknownOperation(String),
    /// Request arguments do not match the declared tool shape.
    SchemaValidation(String),
    /// Configuration parsing or validation failure.
    Config(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// MCP protocol or transport failure.
    Mcp(String),
}

impl AppError {
    /// Envelope `Type` reported to MCP clients for this error.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "InvalidQuery",
            Self::NotFound(_) => "NotFound",
            Self::Execution(_) => "ExecutionError",
            Self::UnknownOperation(_) => "UnknownOperation",
            Self::SchemaValidation(_) => "SchemaValidationError",
            Self::Config(_) | Self::Io(_) | Self::Mcp(_) => "InternalError",
        }
    }

    /// Whether this is a server-side fault rather than a caller error.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Io(_) | Self::Mcp(_))
    }

    /// Remediation hint shown alongside the error details.
    #[must_use]
    pub fn solution(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => {
                "Provide a non-empty search query within the length limit \
                 (500 characters by default)."
            }
            Self::NotFound(_) => {
                "Install the Gemini CLI (npm install -g @google/gemini-cli) and make sure \
                 it is on your PATH, or set search_command in the server config."
            }
            Self::Execution(_) => {
                "Check that the Gemini CLI is authenticated and not rate limited, then retry. \
                 Run the command manually to see its full output."
            }
            Self::UnknownOperation(_) => {
                "List the available tools, resources, and prompts and use one of the registered names."
            }
            Self::SchemaValidation(_) => {
                "Check the tool's input schema and pass arguments of the declared types."
            }
            Self::Config(_) | Self::Io(_) | Self::Mcp(_) => {
                "This is an internal server error. Check the server logs for details."
            }
        }
    }

    /// Message carried by the error, without the kind prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidQuery(msg)
            | Self::NotFound(msg)
            | Self::Execution(msg)
            | Self::UnknownOperation(msg)
            | Self::SchemaValidation(msg)
            | Self::Config(msg)
            | Self::Io(msg)
            | Self::Mcp(msg) => msg,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Execution(msg) => write!(f, "execution: {msg}"),
            Self::UnknownOperation(msg) => write!(f, "unknown operation: {msg}"),
            Self::SchemaValidation(msg) => write!(f, "schema validation: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Mcp(msg) => write!(f, "mcp: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

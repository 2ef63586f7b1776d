use thiserror::Error;

/// Main error type for the snap-filters library
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Configuration defects: a catalog, context or settings file that cannot be used.
///
/// These surface before any render is attempted. Whether they are fatal is up to the
/// caller; the CLI aborts on them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Filter operation not provided by the processing context: {operation}")]
    UnsupportedOperation { operation: String },

    #[error("Unknown filter operation: {name}")]
    UnknownOperation { name: String },

    #[error("Invalid parameter for {operation}: {details}")]
    InvalidParameter { operation: String, details: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration file: {path} - {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },
}

/// A single filter that could not be rendered.
///
/// Recoverable: a batch reports it in that filter's slot and carries on with the rest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Filter {filter} produced no output: {reason}")]
    NoOutput { filter: String, reason: String },

    #[error("Filter {filter} is not available in this processing context")]
    Unsupported { filter: String },

    #[error("Filter {filter} has invalid parameters: {details}")]
    InvalidParameters { filter: String, details: String },
}

impl RenderError {
    /// Name of the filter that failed
    pub fn filter(&self) -> &str {
        match self {
            Self::NoOutput { filter, .. }
            | Self::Unsupported { filter }
            | Self::InvalidParameters { filter, .. } => filter,
        }
    }
}

/// Convenience type alias for Results using PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (the rest of the work can go on)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A failed filter only loses its own preview
            Self::Render(_) => true,
            // IO errors might be temporary
            Self::Io(_) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(ConfigurationError::UnknownOperation { name }) => {
                format!(
                    "Filter '{}' not found. Available filters: color_clamp, color_controls, photo_effect_instant, photo_effect_process, photo_effect_noir, sepia_tone",
                    name
                )
            }
            Self::Configuration(ConfigurationError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            Self::Image(_) => {
                "Could not read the photo. Please check the file exists and is a PNG or JPEG.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

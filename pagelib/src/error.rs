use thiserror::Error;
use crate::Page;

/// Result type alias for fallible configuration and input handling
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Everything that can be wrong with the inputs to a simulation
///
/// These are all caught before the engine runs. The engine itself never fails
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Frame count outside 1..=max
    #[error("Frames must be between 1 and {max}, got {got}")]
    FrameCount { got: usize, max: usize },

    /// Reference string length outside 1..=max
    #[error("Number of pages must be between 1 and {max}, got {got}")]
    ReferenceCount { got: usize, max: usize },

    /// A page number above the configured maximum
    #[error("Page numbers must be between 0 and {max}, got {page} at position {position}")]
    PageOutOfRange { page: Page, position: usize, max: Page },

    /// A token in a reference string which isn't a page number
    #[error("Couldn't parse '{token}' as a page number")]
    InvalidToken { token: String },

    /// Nothing to simulate
    #[error("No replacement policies selected")]
    NoPolicies,

    /// No reference string was given by any source
    #[error("No reference string given, use --pages, --trace, --random or a config file")]
    MissingReference,

    /// Reading a reference file failed
    #[error("Couldn't read the reference file: {0}")]
    Io(#[from] std::io::Error),
}

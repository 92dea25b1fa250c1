use thiserror::Error;

/// Errors surfaced by the element registry, the document and the test harness.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Component {component} is not registered")]
    NotRegistered { component: &'static str },

    #[error("Tag `{tag}` is already defined by another component")]
    AlreadyDefined { tag: String },

    #[error("`{tag}` is not a valid custom element name")]
    InvalidTagName { tag: String },

    #[error("Node {0} does not exist")]
    NodeNotFound(usize),

    #[error("No element matches {0}")]
    ElementNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

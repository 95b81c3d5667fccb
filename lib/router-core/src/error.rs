use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("Invalid route configuration: {0}")]
    Configuration(String),

    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("No route named: {0}")]
    UnknownRoute(String),

    #[error("Missing parameter '{param}' for route '{route}'")]
    MissingParam { route: String, param: String },

    #[error("Invalid value {value:?} for parameter '{param}'")]
    InvalidParam { param: String, value: String },
}

impl RouterError {
    /// Whether the error was caused by a location no route matches
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouterError::NotFound(_))
    }
}

//! Error types for the view engine.

use crate::api_client::ApiError;
use crate::config::ConfigError;
use crate::template::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("view '{view}' is missing required element slot '{slot}'")]
    MissingSlot {
        view: &'static str,
        slot: &'static str,
    },
    #[error("default route '{route}' has no registered template")]
    MissingRoute { route: String },
}

use thiserror::Error;

/// Errors raised while rendering a script.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Writing into the output buffer failed.
    #[error("failed to render script: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, CodegenError>;

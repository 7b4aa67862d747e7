pub type FloraResult<T> = Result<T, FloraError>;

#[derive(thiserror::Error, Debug)]
pub enum FloraError {
    #[error("config error: {0}")]
    Config(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("color error: {0}")]
    Color(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FloraError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }
}

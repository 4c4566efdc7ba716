use thiserror::Error;

/// Failures reported by the embedded runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Runtime load error: {message}")]
    Load { message: String },

    #[error("Package install error ({package}): {message}")]
    PackageInstall { package: String, message: String },

    #[error("Event submit error: {message}")]
    Submit { message: String },

    #[error("Execution error: {message}")]
    Execution { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Surface not found: {0}")]
    SurfaceNotFound(String),

    #[error("Listener registration failed: {0}")]
    Listener(String),
}

/// Terminal failures of the startup sequence or the game run.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Runtime acquisition failed: {0}")]
    Acquisition(RuntimeError),

    #[error("Surface creation failed: {0}")]
    Surface(String),

    #[error("Bridge install failed: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Game execution failed: {0}")]
    Execution(RuntimeError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SessionError {
    /// Name of the startup phase the error terminated.
    pub fn phase(&self) -> &'static str {
        match self {
            SessionError::Acquisition(_) => "acquire",
            SessionError::Surface(_) => "surface",
            SessionError::Bridge(_) => "bridge",
            SessionError::Execution(_) => "run",
            SessionError::Config(_) => "config",
        }
    }
}

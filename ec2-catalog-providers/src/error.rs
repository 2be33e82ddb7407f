use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to spawn '{program}': {source}. Make sure the AWS CLI is installed and on PATH.")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to parse output of '{command}': {source}")]
    InvalidJson {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Injected(String),
}

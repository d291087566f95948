use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
    #[error("{endpoint} returned an unreadable payload: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint} requires {setting} to be set")]
    MissingCredential {
        endpoint: &'static str,
        setting: &'static str,
    },
}

impl FetchError {
    /// False when the call failed before anything was sent.
    pub fn reached_network(&self) -> bool {
        !matches!(self, Self::Client(_) | Self::MissingCredential { .. })
    }

    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Client(_) => None,
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::MissingCredential { endpoint, .. } => Some(*endpoint),
        }
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    endpoint: &'static str,
    body: &str,
) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode { endpoint, source })
}

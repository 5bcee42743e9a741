use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid socket url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("socket url must use ws:// or wss://, got '{0}'")]
    UnsupportedScheme(String),
    #[error("failed to connect websocket {url}: {source}")]
    Connect {
        url: String,
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[error("socket connection is closed")]
    Closed,
    #[error("failed to encode {kind} request: {source}")]
    Encode {
        kind: &'static str,
        source: serde_json::Error,
    },
}

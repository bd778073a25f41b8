use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("network error: {0}")]
    Network(String),

    #[error("websocket error: {0}")]
    WebSocket(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("connection closed")]
    Closed,

    #[error("other: {0}")]
    Other(String),
}

impl From<serde_json::Error> for ConnectorError {
    fn from(e: serde_json::Error) -> Self {
        ConnectorError::Parse(e.to_string())
    }
}

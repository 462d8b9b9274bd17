use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection failure, timeout or an undecodable body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

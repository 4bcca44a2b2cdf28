use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("router rejected the credentials {attempts} times in a row")]
    AuthExhausted { attempts: u32 },
    #[error("unexpected http status: {0}")]
    Status(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

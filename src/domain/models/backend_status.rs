use super::VerifyResponse;

/// Outcome of the most recent credential verification.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendStatus {
    Loading,
    Ok(VerifyResponse),
    Error(String),
}

//! Payment error types.

use thiserror::Error;

/// Errors raised by payment-gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The gateway processed the request but did not complete the charge.
    #[error("charge was declined: {0}")]
    Declined(String),

    /// The gateway could not be reached or returned a malformed response.
    #[error("payment gateway error: {0}")]
    Gateway(String),

    /// The charge request exceeded its deadline.
    #[error("payment gateway timed out after {0} ms")]
    Timeout(u64),
}

impl PaymentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Declined(_) => "CHARGE_DECLINED",
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::Timeout(_) => "GATEWAY_TIMEOUT",
        }
    }
}

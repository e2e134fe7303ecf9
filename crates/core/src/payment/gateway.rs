//! Payment gateway trait.

use super::error::PaymentError;
use super::types::{ChargeReceipt, ChargeRequest};

/// Gateway trait for charging a tenant's payment source.
///
/// This trait is implemented by the API crate's HTTP client; tests use
/// recording fakes. Implementations are expected to attach a deadline to
/// the underlying network call.
pub trait PaymentGateway: Send + Sync {
    /// Charges the request's source token, routing funds to the
    /// destination account and withholding the application fee.
    fn charge(
        &self,
        request: ChargeRequest,
    ) -> impl std::future::Future<Output = Result<ChargeReceipt, PaymentError>> + Send;
}

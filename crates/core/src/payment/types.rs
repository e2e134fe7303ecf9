//! Charge request and receipt types.

use roost_shared::types::Money;

/// A single charge against a tenant's payment source.
///
/// Funds are routed to the host's connected account; the platform
/// withholds `application_fee` from the charged amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    /// Total amount to charge, in minor units.
    pub amount: Money,
    /// Opaque payment-source token supplied by the tenant.
    pub source: String,
    /// The host's connected payment-account identifier.
    pub destination: String,
    /// Platform fee withheld from the charge, in minor units.
    pub application_fee: Money,
}

/// Gateway acknowledgement of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeReceipt {
    /// Gateway-assigned charge identifier.
    pub charge_id: String,
    /// The amount actually charged.
    pub amount: Money,
}

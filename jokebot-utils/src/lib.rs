/// Reply text formatting helpers.
pub mod formatting;
/// Fixed-channel notifications (launch and shutdown notices).
pub mod notify;

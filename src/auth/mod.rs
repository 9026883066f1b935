pub mod errors;
pub mod ledger;

pub use errors::AuthError;
pub use ledger::{ApiKey, CreditLedger};

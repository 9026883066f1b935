use std::collections::HashMap;
use std::sync::Mutex;

use super::AuthError;

/// A key that passed authorization. Produced only by [`CreditLedger::authorize`].
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

/// In-memory map from API key to remaining credit count.
///
/// Built once at startup from configuration and owned by the server state;
/// balances live for the process lifetime and reset on restart. Check and
/// decrement happen under a single lock, so a key holding N credits admits
/// at most N generations no matter how many requests race for it.
pub struct CreditLedger {
    credits: Mutex<HashMap<String, i64>>,
}

impl CreditLedger {
    pub fn new(entries: impl IntoIterator<Item = (String, i64)>) -> Self {
        Self {
            credits: Mutex::new(entries.into_iter().collect()),
        }
    }

    /// Read-only admission check. Rejects an absent, unknown, or exhausted
    /// key with the same error; never mutates a balance.
    pub fn authorize(&self, key: Option<&str>) -> Result<ApiKey, AuthError> {
        let key = key.ok_or(AuthError::InvalidKey)?;
        let credits = self.credits.lock().unwrap();
        match credits.get(key) {
            Some(&remaining) if remaining > 0 => Ok(ApiKey(key.to_string())),
            _ => Err(AuthError::InvalidKey),
        }
    }

    /// Spend one credit, returning the balance left afterwards.
    ///
    /// Fails without mutating when the balance has already reached zero,
    /// which can happen when concurrent requests raced for the last credit
    /// after both passed [`authorize`](Self::authorize). The charge is not
    /// refunded if the inference call later fails.
    pub fn debit(&self, key: &ApiKey) -> Result<i64, AuthError> {
        let mut credits = self.credits.lock().unwrap();
        match credits.get_mut(&key.0) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Ok(*remaining)
            }
            _ => Err(AuthError::InvalidKey),
        }
    }

    /// Remaining balance for a key, if the key is known.
    pub fn balance(&self, key: &str) -> Option<i64> {
        self.credits.lock().unwrap().get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(entries: &[(&str, i64)]) -> CreditLedger {
        CreditLedger::new(entries.iter().map(|(k, c)| (k.to_string(), *c)))
    }

    #[test]
    fn test_authorize_missing_key() {
        let l = ledger(&[("k1", 10)]);
        assert!(l.authorize(None).is_err());
    }

    #[test]
    fn test_authorize_unknown_key() {
        let l = ledger(&[("k1", 10)]);
        assert!(l.authorize(Some("wrong")).is_err());
        assert_eq!(l.balance("k1"), Some(10), "rejection must not mutate");
    }

    #[test]
    fn test_authorize_exhausted_key() {
        let l = ledger(&[("k1", 0)]);
        assert!(l.authorize(Some("k1")).is_err());
        assert_eq!(l.balance("k1"), Some(0));
    }

    #[test]
    fn test_authorize_is_read_only() {
        let l = ledger(&[("k1", 3)]);
        let _ = l.authorize(Some("k1")).unwrap();
        let _ = l.authorize(Some("k1")).unwrap();
        assert_eq!(l.balance("k1"), Some(3));
    }

    #[test]
    fn test_debit_decrements_by_one() {
        let l = ledger(&[("k1", 5)]);
        let key = l.authorize(Some("k1")).unwrap();
        assert_eq!(l.debit(&key).unwrap(), 4);
        assert_eq!(l.balance("k1"), Some(4));
    }

    #[test]
    fn test_debit_exhausts_then_rejects() {
        let l = ledger(&[("k1", 2)]);
        let key = l.authorize(Some("k1")).unwrap();
        assert_eq!(l.debit(&key).unwrap(), 1);
        assert_eq!(l.debit(&key).unwrap(), 0);
        assert!(l.debit(&key).is_err(), "third debit must fail");
        assert_eq!(l.balance("k1"), Some(0), "balance never goes negative");
    }

    #[test]
    fn test_balance_unknown_key() {
        let l = ledger(&[("k1", 1)]);
        assert_eq!(l.balance("nope"), None);
    }
}

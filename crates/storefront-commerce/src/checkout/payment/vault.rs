//! Secure storage for a saved card.

use crate::checkout::CardDetails;
use crate::error::CommerceError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key for the saved card.
pub const SAVED_CARD_KEY: &str = "savedCard";

/// A single secure slot holding the shopper's saved card.
pub trait CardVault: Send + Sync {
    fn load(&self) -> Result<Option<CardDetails>, CommerceError>;

    fn save(&self, card: &CardDetails) -> Result<(), CommerceError>;

    fn forget(&self) -> Result<(), CommerceError>;
}

/// Key-value vault kept in memory. Cards are stored as JSON.
#[derive(Debug, Default)]
pub struct InMemoryCardVault {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCardVault {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> Result<T, CommerceError>,
    ) -> Result<T, CommerceError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CommerceError::Vault("vault lock poisoned".to_string()))?;
        f(&mut entries)
    }
}

impl CardVault for InMemoryCardVault {
    fn load(&self) -> Result<Option<CardDetails>, CommerceError> {
        self.with_entries(|entries| {
            entries
                .get(SAVED_CARD_KEY)
                .map(|json| serde_json::from_str(json).map_err(CommerceError::from))
                .transpose()
        })
    }

    fn save(&self, card: &CardDetails) -> Result<(), CommerceError> {
        let json = serde_json::to_string(card)?;
        self.with_entries(|entries| {
            entries.insert(SAVED_CARD_KEY.to_string(), json);
            Ok(())
        })
    }

    fn forget(&self) -> Result<(), CommerceError> {
        self.with_entries(|entries| {
            entries.remove(SAVED_CARD_KEY);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_forget() {
        let vault = InMemoryCardVault::new();
        assert!(vault.load().unwrap().is_none());

        let card = CardDetails::new("4111111111111111", "12/27", "123");
        vault.save(&card).unwrap();
        assert_eq!(vault.load().unwrap(), Some(card));

        vault.forget().unwrap();
        assert!(vault.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let vault = InMemoryCardVault::new();
        vault
            .with_entries(|e| {
                e.insert(SAVED_CARD_KEY.to_string(), "{not json".to_string());
                Ok(())
            })
            .unwrap();
        assert!(matches!(
            vault.load(),
            Err(CommerceError::Serialization(_))
        ));
    }
}

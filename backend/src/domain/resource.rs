//! Shape shared by every resource handled by the generic service.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::EntityId;

/// A persisted record with a generated identifier.
///
/// Implementors describe their wire shape so the service can validate
/// payloads and lookup keys without knowing the concrete type.
pub trait Resource:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Human-readable name used in messages and log fields.
    const NAME: &'static str;

    /// Wire (camelCase) property names; the only keys accepted by unique-key
    /// lookups.
    const FIELDS: &'static [&'static str];

    /// Identifier as supplied by the caller or assigned by the store.
    fn id(&self) -> Option<i64>;

    /// Copy of the record carrying the identifier assigned by the store.
    #[must_use]
    fn with_id(self, id: EntityId) -> Self;

    /// Copy of the record that is safe to return to callers.
    #[must_use]
    fn redacted(self) -> Self {
        self
    }

    /// Natural key probed for uniqueness before insertion, as
    /// `(wire field, value)`.
    fn natural_key(&self) -> Option<(&'static str, String)> {
        None
    }

    /// Copy of the record with write-only fields the caller left out taken
    /// from `stored`, so a replace does not wipe them.
    #[must_use]
    fn retain_secrets(self, _stored: &Self) -> Self {
        self
    }
}

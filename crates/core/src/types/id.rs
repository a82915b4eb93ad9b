//! Store-assigned property identifiers.
//!
//! A [`PropertyId`] can only be obtained by parsing (`PropertyId::parse`) or by
//! generating a fresh one (`PropertyId::generate`). Handlers parse raw path
//! segments into this type before touching the store, so a malformed id is
//! rejected without any database access.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`PropertyId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyIdError {
    /// The input string is empty.
    #[error("property id cannot be empty")]
    Empty,
    /// The input is not a well-formed identifier.
    #[error("invalid property id: {0}")]
    Malformed(String),
}

/// Unique identifier of a stored property, assigned once at creation.
///
/// ## Examples
///
/// ```
/// use propertyhub_core::PropertyId;
///
/// assert!(PropertyId::parse("6f1c2a7e-9b0d-4e43-8a55-0c9d1e2f3a4b").is_ok());
/// assert!(PropertyId::parse("not-an-id").is_err());
/// assert!(PropertyId::parse("").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(Uuid);

impl PropertyId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its textual form.
    ///
    /// Accepts the hyphenated and simple UUID forms.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, PropertyIdError> {
        if s.is_empty() {
            return Err(PropertyIdError::Empty);
        }

        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| PropertyIdError::Malformed(s.to_owned()))
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PropertyId {
    type Err = PropertyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for PropertyId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<PropertyId> for Uuid {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PropertyId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PropertyId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <Uuid as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PropertyId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hyphenated() {
        let id = PropertyId::parse("6f1c2a7e-9b0d-4e43-8a55-0c9d1e2f3a4b").unwrap();
        assert_eq!(id.to_string(), "6f1c2a7e-9b0d-4e43-8a55-0c9d1e2f3a4b");
    }

    #[test]
    fn test_parse_simple_form() {
        let id = PropertyId::parse("6f1c2a7e9b0d4e438a550c9d1e2f3a4b").unwrap();
        assert_eq!(id.to_string(), "6f1c2a7e-9b0d-4e43-8a55-0c9d1e2f3a4b");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(PropertyId::parse(""), Err(PropertyIdError::Empty));
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["123", "not-an-id", "6f1c2a7e-9b0d-4e43-8a55", "zzzzzzzz-9b0d-4e43-8a55-0c9d1e2f3a4b"] {
            assert!(
                matches!(PropertyId::parse(input), Err(PropertyIdError::Malformed(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(PropertyId::generate(), PropertyId::generate());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = PropertyId::parse("6f1c2a7e-9b0d-4e43-8a55-0c9d1e2f3a4b").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"6f1c2a7e-9b0d-4e43-8a55-0c9d1e2f3a4b\"");
    }

    #[test]
    fn test_from_str() {
        let id: PropertyId = "6f1c2a7e-9b0d-4e43-8a55-0c9d1e2f3a4b".parse().unwrap();
        assert_eq!(Uuid::from(id), *id.as_uuid());
    }
}

//! Listing status of a property.

use serde::{Deserialize, Serialize};

/// Error returned when an integer is not a valid listing flag.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid listing flag {0} (expected 0 or 1)")]
pub struct ListingStatusError(pub i64);

/// Whether a property is currently offered for sale.
///
/// On the wire and in storage this is the integer flag `forSale`:
/// `1` for [`ListingStatus::Listed`], `0` for [`ListingStatus::Delisted`].
/// No other values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum ListingStatus {
    /// Visible in the general listing (`forSale = 1`).
    #[default]
    Listed,
    /// Excluded from the general listing (`forSale = 0`).
    Delisted,
}

impl ListingStatus {
    /// The integer flag for this status.
    #[must_use]
    pub const fn as_flag(self) -> i16 {
        match self {
            Self::Listed => 1,
            Self::Delisted => 0,
        }
    }

    /// Returns `true` if the property is offered for sale.
    #[must_use]
    pub const fn is_listed(self) -> bool {
        matches!(self, Self::Listed)
    }
}

impl From<ListingStatus> for i16 {
    fn from(status: ListingStatus) -> Self {
        status.as_flag()
    }
}

impl TryFrom<i16> for ListingStatus {
    type Error = ListingStatusError;

    fn try_from(flag: i16) -> Result<Self, Self::Error> {
        match flag {
            1 => Ok(Self::Listed),
            0 => Ok(Self::Delisted),
            other => Err(ListingStatusError(i64::from(other))),
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listed => write!(f, "listed"),
            Self::Delisted => write!(f, "delisted"),
        }
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ListingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i16 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i16 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ListingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let flag = <i16 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::try_from(flag)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ListingStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i16 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_flag(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_listed() {
        assert_eq!(ListingStatus::default(), ListingStatus::Listed);
    }

    #[test]
    fn test_serializes_as_integer_flag() {
        assert_eq!(serde_json::to_string(&ListingStatus::Listed).unwrap(), "1");
        assert_eq!(serde_json::to_string(&ListingStatus::Delisted).unwrap(), "0");
    }

    #[test]
    fn test_deserialize_rejects_other_values() {
        assert_eq!(
            serde_json::from_str::<ListingStatus>("0").unwrap(),
            ListingStatus::Delisted
        );
        assert!(serde_json::from_str::<ListingStatus>("2").is_err());
        assert!(serde_json::from_str::<ListingStatus>("-1").is_err());
        assert!(serde_json::from_str::<ListingStatus>("\"1\"").is_err());
    }

    #[test]
    fn test_try_from_flag() {
        assert_eq!(ListingStatus::try_from(1).unwrap(), ListingStatus::Listed);
        assert_eq!(ListingStatus::try_from(7), Err(ListingStatusError(7)));
    }
}

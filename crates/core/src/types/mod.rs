//! Core types for PropertyHub.
//!
//! This module provides type-safe wrappers for the listing domain.

pub mod id;
pub mod property;
pub mod status;

pub use id::{PropertyId, PropertyIdError};
pub use property::{MAX_IMAGES_PER_PROPERTY, NewProperty, NewPropertyError, Property, PropertySummary};
pub use status::{ListingStatus, ListingStatusError};

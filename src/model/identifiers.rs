//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.
//! Deserialization goes through the same validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a saved timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Smart constructor: validates non-empty item ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidItemId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemId {
    type Error = InvalidItemId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Partition key over items (the owning festival's name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupKey(String);

impl GroupKey {
    /// Smart constructor: validates non-empty group key
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidGroupKey> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidGroupKey::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GroupKey {
    type Error = InvalidGroupKey;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<GroupKey> for String {
    fn from(key: GroupKey) -> Self {
        key.0
    }
}

/// Device identifier owning a set of saved timetables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Smart constructor: validates non-empty device ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidDeviceId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidDeviceId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = InvalidDeviceId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

// ===== Error Types =====

/// Rejected [`ItemId`] input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidItemId {
    /// Empty string.
    #[error("Item ID cannot be empty")]
    Empty,
}

/// Rejected [`GroupKey`] input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGroupKey {
    /// Empty string.
    #[error("Group key cannot be empty")]
    Empty,
}

/// Rejected [`DeviceId`] input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDeviceId {
    /// Empty string.
    #[error("Device ID cannot be empty")]
    Empty,
}

// ===== Tests =====

//! Unified error codes for the bill splitter
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order and roster errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the presentation layer
/// can localise them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Orders ====================
    /// Order line not found
    OrderItemNotFound = 4006,
    /// Course dish already on this diner's order
    DuplicateCourseItem = 4010,
    /// Friend already on the roster
    FriendAlreadyExists = 4101,
    /// Friend not on the roster
    FriendNotFound = 4102,
    /// Party name missing
    PartyNameRequired = 4201,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Price is not a valid amount
    InvalidPrice = 6002,
    /// Menu item name collides with an existing item
    MenuItemNameExists = 6003,
    /// Restaurant not found in the catalog
    RestaurantNotFound = 6101,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Local storage error
    StorageError = 9002,
    /// Catalog could not be loaded
    CatalogLoadFailed = 9003,
    /// Serialization error
    SerializationError = 9004,
}

impl ErrorCode {
    /// Numeric value of the code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::ValueOutOfRange => "Value out of range",

            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::DuplicateCourseItem => "Course item is already on this order",
            ErrorCode::FriendAlreadyExists => "Friend already exists",
            ErrorCode::FriendNotFound => "Friend not found",
            ErrorCode::PartyNameRequired => "Party name is required to save",

            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::InvalidPrice => "Please enter a valid price",
            ErrorCode::MenuItemNameExists => "A menu item with this name already exists",
            ErrorCode::RestaurantNotFound => "Restaurant not found",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Local storage error",
            ErrorCode::CatalogLoadFailed => "Error loading restaurants data",
            ErrorCode::SerializationError => "Serialization error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Orders
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4010 => Ok(ErrorCode::DuplicateCourseItem),
            4101 => Ok(ErrorCode::FriendAlreadyExists),
            4102 => Ok(ErrorCode::FriendNotFound),
            4201 => Ok(ErrorCode::PartyNameRequired),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::InvalidPrice),
            6003 => Ok(ErrorCode::MenuItemNameExists),
            6101 => Ok(ErrorCode::RestaurantNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::CatalogLoadFailed),
            9004 => Ok(ErrorCode::SerializationError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

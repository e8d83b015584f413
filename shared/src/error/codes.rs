//! Unified error codes for the menu platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant / subscription errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors (65xx: file upload)
//! - 7xxx: Table errors
//! - 8xxx: Staff / feedback / customer errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Superadmin role required
    SuperadminRequired = 2003,
    /// Resource belongs to another restaurant
    CrossTenantAccess = 2004,

    // ==================== 3xxx: Tenant / Subscription ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// Public slug matches more than one restaurant
    SlugAmbiguous = 3002,
    /// Email already registered
    EmailExists = 3003,
    /// Payment status locked for the current paid cycle
    PaymentCycleLocked = 3004,
    /// Subscription unpaid and past its due date
    SubscriptionOverdue = 3005,
    /// Unknown subscription plan
    InvalidPlan = 3006,
    /// Manager has no owning restaurant
    ManagerUnlinked = 3007,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Invalid order status
    InvalidOrderStatus = 4003,

    // ==================== 5xxx: Payment ====================
    /// Invalid payment method
    PaymentInvalidMethod = 5001,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6002,
    /// Unknown menu category
    InvalidMenuCategory = 6003,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported file format
    UnsupportedFileFormat = 6502,
    /// Invalid/corrupted image file
    InvalidImageFile = 6503,
    /// No file provided in request
    NoFileProvided = 6504,
    /// File storage failed
    FileStorageFailed = 6505,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already exists for this restaurant
    TableNumberExists = 7002,
    /// QR code generation failed
    QrGenerationFailed = 7003,

    // ==================== 8xxx: Staff / Feedback / Customer ====================
    /// Staff member not found
    StaffNotFound = 8001,
    /// Manager account not found
    ManagerNotFound = 8002,
    /// Feedback not found
    FeedbackNotFound = 8101,
    /// Rating outside the accepted range
    InvalidRating = 8102,
    /// Customer not found
    CustomerNotFound = 8201,
    /// Expense not found
    ExpenseNotFound = 8301,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Mail transport failed
    MailTransportError = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::SuperadminRequired => "Superadmin role is required",
            ErrorCode::CrossTenantAccess => "Resource belongs to another restaurant",

            // Tenant / Subscription
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::SlugAmbiguous => "Slug matches more than one restaurant",
            ErrorCode::EmailExists => "Email already registered",
            ErrorCode::PaymentCycleLocked => "Payment status is locked for the current paid cycle",
            ErrorCode::SubscriptionOverdue => "Subscription is unpaid and past its due date",
            ErrorCode::InvalidPlan => "Unknown subscription plan",
            ErrorCode::ManagerUnlinked => "Manager has no owning restaurant",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::InvalidOrderStatus => "Invalid order status",

            // Payment
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Menu item has invalid price",
            ErrorCode::InvalidMenuCategory => "Unknown menu category",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::FileStorageFailed => "File storage failed",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table number already exists for this restaurant",
            ErrorCode::QrGenerationFailed => "QR code generation failed",

            // Staff / Feedback / Customer
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::ManagerNotFound => "Manager account not found",
            ErrorCode::FeedbackNotFound => "Feedback not found",
            ErrorCode::InvalidRating => "Rating must be between 1 and 5",
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::ExpenseNotFound => "Expense not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::MailTransportError => "Mail transport failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
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
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::InvalidFormat,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            1005 => ErrorCode::AccountDisabled,

            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::RoleRequired,
            2003 => ErrorCode::SuperadminRequired,
            2004 => ErrorCode::CrossTenantAccess,

            3001 => ErrorCode::RestaurantNotFound,
            3002 => ErrorCode::SlugAmbiguous,
            3003 => ErrorCode::EmailExists,
            3004 => ErrorCode::PaymentCycleLocked,
            3005 => ErrorCode::SubscriptionOverdue,
            3006 => ErrorCode::InvalidPlan,
            3007 => ErrorCode::ManagerUnlinked,

            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::OrderEmpty,
            4003 => ErrorCode::InvalidOrderStatus,

            5001 => ErrorCode::PaymentInvalidMethod,

            6001 => ErrorCode::MenuItemNotFound,
            6002 => ErrorCode::MenuItemInvalidPrice,
            6003 => ErrorCode::InvalidMenuCategory,

            6501 => ErrorCode::FileTooLarge,
            6502 => ErrorCode::UnsupportedFileFormat,
            6503 => ErrorCode::InvalidImageFile,
            6504 => ErrorCode::NoFileProvided,
            6505 => ErrorCode::FileStorageFailed,

            7001 => ErrorCode::TableNotFound,
            7002 => ErrorCode::TableNumberExists,
            7003 => ErrorCode::QrGenerationFailed,

            8001 => ErrorCode::StaffNotFound,
            8002 => ErrorCode::ManagerNotFound,
            8101 => ErrorCode::FeedbackNotFound,
            8102 => ErrorCode::InvalidRating,
            8201 => ErrorCode::CustomerNotFound,
            8301 => ErrorCode::ExpenseNotFound,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9003 => ErrorCode::ConfigError,
            9101 => ErrorCode::MailTransportError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::PaymentCycleLocked,
            ErrorCode::SlugAmbiguous,
            ErrorCode::TableNumberExists,
            ErrorCode::MailTransportError,
        ];
        for code in codes {
            let value = code.code();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::SubscriptionOverdue).unwrap();
        assert_eq!(json, "3005");
        let code: ErrorCode = serde_json::from_str("3005").unwrap();
        assert_eq!(code, ErrorCode::SubscriptionOverdue);
    }
}

//! Error types for CropGuard
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using CropGuardError
pub type Result<T> = std::result::Result<T, CropGuardError>;

/// Unified error type for CropGuard operations
#[derive(Debug, Error)]
pub enum CropGuardError {
    // Calculation input errors
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    // Session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // Payment errors
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CropGuardError {
    /// Whether the error was caused by the caller's input rather than the system
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CropGuardError::InvalidInput(_))
    }
}

/// Calculation input errors
///
/// Every variant is the single `InvalidInput` kind of the calculation core;
/// the variant only says which constraint failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Unknown plan tier: {0}")]
    UnknownPlan(String),

    #[error("Land area must be a positive number of acres, got {0:?}")]
    InvalidArea(String),

    #[error("Amount must be a non-negative number, got {0:?}")]
    InvalidAmount(String),

    #[error("Unknown checklist item: {0}")]
    UnknownChecklistItem(String),

    #[error("Malformed eligibility checklist: {0}")]
    MalformedChecklist(String),

    #[error("State not served: {0}")]
    UnknownState(String),
}

/// Session and sign-in errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter a valid 10-digit mobile number")]
    InvalidMobile,

    #[error("Name is required")]
    MissingName,

    #[error("Password is required")]
    MissingPassword,

    #[error("Please enter a valid 6-digit OTP")]
    InvalidOtp,

    #[error("No OTP was requested for this mobile number")]
    OtpNotRequested,

    #[error("OTP has expired, please request a new one")]
    OtpExpired,

    #[error("State not served: {0}")]
    UnknownState(String),

    #[error("District {district} is not in {state}")]
    DistrictNotInState { state: String, district: String },

    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,

    #[error("Mobile number is already registered")]
    AlreadyRegistered,

    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Checkout errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Please enter your UPI ID to continue")]
    MissingVpa,

    #[error("Bank not supported for net banking: {0}")]
    UnsupportedBank(String),
}

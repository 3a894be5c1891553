//! # CropGuard Portal
//!
//! Self-service back-end for the CropGuard crop-insurance product.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   REST API (axum)                    │
//! │  /premium  /eligibility  /order-total  /plans        │
//! │  /regions  /otp  /registrations  /sessions  /checkout│
//! └───────┬──────────────────┬───────────────┬───────────┘
//!         │                  │               │
//!  ┌──────┴───────┐   ┌──────┴──────┐  ┌─────┴──────────┐
//!  │ QuoteService │   │ Session     │  │ Checkout       │
//!  │ (pure calc)  │   │ Manager     │  │ Service        │
//!  └──────┬───────┘   └─────────────┘  └─────┬──────────┘
//!         │                                  │
//!  ┌──────┴──────────────────────────────────┴──────────┐
//!  │        Tariff (read-only) + Plan Catalog           │
//!  └────────────────────────────────────────────────────┘
//! ```
//!
//! Sign-in and payment are simulated; see [`session`] and [`payment`].

pub mod api;
pub mod catalog;
pub mod config;
pub mod payment;
pub mod session;

pub use api::{create_router, AppState};
pub use catalog::{PlanCatalog, PlanOffer};
pub use config::PortalConfig;
pub use payment::{CheckoutService, PaymentMethod, PaymentReceipt};
pub use session::{
    FarmerProfile, InMemorySessionStore, RegistrationForm, Session, SessionManager, SessionStore,
    SignInMethod,
};

/// Portal version
pub const PORTAL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default simulated OTP delivery delay
pub const DEFAULT_OTP_DELAY_MS: u64 = 1000;

/// Default time an issued OTP stays usable
pub const DEFAULT_OTP_VALIDITY_SECS: u64 = 300;

/// Default simulated payment processing delay
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 2000;

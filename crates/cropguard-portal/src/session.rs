//! Farmer registration and sign-in sessions
//!
//! Sign-in is a prototype flow: a session is opened for any name and valid
//! mobile number. Passwords and OTP codes are checked for shape only, never
//! against a credential. An OTP stays valid for a limited time and is spent
//! by the registration or sign-in that uses it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cropguard_common::error::SessionError;
use cropguard_common::types::region::{find_district, find_state};
use cropguard_common::{Language, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Digits in a mobile number
pub const MOBILE_DIGITS: usize = 10;

/// Digits in an OTP
pub const OTP_DIGITS: usize = 6;

/// Signed-in farmer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub mobile: String,
    pub created_at: DateTime<Utc>,
}

/// How the farmer proves who they are
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "secret", rename_all = "snake_case")]
pub enum SignInMethod {
    Password(String),
    Otp(String),
}

/// Issued OTP notice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpReceipt {
    pub mobile: String,
    pub sent_at: DateTime<Utc>,
    pub valid_for_secs: u64,
}

/// Sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub mobile: String,
    pub otp: String,
    pub password: String,
    pub state: String,
    pub district: String,
    pub language: Language,
    #[serde(default)]
    pub agree_terms: bool,
}

/// Registered farmer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub id: Uuid,
    pub name: String,
    pub mobile: String,
    pub state: String,
    pub district: String,
    pub language: Language,
    pub registered_at: DateTime<Utc>,
}

/// Keep the digits of a mobile number; exactly ten are required
pub fn normalize_mobile(raw: &str) -> std::result::Result<String, SessionError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != MOBILE_DIGITS {
        return Err(SessionError::InvalidMobile);
    }
    Ok(digits)
}

fn is_valid_otp(code: &str) -> bool {
    let code = code.trim();
    code.len() == OTP_DIGITS && code.chars().all(|c| c.is_ascii_digit())
}

/// Storage backend for open sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session
    async fn insert(&self, session: Session);

    /// Get a session by ID
    async fn get(&self, id: &Uuid) -> Option<Session>;

    /// Remove a session, returning it if it existed
    async fn remove(&self, id: &Uuid) -> Option<Session>;

    /// Number of open sessions
    async fn count(&self) -> usize;
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<Uuid, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    async fn get(&self, id: &Uuid) -> Option<Session> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    async fn remove(&self, id: &Uuid) -> Option<Session> {
        self.sessions.remove(id).map(|(_, session)| session)
    }

    async fn count(&self) -> usize {
        self.sessions.len()
    }
}

/// Registration, sign-in, sign-out and OTP issuing
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    /// Mobile → instant the OTP sent to it expires
    issued_otps: DashMap<String, Instant>,
    /// Mobile → profile
    registrations: DashMap<String, FarmerProfile>,
    otp_delay: Duration,
    otp_validity: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, otp_delay: Duration) -> Self {
        Self {
            store,
            issued_otps: DashMap::new(),
            registrations: DashMap::new(),
            otp_delay,
            otp_validity: Duration::from_secs(crate::DEFAULT_OTP_VALIDITY_SECS),
        }
    }

    /// In-memory manager with the given OTP delay
    pub fn in_memory(otp_delay: Duration) -> Self {
        Self::new(Arc::new(InMemorySessionStore::new()), otp_delay)
    }

    /// Set how long an issued OTP can be used
    pub fn with_otp_validity(mut self, otp_validity: Duration) -> Self {
        self.otp_validity = otp_validity;
        self
    }

    /// Send an OTP to a mobile number
    ///
    /// Delivery is simulated by waiting out the configured delay. Expired
    /// OTPs for any number are dropped here.
    #[instrument(skip(self))]
    pub async fn send_otp(&self, mobile: &str) -> Result<OtpReceipt> {
        let mobile = normalize_mobile(mobile)?;

        tokio::time::sleep(self.otp_delay).await;

        let now = Instant::now();
        self.issued_otps.retain(|_, expires_at| *expires_at > now);
        self.issued_otps
            .insert(mobile.clone(), now + self.otp_validity);
        debug!(%mobile, pending = self.issued_otps.len(), "OTP sent");

        Ok(OtpReceipt {
            mobile,
            sent_at: Utc::now(),
            valid_for_secs: self.otp_validity.as_secs(),
        })
    }

    /// Check an OTP for a normalized mobile number without spending it
    fn check_otp(&self, mobile: &str, code: &str) -> std::result::Result<(), SessionError> {
        let expires_at = self
            .issued_otps
            .get(mobile)
            .map(|entry| *entry.value())
            .ok_or(SessionError::OtpNotRequested)?;
        if expires_at <= Instant::now() {
            return Err(SessionError::OtpExpired);
        }
        if !is_valid_otp(code) {
            return Err(SessionError::InvalidOtp);
        }
        Ok(())
    }

    /// Register a farmer
    ///
    /// Needs an OTP sent to the mobile number, a served state with one of
    /// its districts, and agreement to the terms.
    #[instrument(skip(self, form), fields(mobile = %form.mobile))]
    pub async fn register(&self, form: RegistrationForm) -> Result<FarmerProfile> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingName.into());
        }
        let mobile = normalize_mobile(&form.mobile)?;
        self.check_otp(&mobile, &form.otp)?;
        if form.password.is_empty() {
            return Err(SessionError::MissingPassword.into());
        }
        let state =
            find_state(&form.state).ok_or_else(|| SessionError::UnknownState(form.state.clone()))?;
        let district = find_district(state, &form.district).ok_or_else(|| {
            SessionError::DistrictNotInState {
                state: state.to_string(),
                district: form.district.clone(),
            }
        })?;
        if !form.agree_terms {
            return Err(SessionError::TermsNotAccepted.into());
        }

        let profile = match self.registrations.entry(mobile.clone()) {
            Entry::Occupied(_) => {
                return Err(SessionError::AlreadyRegistered.into())
            }
            Entry::Vacant(slot) => {
                let profile = FarmerProfile {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    mobile: mobile.clone(),
                    state: state.to_string(),
                    district: district.to_string(),
                    language: form.language,
                    registered_at: Utc::now(),
                };
                slot.insert(profile.clone());
                profile
            }
        };
        self.issued_otps.remove(&mobile);
        info!(farmer_id = %profile.id, state, district, "Registered");

        Ok(profile)
    }

    /// Profile registered for a mobile number
    pub fn profile(&self, mobile: &str) -> Option<FarmerProfile> {
        let mobile = normalize_mobile(mobile).ok()?;
        self.registrations
            .get(&mobile)
            .map(|entry| entry.value().clone())
    }

    /// Open a session
    #[instrument(skip(self, method))]
    pub async fn login(&self, name: &str, mobile: &str, method: SignInMethod) -> Result<Session> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingName.into());
        }
        let mobile = normalize_mobile(mobile)?;

        match &method {
            SignInMethod::Password(password) => {
                if password.is_empty() {
                    return Err(SessionError::MissingPassword.into());
                }
            }
            SignInMethod::Otp(code) => {
                self.check_otp(&mobile, code)?;
                self.issued_otps.remove(&mobile);
            }
        }

        let session = Session {
            id: Uuid::new_v4(),
            name: name.to_string(),
            mobile,
            created_at: Utc::now(),
        };
        self.store.insert(session.clone()).await;
        info!(session_id = %session.id, "Signed in");

        Ok(session)
    }

    /// Close a session
    pub async fn logout(&self, id: &Uuid) -> Result<()> {
        match self.store.remove(id).await {
            Some(_) => {
                info!(session_id = %id, "Signed out");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.to_string()).into()),
        }
    }

    /// Look up an open session
    pub async fn current(&self, id: &Uuid) -> Result<Session> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.to_string()).into())
    }

    pub async fn open_sessions(&self) -> usize {
        self.store.count().await
    }

    /// OTPs issued and not yet spent or pruned
    pub fn pending_otps(&self) -> usize {
        self.issued_otps.len()
    }
}

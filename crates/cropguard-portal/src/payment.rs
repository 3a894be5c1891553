//! Premium checkout
//!
//! Payment is simulated: the order total is computed from the plan's listed
//! premium, the configured processing delay is awaited, and a receipt is
//! issued. No gateway is contacted.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cropguard_common::error::PaymentError;
use cropguard_common::{OrderTotal, Result};
use cropguard_quote::compute_order_total_from_display;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::catalog::PlanCatalog;
use crate::session::Session;

/// Banks available for net banking
pub const SUPPORTED_BANKS: [&str; 8] = [
    "State Bank of India",
    "HDFC Bank",
    "ICICI Bank",
    "Axis Bank",
    "Punjab National Bank",
    "Bank of Baroda",
    "Canara Bank",
    "Union Bank of India",
];

/// How the farmer pays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Upi { vpa: String },
    GooglePay,
    PhonePe,
    NetBanking { bank: String },
    BankTransfer,
}

impl PaymentMethod {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PaymentMethod::Upi { .. } => "UPI",
            PaymentMethod::GooglePay => "Google Pay",
            PaymentMethod::PhonePe => "PhonePe",
            PaymentMethod::NetBanking { .. } => "Net Banking",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    /// Check the details the method needs
    pub fn validate(&self) -> std::result::Result<(), PaymentError> {
        match self {
            PaymentMethod::Upi { vpa } if vpa.trim().is_empty() => Err(PaymentError::MissingVpa),
            PaymentMethod::NetBanking { bank } => {
                if SUPPORTED_BANKS.iter().any(|b| b.eq_ignore_ascii_case(bank.trim())) {
                    Ok(())
                } else {
                    Err(PaymentError::UnsupportedBank(bank.clone()))
                }
            }
            _ => Ok(()),
        }
    }
}

/// Proof of a completed (simulated) payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub receipt_id: Uuid,
    pub mobile: String,
    pub plan: String,
    pub order: OrderTotal,
    pub method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
}

/// Checkout for the plans in the catalog
pub struct CheckoutService {
    catalog: Arc<PlanCatalog>,
    processing_delay: Duration,
}

impl CheckoutService {
    pub fn new(catalog: Arc<PlanCatalog>, processing_delay: Duration) -> Self {
        Self {
            catalog,
            processing_delay,
        }
    }

    /// Order total for a plan's listed premium, without paying
    pub fn order_summary(&self, tier_name: &str) -> Result<OrderTotal> {
        let offer = self.catalog.lookup(tier_name)?;
        compute_order_total_from_display(&offer.listed_premium)
    }

    /// Pay for a plan
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn checkout(
        &self,
        session: &Session,
        tier_name: &str,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt> {
        let offer = self.catalog.lookup(tier_name)?;
        method.validate()?;
        let order = compute_order_total_from_display(&offer.listed_premium)?;

        info!(plan = %offer.tier_name, method = method.name(), total = %order.total_amount, "Processing payment");
        tokio::time::sleep(self.processing_delay).await;

        let receipt = PaymentReceipt {
            receipt_id: Uuid::new_v4(),
            mobile: session.mobile.clone(),
            plan: offer.tier_name.clone(),
            order,
            method,
            paid_at: Utc::now(),
        };
        info!(receipt_id = %receipt.receipt_id, "Payment successful");

        Ok(receipt)
    }
}

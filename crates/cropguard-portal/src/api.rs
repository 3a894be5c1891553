//! REST API routes for the portal

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use cropguard_common::error::SessionError;
use cropguard_common::money::{format_rupees, parse_rupees};
use cropguard_common::types::region::{find_state, regions};
use cropguard_common::{
    CalculationInput, ChecklistItem, CropGuardError, CropRate, EligibilityChecklist,
    EligibilityReport, InputError, OrderTotal, PremiumQuote, Region, SUBSIDY_RATE,
};
use cropguard_quote::QuoteService;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;
use uuid::Uuid;

use crate::catalog::{PlanCatalog, PlanOffer};
use crate::config::PortalConfig;
use crate::payment::{CheckoutService, PaymentMethod, PaymentReceipt};
use crate::session::{
    FarmerProfile, OtpReceipt, RegistrationForm, Session, SessionManager, SignInMethod,
};
use crate::PORTAL_VERSION;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<QuoteService>,
    pub catalog: Arc<PlanCatalog>,
    pub sessions: Arc<SessionManager>,
    pub checkout: Arc<CheckoutService>,
}

impl AppState {
    /// Wire up the services described by the config
    pub fn from_config(config: &PortalConfig) -> cropguard_common::Result<Self> {
        let quotes = QuoteService::from_config(&config.quote)?;
        let catalog = Arc::new(PlanCatalog::from_plans(&quotes.tariff().plans));

        Ok(Self {
            quotes: Arc::new(quotes),
            sessions: Arc::new(
                SessionManager::in_memory(config.session.otp_delay())
                    .with_otp_validity(config.session.otp_validity()),
            ),
            checkout: Arc::new(CheckoutService::new(
                catalog.clone(),
                config.checkout.processing_delay(),
            )),
            catalog,
        })
    }
}

/// Error response wrapper
pub struct ApiError(CropGuardError);

impl From<CropGuardError> for ApiError {
    fn from(err: CropGuardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CropGuardError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            CropGuardError::InvalidInput(_)
            | CropGuardError::Session(_)
            | CropGuardError::Payment(_) => StatusCode::BAD_REQUEST,
            other => {
                error!(error = %other, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Decimal from a JSON number or string field
fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct PremiumRequest {
    /// Served state the land is in
    #[serde(default)]
    pub state: Option<String>,
    pub crop: String,
    pub plan: String,
    pub area_acres: Value,
}

#[derive(Debug, Serialize)]
pub struct PremiumResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    pub crop: String,
    pub plan: String,
    pub area_acres: Decimal,
    pub subsidy_rate: Decimal,
    #[serde(flatten)]
    pub quote: PremiumQuote,
    /// Net premium as displayed, e.g. `₹3,000`
    pub net_premium_display: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckedIds {
    pub checked: Vec<String>,
}

/// Ids of the checked items, or one answer per item
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EligibilityRequest {
    Checked(CheckedIds),
    Answers(EligibilityChecklist),
}

#[derive(Debug, Serialize)]
pub struct EligibilityQuestion {
    pub id: &'static str,
    pub item: ChecklistItem,
    pub label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct OrderTotalRequest {
    /// Number, or display string such as `"₹1,200"`
    pub amount: Value,
}

#[derive(Debug, Serialize)]
pub struct OrderTotalResponse {
    #[serde(flatten)]
    pub order: OrderTotal,
    pub tax_display: String,
    pub total_display: String,
}

impl From<OrderTotal> for OrderTotalResponse {
    fn from(order: OrderTotal) -> Self {
        Self {
            tax_display: order.display_tax(),
            total_display: order.display_total(),
            order,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub mobile: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub mobile: String,
    pub password: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub session_id: Uuid,
    pub plan: String,
    pub payment: PaymentMethod,
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

async fn version() -> Json<Value> {
    Json(json!({
        "service": "cropguard-portal",
        "version": PORTAL_VERSION,
        "description": "CropGuard crop insurance self-service portal",
    }))
}

async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropRate>> {
    Json(state.quotes.tariff().crops.iter().cloned().collect())
}

async fn list_plans(State(state): State<AppState>) -> Json<Vec<PlanOffer>> {
    Json(state.catalog.offers().to_vec())
}

async fn list_regions() -> Json<Vec<Region>> {
    Json(regions())
}

async fn eligibility_questions() -> Json<Vec<EligibilityQuestion>> {
    Json(
        ChecklistItem::ALL
            .into_iter()
            .map(|item| EligibilityQuestion {
                id: item.id(),
                item,
                label: item.label(),
            })
            .collect(),
    )
}

async fn plan_order(
    State(state): State<AppState>,
    Path(plan): Path<String>,
) -> ApiResult<OrderTotalResponse> {
    let order = state.checkout.order_summary(&plan)?;
    Ok(Json(order.into()))
}

async fn premium(
    State(state): State<AppState>,
    Json(req): Json<PremiumRequest>,
) -> ApiResult<PremiumResponse> {
    let served_state = req
        .state
        .as_deref()
        .map(|name| find_state(name).ok_or_else(|| InputError::UnknownState(name.to_string())))
        .transpose()
        .map_err(CropGuardError::from)?;
    let area_acres = decimal_from_json(&req.area_acres).ok_or_else(|| {
        CropGuardError::from(InputError::InvalidArea(req.area_acres.to_string()))
    })?;
    let input = CalculationInput::new(req.crop, req.plan, area_acres)?;
    let result = state.quotes.premium_for(&input)?;

    let tariff = state.quotes.tariff();
    let crop = tariff.crops.lookup(&input.crop_name)?.crop_name.clone();
    let plan = tariff.plans.lookup(&input.tier_name)?.tier_name.clone();
    let quote = result.rounded();

    Ok(Json(PremiumResponse {
        state: served_state,
        crop,
        plan,
        area_acres: input.area_acres,
        subsidy_rate: SUBSIDY_RATE,
        net_premium_display: format_rupees(quote.net_premium),
        quote,
    }))
}

async fn eligibility(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<EligibilityReport> {
    let req: EligibilityRequest = serde_json::from_value(body).map_err(|e| {
        CropGuardError::from(InputError::MalformedChecklist(e.to_string()))
    })?;
    let checklist = match req {
        EligibilityRequest::Checked(CheckedIds { checked }) => {
            EligibilityChecklist::from_checked_ids(checked)?
        }
        EligibilityRequest::Answers(checklist) => checklist,
    };
    Ok(Json(state.quotes.eligibility(&checklist)))
}

async fn order_total(
    State(state): State<AppState>,
    Json(req): Json<OrderTotalRequest>,
) -> ApiResult<OrderTotalResponse> {
    let base_amount = match &req.amount {
        Value::String(display) => parse_rupees(display)?,
        other => decimal_from_json(other).ok_or_else(|| {
            CropGuardError::from(InputError::InvalidAmount(other.to_string()))
        })?,
    };
    let order = state.quotes.order_total(base_amount)?;
    Ok(Json(order.into()))
}

async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<OtpRequest>,
) -> ApiResult<OtpReceipt> {
    Ok(Json(state.sessions.send_otp(&req.mobile).await?))
}

async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<FarmerProfile>), ApiError> {
    let profile = state.sessions.register(form).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let method = match req.otp {
        Some(code) => SignInMethod::Otp(code),
        None => SignInMethod::Password(req.password.unwrap_or_default()),
    };
    let session = state.sessions.login(&req.name, &req.mobile, method).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Session> {
    Ok(Json(state.sessions.current(&id).await?))
}

async fn logout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.logout(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<PaymentReceipt> {
    let session = state.sessions.current(&req.session_id).await?;
    let receipt = state
        .checkout
        .checkout(&session, &req.plan, req.payment)
        .await?;
    Ok(Json(receipt))
}

/// Create REST API routes for the portal
pub fn create_router(state: AppState) -> Router {
    // CORS layer to allow frontend connections from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/version", get(version))
        // Tariff and catalog
        .route("/api/v1/crops", get(list_crops))
        .route("/api/v1/plans", get(list_plans))
        .route("/api/v1/plans/:plan/order", get(plan_order))
        .route("/api/v1/regions", get(list_regions))
        // Calculations
        .route("/api/v1/premium", post(premium))
        .route("/api/v1/eligibility", post(eligibility))
        .route("/api/v1/eligibility/questions", get(eligibility_questions))
        .route("/api/v1/order-total", post(order_total))
        // Registration and sign-in
        .route("/api/v1/otp", post(send_otp))
        .route("/api/v1/registrations", post(register))
        .route("/api/v1/sessions", post(login))
        .route("/api/v1/sessions/:id", get(get_session).delete(logout))
        // Checkout
        .route("/api/v1/checkout", post(checkout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

//! Checkout overlay handlers (HTMX).
//!
//! A rejected step renders the overlay again with the error message; the
//! checkout state is unchanged. Only a successful payment fires events,
//! since it empties the cart and changes the rewards balance.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::checkout::{CheckoutError, OTP_SENT_NOTICE, PAYMENT_SUCCESS_NOTICE};
use crate::error::add_breadcrumb;
use crate::shop::Shop;
use crate::state::AppState;

/// HTMX events fired after a successful payment.
pub const PAYMENT_EVENTS: &str = "cart-updated, rewards-updated";

/// Checkout overlay display data.
#[derive(Clone, Default)]
pub struct CheckoutView {
    pub open: bool,
    pub otp_sent: bool,
    pub paid: bool,
    pub phone: String,
    pub otp: String,
    pub total: String,
    pub points_earned: Option<u64>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl CheckoutView {
    /// Snapshot of the shop's checkout session.
    #[must_use]
    pub fn from_shop(shop: &Shop) -> Self {
        let session = shop.checkout_session();
        Self {
            open: session.phase().is_open(),
            otp_sent: session.otp_sent(),
            paid: session.payment_succeeded(),
            phone: session.phone().to_string(),
            otp: session.otp_input().to_string(),
            total: shop.cart().total().display_inr(),
            points_earned: session.receipt().map(|r| r.points_earned.value()),
            error: None,
            notice: None,
        }
    }

    fn with_error(mut self, error: &CheckoutError) -> Self {
        self.error = Some(error.to_string());
        self
    }

    fn with_notice(mut self, notice: &str) -> Self {
        self.notice = Some(notice.to_string());
        self
    }
}

/// Phone number form data.
#[derive(Debug, Deserialize)]
pub struct PhoneForm {
    #[serde(default)]
    pub phone: String,
}

/// OTP form data.
#[derive(Debug, Deserialize)]
pub struct OtpForm {
    #[serde(default)]
    pub otp: String,
}

/// Checkout overlay fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout.html")]
pub struct CheckoutTemplate {
    pub checkout: CheckoutView,
}

fn render(shop: &Shop, outcome: Result<Option<&str>, CheckoutError>) -> CheckoutTemplate {
    let view = CheckoutView::from_shop(shop);
    let checkout = match outcome {
        Ok(Some(notice)) => view.with_notice(notice),
        Ok(None) => view,
        Err(e) => {
            tracing::debug!(error = %e, "Checkout step rejected");
            view.with_error(&e)
        }
    };
    CheckoutTemplate { checkout }
}

/// Open the checkout overlay ("Pay with CRED" / "Buy with CRED").
#[instrument(skip(state))]
pub async fn start(State(state): State<AppState>) -> impl IntoResponse {
    let mut shop = state.shop().await;
    let outcome = shop.start_checkout().map(|()| None);
    if outcome.is_ok() {
        add_breadcrumb("checkout", "Checkout started", None);
    }
    render(&shop, outcome)
}

/// Validate the phone number and issue the mock OTP.
#[instrument(skip(state, form))]
pub async fn send_otp(State(state): State<AppState>, Form(form): Form<PhoneForm>) -> impl IntoResponse {
    let mut shop = state.shop().await;
    let outcome = shop.send_otp(&form.phone).map(|()| Some(OTP_SENT_NOTICE));
    render(&shop, outcome)
}

/// Check the OTP and take the mock payment.
#[instrument(skip(state, form))]
pub async fn verify(State(state): State<AppState>, Form(form): Form<OtpForm>) -> Response {
    let mut shop = state.shop().await;
    match shop.verify_otp(&form.otp) {
        Ok(receipt) => {
            let points = receipt.points_earned.value().to_string();
            add_breadcrumb("checkout", "Payment verified", Some(&[("points_earned", points.as_str())]));
            (
                AppendHeaders([("HX-Trigger", PAYMENT_EVENTS)]),
                render(&shop, Ok(Some(PAYMENT_SUCCESS_NOTICE))),
            )
                .into_response()
        }
        Err(e) => render(&shop, Err(e)).into_response(),
    }
}

/// Close the overlay.
#[instrument(skip(state))]
pub async fn close(State(state): State<AppState>) -> impl IntoResponse {
    let mut shop = state.shop().await;
    shop.close_checkout();
    render(&shop, Ok(None))
}

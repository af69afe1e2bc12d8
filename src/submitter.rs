// Booking submission
// Sends a built BookingRequest to the booking service and sorts the answer into
// redirect / rejected / unreachable. One call per submission, never retried.

use crate::booking::{BookingError, BookingRequest};
use crate::config::{ConfigError, SubmitterConfig};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

pub const FALLBACK_REJECTION_MESSAGE: &str = "Failed to create booking";
pub const CONNECTIVITY_MESSAGE: &str =
    "Could not reach the booking service. Check your connection and try again.";

/// Where the guest goes next: the payment page for the created booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRedirect {
    pub payment_url: String,
    pub booking_id: Option<String>,
}

// Body of the booking service's answer, success or failure
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceResponse {
    payment_url: Option<String>,
    booking_id: Option<serde_json::Value>,
    error: Option<String>,
}

#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, request: &BookingRequest) -> Result<PaymentRedirect, BookingError>;
}

pub struct HttpBookingSubmitter {
    client: reqwest::Client,
    config: SubmitterConfig,
}

impl HttpBookingSubmitter {
    /// The underlying client keeps reqwest's defaults, which means no request timeout.
    pub fn new(config: SubmitterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }
}

#[async_trait]
impl BookingSubmitter for HttpBookingSubmitter {
    async fn submit(&self, request: &BookingRequest) -> Result<PaymentRedirect, BookingError> {
        info!(
            endpoint = %self.config.endpoint_url,
            room = %request.room_type,
            nights = request.nights,
            total_price = request.total_price,
            "Submitting booking"
        );

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Booking service unreachable");
                BookingError::NetworkUnreachable(CONNECTIVITY_MESSAGE.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!(status, error = %e, "Failed to read booking service response");
            BookingError::NetworkUnreachable(CONNECTIVITY_MESSAGE.to_string())
        })?;

        let outcome = classify_response(status, &body);
        match &outcome {
            Ok(redirect) => info!(
                payment_url = %redirect.payment_url,
                booking_id = ?redirect.booking_id,
                "Booking accepted"
            ),
            Err(e) => warn!(status, error = %e, "Booking rejected"),
        }
        outcome
    }
}

/// Interprets an HTTP answer from the booking service.
///
/// A 2xx answer must carry `paymentUrl`; anything else is a rejection whose message
/// is the body's `error` field, or [`FALLBACK_REJECTION_MESSAGE`] when the body has none
/// or cannot be parsed.
pub fn classify_response(status: u16, body: &str) -> Result<PaymentRedirect, BookingError> {
    let parsed: ServiceResponse = serde_json::from_str(body).unwrap_or_default();

    if (200..300).contains(&status) {
        if let Some(payment_url) = parsed.payment_url.filter(|url| !url.is_empty()) {
            return Ok(PaymentRedirect {
                payment_url,
                booking_id: parsed.booking_id.and_then(booking_id_text),
            });
        }
    }

    Err(BookingError::ServerRejected {
        status,
        message: parsed
            .error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| FALLBACK_REJECTION_MESSAGE.to_string()),
    })
}

// The service sends numeric ids; accept strings as well
fn booking_id_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(id) => Some(id),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

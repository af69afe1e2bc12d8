// Booking form controller
// Owns the draft for the lifetime of the booking section and drives one submission at a time.

use crate::booking::{BookingDraft, BookingError, BookingRequestBuilder, Quote};
use crate::catalog::RoomCatalog;
use crate::submitter::{BookingSubmitter, PaymentRedirect};
use std::sync::Arc;
use tracing::{debug, info};

// Per-submission state: Idle -> Sending -> Redirecting | Rejected | Unreachable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Redirecting(String),
    Rejected(String),
    Unreachable(String),
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Redirecting(_)
                | SubmissionState::Rejected(_)
                | SubmissionState::Unreachable(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Toast shown to the guest after pressing "Book".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn from_outcome(outcome: &Result<PaymentRedirect, BookingError>) -> Self {
        match outcome {
            Ok(_) => Notification {
                level: NotificationLevel::Success,
                title: "Booking created".to_string(),
                description: "Redirecting to the payment page".to_string(),
            },
            Err(BookingError::ValidationIncomplete { .. }) => Notification {
                level: NotificationLevel::Error,
                title: "Error".to_string(),
                description: "Please fill in all fields".to_string(),
            },
            Err(BookingError::ServerRejected { message, .. }) => Notification {
                level: NotificationLevel::Error,
                title: "Error".to_string(),
                description: message.clone(),
            },
            Err(BookingError::NetworkUnreachable(message)) => Notification {
                level: NotificationLevel::Error,
                title: "Connection error".to_string(),
                description: message.clone(),
            },
            Err(BookingError::PriceOverflow { .. }) => Notification {
                level: NotificationLevel::Error,
                title: "Error".to_string(),
                description: "Please check the selected dates".to_string(),
            },
        }
    }
}

pub struct BookingForm<S: BookingSubmitter> {
    draft: BookingDraft,
    catalog: Arc<RoomCatalog>,
    submitter: S,
    state: SubmissionState,
}

impl<S: BookingSubmitter> BookingForm<S> {
    pub fn new(catalog: Arc<RoomCatalog>, submitter: S) -> Self {
        Self {
            draft: BookingDraft::new(),
            catalog,
            submitter,
            state: SubmissionState::Idle,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn quote(&self) -> Option<Quote> {
        BookingRequestBuilder::new(&self.catalog).quote(&self.draft)
    }

    /// Validates the draft and, if complete, sends it. A draft that fails to build
    /// (incomplete, or a total out of range) never reaches the network and leaves
    /// the form in `Idle`. The draft is left as is
    /// in every case so the guest can correct it and try again.
    pub async fn submit(&mut self) -> Result<PaymentRedirect, BookingError> {
        let request = match BookingRequestBuilder::new(&self.catalog).build(&self.draft) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Submission blocked by validation");
                self.state = SubmissionState::Idle;
                return Err(e);
            }
        };

        self.state = SubmissionState::Sending;
        let outcome = self.submitter.submit(&request).await;

        self.state = match &outcome {
            Ok(redirect) => SubmissionState::Redirecting(redirect.payment_url.clone()),
            Err(BookingError::ServerRejected { message, .. }) => {
                SubmissionState::Rejected(message.clone())
            }
            Err(BookingError::NetworkUnreachable(message)) => {
                SubmissionState::Unreachable(message.clone())
            }
            Err(BookingError::ValidationIncomplete { .. } | BookingError::PriceOverflow { .. }) => {
                SubmissionState::Idle
            }
        };
        info!(state = ?self.state, "Booking submission finished");

        outcome
    }
}

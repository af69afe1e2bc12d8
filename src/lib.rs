// Booking flow for the hotel site: from form input to the payment redirect

pub mod booking;
pub mod catalog;
pub mod config;
pub mod flow;
pub mod submitter;

// Re-export key types for convenience
pub use booking::{
    count_nights, BookingDraft, BookingError, BookingRequest, BookingRequestBuilder, DraftField,
    Quote,
};
pub use catalog::{CatalogError, RoomCatalog, RoomOption};
pub use config::{ConfigError, SubmitterConfig};
pub use flow::{BookingForm, Notification, NotificationLevel, SubmissionState};
pub use submitter::{classify_response, BookingSubmitter, HttpBookingSubmitter, PaymentRedirect};

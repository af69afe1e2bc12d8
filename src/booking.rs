// Booking request construction
// Turns the guest's form input into the payload the booking service expects.

use crate::catalog::{RoomCatalog, RoomOption};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use tracing::debug;

// Everything that can go wrong between pressing "Book" and being sent to the payment page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Booking form is incomplete, missing: {}", list_fields(.missing))]
    ValidationIncomplete { missing: Vec<DraftField> },

    #[error("Booking rejected by server ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkUnreachable(String),

    #[error("Total price out of range: {nights} nights at {nightly_price}")]
    PriceOverflow { nightly_price: i64, nights: i64 },
}

fn list_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// Required form fields, in the order the form shows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    CheckIn,
    CheckOut,
    RoomType,
    GuestName,
    GuestEmail,
    GuestPhone,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DraftField::CheckIn => "check-in date",
            DraftField::CheckOut => "check-out date",
            DraftField::RoomType => "room type",
            DraftField::GuestName => "guest name",
            DraftField::GuestEmail => "guest email",
            DraftField::GuestPhone => "guest phone",
        };
        f.write_str(label)
    }
}

/// In-progress form state. Starts empty and is filled in one field at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    /// Display name of the selected room
    pub room_type: String,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_guest_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.guest_name = name.into();
        self
    }

    pub fn set_guest_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.guest_email = email.into();
        self
    }

    pub fn set_guest_phone(&mut self, phone: impl Into<String>) -> &mut Self {
        self.guest_phone = phone.into();
        self
    }

    pub fn set_room_type(&mut self, room: impl Into<String>) -> &mut Self {
        self.room_type = room.into();
        self
    }

    pub fn set_check_in(&mut self, at: DateTime<Utc>) -> &mut Self {
        self.check_in = Some(at);
        self
    }

    pub fn set_check_out(&mut self, at: DateTime<Utc>) -> &mut Self {
        self.check_out = Some(at);
        self
    }

    /// Sets both dates from calendar days, each anchored at UTC midnight.
    pub fn set_stay_dates(&mut self, check_in: NaiveDate, check_out: NaiveDate) -> &mut Self {
        self.check_in = Some(check_in.and_time(NaiveTime::MIN).and_utc());
        self.check_out = Some(check_out.and_time(NaiveTime::MIN).and_utc());
        self
    }

    /// Required fields that are not filled in yet. A room name that is not in
    /// the catalog counts as missing.
    pub fn missing_fields(&self, catalog: &RoomCatalog) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.check_in.is_none() {
            missing.push(DraftField::CheckIn);
        }
        if self.check_out.is_none() {
            missing.push(DraftField::CheckOut);
        }
        if catalog.find_by_name(&self.room_type).is_none() {
            missing.push(DraftField::RoomType);
        }
        if self.guest_name.is_empty() {
            missing.push(DraftField::GuestName);
        }
        if self.guest_email.is_empty() {
            missing.push(DraftField::GuestEmail);
        }
        if self.guest_phone.is_empty() {
            missing.push(DraftField::GuestPhone);
        }
        missing
    }
}

/// Validated payload sent to the booking service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub room_type: String,
    #[serde(serialize_with = "serialize_instant")]
    pub check_in: DateTime<Utc>,
    #[serde(serialize_with = "serialize_instant")]
    pub check_out: DateTime<Utc>,
    pub total_price: i64,
    pub nights: i64,
}

// 2024-06-01T00:00:00.000Z
fn serialize_instant<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl BookingRequest {
    /// Confirmation text shown to the guest before they leave for the payment page.
    pub fn summary(&self) -> String {
        format!(
            "Booking:\nCheck-in: {}\nCheck-out: {}\nRoom: {}\nNights: {}\nTotal: {} ₽",
            self.check_in.format("%d.%m.%Y"),
            self.check_out.format("%d.%m.%Y"),
            self.room_type,
            self.nights,
            self.total_price
        )
    }
}

/// Price preview for the currently selected room and dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub nights: i64,
    pub nightly_price: i64,
    pub total_price: i64,
}

/// Number of nights between two instants: any started day counts as a full night.
/// Zero or negative when check-out is not after check-in.
pub fn count_nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let span = check_out - check_in;
    // num_days truncates toward zero, which is already the ceiling for negative spans
    let whole_days = span.num_days();
    if span > TimeDelta::days(whole_days) {
        whole_days + 1
    } else {
        whole_days
    }
}

pub struct BookingRequestBuilder<'a> {
    catalog: &'a RoomCatalog,
}

impl<'a> BookingRequestBuilder<'a> {
    pub fn new(catalog: &'a RoomCatalog) -> Self {
        Self { catalog }
    }

    pub fn build(&self, draft: &BookingDraft) -> Result<BookingRequest, BookingError> {
        let missing = draft.missing_fields(self.catalog);
        let (Some(check_in), Some(check_out), Some(room), true) = (
            draft.check_in,
            draft.check_out,
            self.catalog.find_by_name(&draft.room_type),
            missing.is_empty(),
        ) else {
            debug!(?missing, "Booking draft is incomplete");
            return Err(BookingError::ValidationIncomplete { missing });
        };

        let quote = price_stay(room, check_in, check_out)?;
        debug!(
            room = %room.name,
            nights = quote.nights,
            total_price = quote.total_price,
            "Built booking request"
        );

        Ok(BookingRequest {
            guest_name: draft.guest_name.clone(),
            guest_email: draft.guest_email.clone(),
            guest_phone: draft.guest_phone.clone(),
            room_type: room.name.clone(),
            check_in,
            check_out,
            total_price: quote.total_price,
            nights: quote.nights,
        })
    }

    /// Preview the price once a room and both dates are chosen; guest details are not needed.
    /// `None` also when the total does not fit.
    pub fn quote(&self, draft: &BookingDraft) -> Option<Quote> {
        let room = self.catalog.find_by_name(&draft.room_type)?;
        price_stay(room, draft.check_in?, draft.check_out?).ok()
    }
}

fn price_stay(
    room: &RoomOption,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> Result<Quote, BookingError> {
    let nights = count_nights(check_in, check_out);
    let total_price = room
        .nightly_price
        .checked_mul(nights)
        .ok_or(BookingError::PriceOverflow {
            nightly_price: room.nightly_price,
            nights,
        })?;

    Ok(Quote {
        nights,
        nightly_price: room.nightly_price,
        total_price,
    })
}

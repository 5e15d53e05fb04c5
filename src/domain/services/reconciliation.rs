use crate::domain::models::booking::{Booking, BookingStatus, PaymentStatus};
use crate::domain::models::payment::PaymentOutcome;

/// What a gateway result means for a given booking. Both the notify webhook
/// and the manual refresh path go through this one decision, never through
/// redirect query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Payment captured: booking becomes confirmed/paid.
    ConfirmPayment { trans_id: Option<String> },
    /// Attempt failed: payment axis flips to failed, booking stays pending
    /// so the user can retry.
    RecordFailure,
    /// The same result was already applied. Absorb without writing.
    AlreadySettled,
    /// The result conflicts with a terminal booking (cancelled, completed,
    /// refunded, or a failure arriving after capture). Absorb and log.
    Ignored,
}

pub fn reconcile(booking: &Booking, outcome: &PaymentOutcome) -> Transition {
    if outcome.is_success() {
        match booking.payment_status {
            PaymentStatus::Paid | PaymentStatus::Refunded => Transition::AlreadySettled,
            PaymentStatus::Pending | PaymentStatus::Failed => {
                match booking.status {
                    BookingStatus::Cancelled | BookingStatus::Completed => Transition::Ignored,
                    BookingStatus::Pending | BookingStatus::Confirmed => Transition::ConfirmPayment {
                        trans_id: outcome.trans_id.clone(),
                    },
                }
            }
        }
    } else {
        match booking.payment_status {
            PaymentStatus::Pending => Transition::RecordFailure,
            PaymentStatus::Failed => Transition::AlreadySettled,
            PaymentStatus::Paid | PaymentStatus::Refunded => Transition::Ignored,
        }
    }
}

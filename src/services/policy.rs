//! Booking transition authorization policy.
//!
//! One table consulted by the booking state machine instead of per-handler
//! role checks. The actor here is the caller's *relationship to the booking*
//! (already resolved against ownership facts), not their global role.

use crate::models::BookingStatus;

/// Caller's relationship to a specific booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The customer who owns the booking.
    Customer,
    /// The vendor the booking is placed against.
    Vendor,
    Admin,
}

/// Whether `actor` may move a booking from `from` to `to`.
///
/// Customers may only cancel their own pending bookings. Vendors confirm
/// pending bookings and complete confirmed ones. Admins are unrestricted,
/// which includes re-opening terminal states; no wallet reversal happens on
/// such moves.
pub fn can_transition(actor: Actor, from: BookingStatus, to: BookingStatus) -> bool {
    match actor {
        Actor::Admin => true,
        Actor::Customer => from == BookingStatus::Pending && to == BookingStatus::Cancelled,
        Actor::Vendor => matches!(
            (from, to),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
        ),
    }
}

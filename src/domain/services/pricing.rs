use chrono::NaiveDate;
use crate::domain::models::room::Room;
use crate::error::AppError;

pub const SERVICE_FEE: i64 = 200_000;
pub const TAX: i64 = 350_000;

pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Quoted at creation time and persisted on the booking, so later price
/// changes on the room never touch an agreed amount.
pub fn total_price(room_price: i64, check_in: NaiveDate, check_out: NaiveDate, room_count: i32) -> i64 {
    room_price * nights(check_in, check_out) * room_count as i64 + SERVICE_FEE + TAX
}

pub fn validate_stay(
    room: &Room,
    check_in: NaiveDate,
    check_out: NaiveDate,
    adult_count: i32,
    child_count: i32,
    room_count: i32,
) -> Result<(), AppError> {
    if check_out <= check_in {
        return Err(AppError::Validation("Check-out date must be after check-in date".into()));
    }
    if adult_count < 1 {
        return Err(AppError::Validation("At least one adult is required".into()));
    }
    if child_count < 0 {
        return Err(AppError::Validation("Child count cannot be negative".into()));
    }
    if room_count < 1 {
        return Err(AppError::Validation("At least one room is required".into()));
    }
    if adult_count + child_count > room.capacity * room_count {
        return Err(AppError::Validation("Guest count exceeds room capacity".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::room::{NewRoomParams, Room};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn room(price: i64, capacity: i32) -> Room {
        Room::new(NewRoomParams {
            name: "Deluxe".into(),
            room_type: "deluxe".into(),
            bed_type: "king".into(),
            price,
            capacity,
            amenities: vec![],
            images: vec![],
            description: None,
        })
    }

    #[test]
    fn test_total_price_two_nights() {
        // 1,000,000 x 2 nights + 200,000 + 350,000
        let total = total_price(1_000_000, date("2025-06-01"), date("2025-06-03"), 1);
        assert_eq!(total, 2_550_000);
    }

    #[test]
    fn test_total_price_scales_with_room_count() {
        let total = total_price(500_000, date("2025-06-01"), date("2025-06-04"), 2);
        assert_eq!(total, 500_000 * 3 * 2 + SERVICE_FEE + TAX);
    }

    #[test]
    fn test_rejects_inverted_and_zero_night_stays() {
        let r = room(1_000_000, 2);
        assert!(validate_stay(&r, date("2025-06-03"), date("2025-06-01"), 1, 0, 1).is_err());
        assert!(validate_stay(&r, date("2025-06-01"), date("2025-06-01"), 1, 0, 1).is_err());
        assert!(validate_stay(&r, date("2025-06-01"), date("2025-06-02"), 1, 0, 1).is_ok());
    }

    #[test]
    fn test_rejects_capacity_overflow() {
        let r = room(1_000_000, 2);
        // 2 adults + 1 child over a single room of capacity 2
        assert!(validate_stay(&r, date("2025-06-01"), date("2025-06-03"), 2, 1, 1).is_err());
        // same party fits across two rooms
        assert!(validate_stay(&r, date("2025-06-01"), date("2025-06-03"), 2, 1, 2).is_ok());
    }

    #[test]
    fn test_rejects_missing_adult() {
        let r = room(1_000_000, 2);
        assert!(validate_stay(&r, date("2025-06-01"), date("2025-06-03"), 0, 1, 1).is_err());
    }
}

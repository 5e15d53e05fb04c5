use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub available: bool,
}

use planora_shared::ClockTime;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

#[derive(
    EnumString, Display, VariantArray, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq,
)]
#[strum(serialize_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// A booked appointment, as resolved by the booking API.
///
/// The planning views never mutate appointments; they only project them onto
/// the day/hour grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub service_name: String,
    pub date: Date,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub staff_id: Option<String>,
    pub status: AppointmentStatus,
    pub price_cents: Option<u32>,
}

/// Reference data from the staff directory, used for grouping and coloring.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffMember {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub color: String,
    pub specialties: Vec<String>,
}

impl StaffMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

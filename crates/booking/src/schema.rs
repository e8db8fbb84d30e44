use std::str::FromStr;

use planora_scheduling::{Appointment, AppointmentStatus, StaffMember};
use planora_shared::{ClockTime, validate};
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;
use validator::Validate;

use crate::BookingError;

pub const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Appointment shape on the booking API wire. Field names follow the API's
/// camelCase convention; everything is validated and parsed into domain types
/// before it leaves this module.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub client_name: String,
    #[validate(length(min = 1))]
    pub service_name: String,
    pub appointment_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub staff_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub price: Option<f64>,
}

impl AppointmentPayload {
    pub fn into_domain(self) -> Result<Appointment, BookingError> {
        self.validate()
            .map_err(|err| invalid(&self.id, "appointment", err))?;

        let date = Date::parse(&self.appointment_date, DATE_FORMAT)
            .map_err(|err| invalid(&self.id, "appointmentDate", err))?;
        let start_time = ClockTime::from_str(&self.start_time)
            .map_err(|err| invalid(&self.id, "startTime", err))?;
        let end_time = ClockTime::from_str(&self.end_time)
            .map_err(|err| invalid(&self.id, "endTime", err))?;
        let status = AppointmentStatus::from_str(&self.status)
            .map_err(|err| invalid(&self.id, "status", err))?;
        let price_cents = self
            .price
            .map(|price| {
                if !price.is_finite() || price < 0.0 {
                    return Err(invalid(&self.id, "price", "negative or non-finite"));
                }

                Ok((price * 100.0).round() as u32)
            })
            .transpose()?;

        Ok(Appointment {
            id: self.id,
            client_name: self.client_name,
            service_name: self.service_name,
            date,
            start_time,
            end_time,
            staff_id: self.staff_id,
            status,
            price_cents,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayload {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(custom(function = "validate::hex_color"))]
    pub color: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl StaffPayload {
    pub fn into_domain(self) -> Result<StaffMember, BookingError> {
        self.validate()
            .map_err(|err| invalid(&self.id, "staff member", err))?;

        Ok(StaffMember {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            color: self.color,
            specialties: self.specialties,
        })
    }
}

/// A slot the user picked on the planning grid; creation itself is owned by
/// the booking API.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub date: Date,
    pub start_time: ClockTime,
    pub staff_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAppointmentBody {
    pub appointment_date: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
}

impl From<&NewAppointment> for CreateAppointmentBody {
    fn from(value: &NewAppointment) -> Self {
        Self {
            appointment_date: value
                .date
                .format(DATE_FORMAT)
                .expect("formatting a date as [year]-[month]-[day] cannot fail"),
            start_time: value.start_time.to_string(),
            staff_id: value.staff_id.clone(),
        }
    }
}

fn invalid(id: &str, field: &str, err: impl ToString) -> BookingError {
    BookingError::InvalidPayload(format!("{field} of {id:?}: {}", err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn payload(json: serde_json::Value) -> AppointmentPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn parses_a_well_formed_appointment() {
        let appointment = payload(serde_json::json!({
            "id": "apt-1",
            "clientName": "Nora Blanc",
            "serviceName": "brushing",
            "appointmentDate": "2025-01-27",
            "startTime": "14:30",
            "endTime": "15:15",
            "staffId": "s1",
            "status": "confirmed",
            "price": 42.5,
        }))
        .into_domain()
        .unwrap();

        assert_eq!(appointment.date, date!(2025 - 01 - 27));
        assert_eq!(appointment.start_time.hour(), 14);
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(appointment.price_cents, Some(4250));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let appointment = payload(serde_json::json!({
            "id": "apt-2",
            "clientName": "Nora Blanc",
            "serviceName": "brushing",
            "appointmentDate": "2025-01-27",
            "startTime": "9:00",
            "endTime": "9:45",
            "status": "pending",
        }))
        .into_domain()
        .unwrap();

        assert_eq!(appointment.staff_id, None);
        assert_eq!(appointment.price_cents, None);
    }

    #[test]
    fn malformed_start_time_is_a_typed_error() {
        let err = payload(serde_json::json!({
            "id": "apt-3",
            "clientName": "Nora Blanc",
            "serviceName": "brushing",
            "appointmentDate": "2025-01-27",
            "startTime": "1430",
            "endTime": "15:15",
            "status": "confirmed",
        }))
        .into_domain()
        .unwrap_err();

        assert!(matches!(err, BookingError::InvalidPayload(_)));
        assert!(err.to_string().contains("startTime"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = payload(serde_json::json!({
            "id": "apt-4",
            "clientName": "Nora Blanc",
            "serviceName": "brushing",
            "appointmentDate": "2025-01-27",
            "startTime": "14:30",
            "endTime": "15:15",
            "status": "double_booked",
        }))
        .into_domain()
        .unwrap_err();

        assert!(matches!(err, BookingError::InvalidPayload(_)));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = payload(serde_json::json!({
            "id": "apt-5",
            "clientName": "Nora Blanc",
            "serviceName": "brushing",
            "appointmentDate": "2025-01-27",
            "startTime": "14:30",
            "endTime": "15:15",
            "status": "confirmed",
            "price": -1.0,
        }))
        .into_domain()
        .unwrap_err();

        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn staff_color_must_be_a_hex_color() {
        let err = serde_json::from_value::<StaffPayload>(serde_json::json!({
            "id": "s1",
            "firstName": "Ines",
            "lastName": "Morel",
            "color": "purple",
        }))
        .unwrap()
        .into_domain()
        .unwrap_err();

        assert!(matches!(err, BookingError::InvalidPayload(_)));
    }

    #[test]
    fn create_body_uses_the_wire_field_names() {
        let body = CreateAppointmentBody::from(&NewAppointment {
            date: date!(2025 - 01 - 27),
            start_time: ClockTime::new(14, 0).unwrap(),
            staff_id: None,
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"appointmentDate": "2025-01-27", "startTime": "14:00"})
        );
    }
}

use std::time::Duration;

use planora_scheduling::{Appointment, StaffMember};
use serde::de::DeserializeOwned;
use time::Date;

use crate::{AppointmentPayload, BookingError, CreateAppointmentBody, NewAppointment, StaffPayload};
use crate::schema::DATE_FORMAT;

/// Typed client for the platform's booking API.
///
/// The API owns appointment and staff data; this service only reads it and
/// forwards creations. Transient failures are retried with a linear backoff
/// so a planning page does not go blank on a single dropped connection.
#[derive(Clone)]
pub struct BookingClient {
    http: reqwest::Client,
    base_url: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl BookingClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        retry_attempts: u32,
    ) -> Result<Self, BookingError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            retry_attempts: retry_attempts.max(1),
            retry_delay: Duration::from_millis(250),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appointments whose date falls within `from..=to`.
    #[tracing::instrument(skip(self))]
    pub async fn list_appointments(
        &self,
        from: Date,
        to: Date,
    ) -> Result<Vec<Appointment>, BookingError> {
        let query = [
            ("from", format_date(from)),
            ("to", format_date(to)),
        ];
        let payloads: Vec<AppointmentPayload> = self.get_json("/api/appointments", &query).await?;

        payloads
            .into_iter()
            .map(AppointmentPayload::into_domain)
            .collect()
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, BookingError> {
        let payloads: Vec<StaffPayload> = self.get_json("/api/staff", &[]).await?;

        payloads.into_iter().map(StaffPayload::into_domain).collect()
    }

    /// Forwards an empty-slot booking to the API. Not retried: creation is a
    /// write, and the idempotency key already covers client-side resends.
    #[tracing::instrument(skip(self, input), fields(date = %input.date))]
    pub async fn create_appointment(
        &self,
        input: &NewAppointment,
    ) -> Result<Appointment, BookingError> {
        let response = self
            .http
            .post(format!("{}/api/appointments", self.base_url))
            .header("Idempotency-Key", ulid::Ulid::new().to_string())
            .json(&CreateAppointmentBody::from(input))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookingError::Status(status.as_u16()));
        }

        let payload: AppointmentPayload = response.json().await?;
        payload.into_domain()
    }

    /// Cheap upstream liveness probe for the readiness endpoint.
    pub async fn ping(&self) -> Result<(), BookingError> {
        let response = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookingError::Status(status.as_u16()));
        }

        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BookingError> {
        let url = format!("{}{path}", self.base_url);
        let mut attempt = 1;

        loop {
            match self.get_json_once(&url, query).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.retry_attempts => {
                    tracing::warn!(
                        url = %url,
                        attempt,
                        err = %err,
                        "booking api request failed, retrying"
                    );
                    tokio::time::sleep(self.retry_delay * attempt).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, BookingError> {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookingError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .expect("formatting a date as [year]-[month]-[day] cannot fail")
}

use time::Date;

use crate::Appointment;

/// The inclusive hour axis of the planning grid, e.g. `8..=20`.
pub fn hour_range(start: u8, end: u8) -> Vec<u8> {
    (start..=end).collect()
}

/// The day × hour planning grid.
///
/// Building the grid is a pure projection: for a fixed set of appointments,
/// days and hours it always produces the same buckets, and the union of all
/// buckets is exactly the subset of appointments whose date falls on one of
/// the days and whose start hour falls within the hour axis. Appointments
/// within a bucket keep the order of the source list.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    days: Vec<Date>,
    hours: Vec<u8>,
    buckets: Vec<Vec<Vec<Appointment>>>,
}

impl SlotGrid {
    pub fn build(
        appointments: &[Appointment],
        days: &[Date],
        hours: &[u8],
        staff_id: Option<&str>,
    ) -> Self {
        let mut buckets = vec![vec![Vec::new(); hours.len()]; days.len()];

        for appointment in appointments {
            if let Some(staff_id) = staff_id
                && appointment.staff_id.as_deref() != Some(staff_id)
            {
                continue;
            }

            let Some(day_index) = days.iter().position(|day| *day == appointment.date) else {
                continue;
            };
            let Some(hour_index) = hours
                .iter()
                .position(|hour| *hour == appointment.start_time.hour())
            else {
                continue;
            };

            buckets[day_index][hour_index].push(appointment.clone());
        }

        Self {
            days: days.to_vec(),
            hours: hours.to_vec(),
            buckets,
        }
    }

    pub fn days(&self) -> &[Date] {
        &self.days
    }

    pub fn hours(&self) -> &[u8] {
        &self.hours
    }

    /// The appointments of one (day, hour) cell. Out-of-grid coordinates are
    /// an empty bucket, not an error.
    pub fn bucket(&self, day: Date, hour: u8) -> &[Appointment] {
        let Some(day_index) = self.days.iter().position(|d| *d == day) else {
            return &[];
        };
        let Some(hour_index) = self.hours.iter().position(|h| *h == hour) else {
            return &[];
        };

        &self.buckets[day_index][hour_index]
    }

    pub fn cell(&self, day_index: usize, hour_index: usize) -> &[Appointment] {
        self.buckets
            .get(day_index)
            .and_then(|row| row.get(hour_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of bucketed appointments.
    pub fn len(&self) -> usize {
        self.buckets
            .iter()
            .flat_map(|row| row.iter())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Buckets appointments by calendar day only, for the month view. The same
/// ordering rule applies: source-list order within a day.
pub fn bucket_by_day(appointments: &[Appointment], days: &[Date]) -> Vec<Vec<Appointment>> {
    let mut buckets = vec![Vec::new(); days.len()];

    for appointment in appointments {
        if let Some(day_index) = days.iter().position(|day| *day == appointment.date) {
            buckets[day_index].push(appointment.clone());
        }
    }

    buckets
}

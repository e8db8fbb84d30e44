use time::{Date, Duration, Month, OffsetDateTime, Weekday};
use time_tz::{ToTimezone, timezones};

/// Returns the first day of the week containing `date`.
///
/// The week-start weekday is a parameter, never a constant: Monday-first
/// salons (fr locale) and Sunday-first salons both go through here.
pub fn start_of_week(date: Date, week_start: Weekday) -> Date {
    let days_since_start = (7 + date.weekday().number_days_from_monday()
        - week_start.number_days_from_monday())
        % 7;

    date - Duration::days(days_since_start as i64)
}

/// Today's calendar date in the salon's timezone. Unknown timezone names fall
/// back to UTC.
pub fn today_in(tz: &str) -> Date {
    let mut now = OffsetDateTime::now_utc();

    if let Some(tz) = timezones::get_by_name(tz) {
        now = now.to_timezone(tz);
    }

    now.date()
}

/// The anchor of the currently displayed week.
///
/// The anchor only moves through the explicit navigation operations; the day
/// sequence is derived from it on every call rather than cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekNavigator {
    anchor: Date,
    week_start: Weekday,
}

impl WeekNavigator {
    /// Anchors on the week containing `date`.
    pub fn containing(date: Date, week_start: Weekday) -> Self {
        Self {
            anchor: start_of_week(date, week_start),
            week_start,
        }
    }

    /// Anchors on the week containing today, in the salon's timezone.
    pub fn today(tz: &str, week_start: Weekday) -> Self {
        Self::containing(today_in(tz), week_start)
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    pub fn next(self) -> Self {
        Self {
            anchor: self.anchor + Duration::weeks(1),
            ..self
        }
    }

    pub fn prev(self) -> Self {
        Self {
            anchor: self.anchor - Duration::weeks(1),
            ..self
        }
    }

    /// The 7 consecutive days of the displayed week, starting at the anchor.
    pub fn days(&self) -> [Date; 7] {
        let mut days = [self.anchor; 7];

        for (offset, day) in days.iter_mut().enumerate() {
            *day = self.anchor + Duration::days(offset as i64);
        }

        days
    }

    pub fn last_day(&self) -> Date {
        self.anchor + Duration::days(6)
    }

    pub fn contains(&self, date: Date) -> bool {
        date >= self.anchor && date <= self.last_day()
    }
}

/// The week rows of a month view: every week that overlaps the month,
/// including leading and trailing days of the adjacent months.
pub fn month_weeks(year: i32, month: Month, week_start: Weekday) -> Vec<[Date; 7]> {
    let first = Date::from_calendar_date(year, month, 1)
        .expect("the first of a month is always a valid date");
    let last = Date::from_calendar_date(year, month, time::util::days_in_year_month(year, month))
        .expect("days_in_year_month returns a valid day");

    let mut weeks = Vec::with_capacity(6);
    let mut navigator = WeekNavigator::containing(first, week_start);

    while navigator.anchor() <= last {
        weeks.push(navigator.days());
        navigator = navigator.next();
    }

    weeks
}

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Days added after the upcoming Friday for weekly packs.
const WEEKLY_BUFFER_DAYS: i64 = 2;
const FRIDAY_FROM_SUNDAY: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    #[default]
    Weekly,
    BiWeekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Weekly, Frequency::BiWeekly, Frequency::Monthly];

    /// Form value of the frequency `<select>`.
    pub fn value(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Monthly => "monthly",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Every 2 Weeks",
            Frequency::Monthly => "Monthly",
        }
    }

    pub fn price_suffix(self) -> &'static str {
        match self {
            Frequency::Weekly => "/ week",
            Frequency::BiWeekly => "/ 2 weeks",
            Frequency::Monthly => "/ month",
        }
    }

    /// Simulated schedule. Weekly packs ship the Friday after today (a week
    /// out when today is Friday) plus a buffer; monthly packs clamp to the end
    /// of a shorter month.
    pub fn next_delivery(self, today: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => {
                let weekday = i64::from(today.weekday().num_days_from_sunday());
                let mut until_friday = (FRIDAY_FROM_SUNDAY - weekday + 7) % 7;
                if until_friday == 0 {
                    until_friday = 7;
                }
                today + Duration::days(until_friday + WEEKLY_BUFFER_DAYS)
            }
            Frequency::BiWeekly => today + Duration::days(14),
            Frequency::Monthly => today.checked_add_months(Months::new(1)).unwrap_or(today),
        }
    }
}

/// en-US short style, e.g. "Fri, Oct 23".
pub fn format_delivery_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_lands_after_next_friday() {
        // Monday -> Friday the 23rd + 2
        assert_eq!(Frequency::Weekly.next_delivery(date(2026, 10, 19)), date(2026, 10, 25));
        // Friday itself counts as a week away
        assert_eq!(Frequency::Weekly.next_delivery(date(2026, 10, 23)), date(2026, 11, 1));
        assert_eq!(Frequency::Weekly.next_delivery(date(2026, 10, 24)), date(2026, 11, 1));
        assert_eq!(Frequency::Weekly.next_delivery(date(2026, 10, 25)), date(2026, 11, 1));
    }

    #[test]
    fn bi_weekly_is_two_weeks_out() {
        assert_eq!(Frequency::BiWeekly.next_delivery(date(2026, 12, 25)), date(2027, 1, 8));
    }

    #[test]
    fn monthly_advances_one_calendar_month() {
        assert_eq!(Frequency::Monthly.next_delivery(date(2026, 10, 19)), date(2026, 11, 19));
        assert_eq!(Frequency::Monthly.next_delivery(date(2026, 1, 31)), date(2026, 2, 28));
        assert_eq!(Frequency::Monthly.next_delivery(date(2026, 12, 15)), date(2027, 1, 15));
    }

    #[test]
    fn select_values_round_trip() {
        for frequency in Frequency::ALL {
            assert_eq!(Frequency::from_value(frequency.value()), Some(frequency));
        }
        assert_eq!(Frequency::from_value("daily"), None);
    }

    #[test]
    fn formats_like_en_us_short_date() {
        assert_eq!(format_delivery_date(date(2026, 10, 25)), "Sun, Oct 25");
        assert_eq!(format_delivery_date(date(2026, 11, 1)), "Sun, Nov 1");
    }
}

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Coarse daypart the user intends to eat ramen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    #[default]
    Now,
    Lunch,
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Now, TimeSlot::Lunch, TimeSlot::Night];

    /// Wire string used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Now => "now",
            TimeSlot::Lunch => "lunch",
            TimeSlot::Night => "night",
        }
    }

    /// Label shown on the board chips
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Now => "今すぐ",
            TimeSlot::Lunch => "昼",
            TimeSlot::Night => "夜",
        }
    }

    /// Helper: convert input from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "now" | "n" => Some(TimeSlot::Now),
            "lunch" | "l" => Some(TimeSlot::Lunch),
            // the backend historically called this slot "dinner"
            "night" | "dinner" | "d" => Some(TimeSlot::Night),
            _ => None,
        }
    }

    /// When a status set at `now` for this slot stops being shown to friends.
    ///
    /// `Now` lasts one hour, `Lunch` ends at 14:00 and `Night` at 22:00,
    /// rolling over to the next day when that time has already passed.
    pub fn expires_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> DateTime<Tz> {
        let cutoff = match self {
            TimeSlot::Now => return now + Duration::hours(1),
            TimeSlot::Lunch => NaiveTime::from_hms_opt(14, 0, 0),
            TimeSlot::Night => NaiveTime::from_hms_opt(22, 0, 0),
        };

        let tz = now.timezone();
        let today = cutoff
            .map(|t| now.date_naive().and_time(t))
            .and_then(|naive| tz.from_local_datetime(&naive).earliest());

        match today {
            Some(at) if at >= now => at,
            Some(at) => at + Duration::days(1),
            None => now + Duration::hours(1),
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = crate::errors::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::from_code(s).ok_or_else(|| crate::errors::AppError::InvalidTimeSlot(s.to_string()))
    }
}

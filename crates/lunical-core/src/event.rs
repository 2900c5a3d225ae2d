//! Expansion output structures, consumed once by the external serializer.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A single expanded calendar event. Carries everything the serializer
/// needs; has no identity beyond `uid_seed` and its position in the output
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Absolute start, normalized to UTC from the entry's local wall-clock
    /// time and timezone.
    pub start: DateTime<Utc>,
    pub duration_hours: u32,
    pub title: String,
    pub description: String,
    pub alarms: Vec<Alarm>,
    pub attendees: Vec<Attendee>,
    pub calendar_name: String,
    /// Stable per-occurrence identity, fed into deterministic UID
    /// derivation by the serializer.
    pub uid_seed: String,
}

impl EventRecord {
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::hours(i64::from(self.duration_hours))
    }
}

/// A display reminder firing a number of days before the event start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alarm {
    pub days_before: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    pub email: String,
    pub display_name: String,
}

impl Attendee {
    /// The display name is the local part of the email address.
    pub fn from_email(email: &str) -> Self {
        let display_name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendee_display_name_is_local_part() {
        let attendee = Attendee::from_email("sam.lee@example.com");
        assert_eq!(attendee.display_name, "sam.lee");
        assert_eq!(attendee.email, "sam.lee@example.com");
    }

    #[test]
    fn test_attendee_without_at_sign_keeps_full_string() {
        let attendee = Attendee::from_email("not-an-email");
        assert_eq!(attendee.display_name, "not-an-email");
    }

    #[test]
    fn test_event_end_adds_duration() {
        let start = "2027-05-19T02:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let record = EventRecord {
            start,
            duration_hours: 2,
            title: "t".to_string(),
            description: "d".to_string(),
            alarms: vec![],
            attendees: vec![],
            calendar_name: "c".to_string(),
            uid_seed: "s".to_string(),
        };
        assert_eq!(record.end().to_rfc3339(), "2027-05-19T04:00:00+00:00");
    }
}

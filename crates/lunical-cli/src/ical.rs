//! iCalendar serialization bridge.
//!
//! The expansion engine hands over finished [`EventRecord`]s; everything
//! about the wire format (line folding, text escaping) belongs to the `ics`
//! crate. UIDs are derived deterministically from each record's `uid_seed`
//! so regenerating a calendar yields byte-identical output, and DTSTAMP is
//! pinned to the event start for the same reason.

use chrono::{DateTime, Utc};
use ics::components::{Parameter, Property};
use ics::properties::{Attendee, Description, DtEnd, DtStart, Summary, Trigger};
use ics::{escape_text, Alarm, Event, ICalendar};
use uuid::Uuid;

use lunical_core::event::EventRecord;

const PRODID: &str = "-//lunical//lunical 0.1.0//EN";

fn format_utc(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Serializes the expanded event records into iCalendar text.
pub fn write_ical(
    records: &[EventRecord],
    calendar_name: &str,
    timezone: &str,
) -> anyhow::Result<String> {
    let mut calendar = ICalendar::new("2.0", PRODID);
    calendar.push(Property::new("CALSCALE", "GREGORIAN"));
    calendar.push(Property::new("X-WR-CALNAME", escape_text(calendar_name.to_string())));
    calendar.push(Property::new("X-WR-TIMEZONE", timezone.to_string()));

    for record in records {
        let uid = Uuid::new_v5(&Uuid::NAMESPACE_OID, record.uid_seed.as_bytes());
        let dtstart = format_utc(record.start);

        let mut event = Event::new(uid.to_string(), dtstart.clone());
        event.push(DtStart::new(dtstart));
        event.push(DtEnd::new(format_utc(record.end())));
        event.push(Summary::new(escape_text(record.title.clone())));
        event.push(Description::new(escape_text(record.description.clone())));

        for alarm in &record.alarms {
            event.add_alarm(Alarm::display(
                Trigger::new(format!("-P{}D", alarm.days_before)),
                Description::new(escape_text(alarm.description.clone())),
            ));
        }

        for attendee in &record.attendees {
            let mut property = Attendee::new(format!("mailto:{}", attendee.email));
            property.add(Parameter::new("CN", attendee.display_name.clone()));
            property.add(Parameter::new("ROLE", "REQ-PARTICIPANT"));
            event.push(property);
        }

        calendar.add_event(event);
    }

    let mut buffer = Vec::new();
    calendar.write(&mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunical_core::event::{Alarm as CoreAlarm, Attendee as CoreAttendee};

    fn test_record() -> EventRecord {
        EventRecord {
            start: "2027-05-19T02:00:00Z".parse().unwrap(),
            duration_hours: 2,
            title: "sam has been alive for 10000 days! (age: 27.38)".to_string(),
            description: "day 10000 milestone".to_string(),
            alarms: vec![CoreAlarm {
                days_before: 1,
                description: "Reminder: milestone".to_string(),
            }],
            attendees: vec![CoreAttendee::from_email("sam@example.com")],
            calendar_name: "test".to_string(),
            uid_seed: "sam:integer_days:10000".to_string(),
        }
    }

    #[test]
    fn test_write_ical_structure() {
        let text = write_ical(&[test_record()], "test", "Asia/Shanghai").unwrap();
        assert!(text.contains("BEGIN:VCALENDAR"));
        assert!(text.contains("X-WR-CALNAME:test"));
        assert!(text.contains("BEGIN:VEVENT"));
        assert!(text.contains("DTSTART:20270519T020000Z"));
        assert!(text.contains("DTEND:20270519T040000Z"));
        assert!(text.contains("BEGIN:VALARM"));
        assert!(text.contains("TRIGGER:-P1D"));
        assert!(text.contains("mailto:sam@example.com"));
        assert!(text.contains("END:VCALENDAR"));
    }

    #[test]
    fn test_write_ical_is_deterministic() {
        let records = [test_record()];
        let first = write_ical(&records, "test", "Asia/Shanghai").unwrap();
        let second = write_ical(&records, "test", "Asia/Shanghai").unwrap();
        assert_eq!(first, second);
    }
}

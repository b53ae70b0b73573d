//! iCalendar (RFC 5545) rendering of Eventbrite events.

use chrono::{DateTime, Utc};

use crate::models::EventRecord;

/// Fixed product identifier for generated calendars.
pub const PRODID: &str = "-//DaylightPirates//EB-to-iCAL//EN";

/// Calendar name used when the newest event has no organizer.
pub const DEFAULT_CALENDAR_NAME: &str = "Eventbrite Events";

/// Maximum physical line length in octets, CRLF included.
const MAX_LINE_OCTETS: usize = 75;

/// Content octets available on the first physical line of a folded line.
const FIRST_LINE_OCTETS: usize = MAX_LINE_OCTETS - 2;

/// Content octets on continuation lines, which also carry a leading space.
const CONTINUATION_OCTETS: usize = FIRST_LINE_OCTETS - 1;

/// Escapes a TEXT value.
///
/// Every byte outside printable ASCII is dropped, except `\n`. Backslash, comma,
/// semicolon and newline are then escaped with a backslash.
#[must_use]
pub fn escape(value: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(value.len() + 10);
    for &b in value {
        match b {
            b'\\' => result.extend_from_slice(b"\\\\"),
            b',' => result.extend_from_slice(b"\\,"),
            b';' => result.extend_from_slice(b"\\;"),
            b'\n' => result.extend_from_slice(b"\\n"),
            0x20..=0x7e => result.push(b),
            _ => {}
        }
    }
    result
}

/// Folds a logical line into CRLF-terminated physical lines.
///
/// No physical line exceeds 75 octets including its CRLF. Continuation lines
/// start with a single space.
#[must_use]
pub fn fold(line: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(line.len() + (line.len() / CONTINUATION_OCTETS + 1) * 3);

    let first = line.len().min(FIRST_LINE_OCTETS);
    result.extend_from_slice(&line[..first]);
    result.extend_from_slice(b"\r\n");

    for chunk in line[first..].chunks(CONTINUATION_OCTETS) {
        result.push(b' ');
        result.extend_from_slice(chunk);
        result.extend_from_slice(b"\r\n");
    }

    result
}

/// Strips `-` and `:` from an ISO-8601 timestamp (`2024-05-01T18:00:00Z` → `20240501T180000Z`).
#[must_use]
pub fn compact_timestamp(timestamp: &str) -> String {
    timestamp.chars().filter(|c| *c != '-' && *c != ':').collect()
}

/// Accumulates folded content lines for one calendar document.
#[derive(Debug, Default)]
pub struct CalendarWriter {
    buf: Vec<u8>,
}

impl CalendarWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a line verbatim, without escaping.
    pub fn raw(&mut self, line: &str) {
        self.buf.extend_from_slice(&fold(line.as_bytes()));
    }

    /// Writes `NAME:value` with the value escaped.
    pub fn property(&mut self, name: &str, value: &str) {
        let mut line = Vec::with_capacity(name.len() + 1 + value.len());
        line.extend_from_slice(name.as_bytes());
        line.push(b':');
        line.extend_from_slice(&escape(value.as_bytes()));
        self.buf.extend_from_slice(&fold(&line));
    }

    /// Writes `NAME:value1;value2`, escaping each value separately.
    pub fn structured_property(&mut self, name: &str, values: &[&str]) {
        let mut line = Vec::with_capacity(name.len() + 1);
        line.extend_from_slice(name.as_bytes());
        line.push(b':');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                line.push(b';');
            }
            line.extend_from_slice(&escape(value.as_bytes()));
        }
        self.buf.extend_from_slice(&fold(&line));
    }

    /// Consumes the writer and returns the document bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Renders events as a VCALENDAR document, newest `published` first.
///
/// `now` is stamped into every event's `CREATED` property.
pub fn render(mut events: Vec<EventRecord>, now: DateTime<Utc>) -> Vec<u8> {
    // Raw string comparison; Eventbrite timestamps share one UTC format.
    events.sort_by(|a, b| b.published.cmp(&a.published));

    let created = now.format("%Y%m%dT%H%M%SZ").to_string();

    let mut writer = CalendarWriter::new();
    writer.raw("BEGIN:VCALENDAR");
    writer.raw("VERSION:2.0");
    writer.raw(&format!("PRODID:{}", PRODID));

    if let Some(newest) = events.first() {
        write_calendar_name(&mut writer, newest);
    }

    for event in &events {
        write_event(&mut writer, event, &created);
    }

    writer.raw("END:VCALENDAR");
    writer.finish()
}

fn write_calendar_name(writer: &mut CalendarWriter, event: &EventRecord) {
    let organizer = event
        .organizer
        .as_ref()
        .and_then(|o| o.name.as_deref().map(|name| (name, o.url.as_deref())));

    match organizer {
        Some((name, url)) => {
            writer.property("X-WR-CALNAME", &format!("{} - {}", name, DEFAULT_CALENDAR_NAME));
            if let Some(url) = url {
                writer.property("X-ORIGINAL-URL", url);
            }
        }
        None => writer.raw(&format!("X-WR-CALNAME:{}", DEFAULT_CALENDAR_NAME)),
    }
}

fn write_event(writer: &mut CalendarWriter, event: &EventRecord, created: &str) {
    let stamp = compact_timestamp(event.published());

    writer.raw("BEGIN:VEVENT");
    writer.property("DTSTAMP", &stamp);
    writer.property("DTSTART", &compact_timestamp(event.start_utc()));
    writer.property("DTEND", &compact_timestamp(event.end_utc()));
    writer.property("SUMMARY", event.title());
    writer.property(
        "DESCRIPTION",
        &format!("{}\n\n{}", event.url(), event.description_text()),
    );
    writer.property("CREATED", created);

    if let Some(venue) = &event.venue {
        if let Some((lat, lon)) = venue.coordinates() {
            writer.structured_property("GEO", &[lat, lon]);
        }
        if let Some(location) = venue.location() {
            writer.property("LOCATION", &location);
        }
    }

    writer.property("URL", event.url());
    writer.property("LAST-MODIFIED", &stamp);
    writer.property("UID", event.id());
    writer.raw("END:VEVENT");
}

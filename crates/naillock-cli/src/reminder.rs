//! Daily calendar reminder as an iCalendar (RFC 5545) document.

use std::ops::RangeInclusive;

use chrono::NaiveDateTime;

/// Accepted repeat counts.
pub const REMINDER_DAYS: RangeInclusive<i64> = 7..=365;

const PRODID: &str = "-//NailLock//EN";
const DESCRIPTION: &str = "Do the actions. Log today. Keep it moving.";

/// One `VEVENT` starting at `start` (floating local time) and repeating
/// daily `count` times.
pub fn daily_ics(title: &str, start: NaiveDateTime, count: u32) -> String {
  let stamp = start.format("%Y%m%dT%H%M%S").to_string();

  let lines = [
    "BEGIN:VCALENDAR".to_owned(),
    "VERSION:2.0".to_owned(),
    format!("PRODID:{PRODID}"),
    "BEGIN:VEVENT".to_owned(),
    format!("UID:naillock-{stamp}@naillock"),
    format!("DTSTAMP:{stamp}"),
    format!("DTSTART:{stamp}"),
    format!("RRULE:FREQ=DAILY;COUNT={count}"),
    format!("SUMMARY:{}", escape_text(title)),
    format!("DESCRIPTION:{}", escape_text(DESCRIPTION)),
    "END:VEVENT".to_owned(),
    "END:VCALENDAR".to_owned(),
  ];

  lines.iter().map(|l| fold_line(l)).collect()
}

/// TEXT value escaping: `\`, `,`, `;` and newlines.
fn escape_text(s: &str) -> String {
  s.replace('\\', "\\\\")
    .replace(',', "\\,")
    .replace(';', "\\;")
    .replace("\r\n", "\\n")
    .replace('\n', "\\n")
}

/// Terminate with CRLF, folding at 75 octets. Continuation lines start with
/// a single space and never split a UTF-8 sequence.
fn fold_line(s: &str) -> String {
  if s.len() <= 75 {
    return format!("{s}\r\n");
  }

  let mut out = String::with_capacity(s.len() + s.len() / 74 * 3 + 2);
  let mut pos = 0;
  let mut first = true;
  while pos < s.len() {
    let limit = if first { 75 } else { 74 };
    let end = if pos + limit >= s.len() {
      s.len()
    } else {
      let mut e = pos + limit;
      while e > pos && !s.is_char_boundary(e) {
        e -= 1;
      }
      e
    };

    if !first {
      out.push(' ');
    }
    out.push_str(&s[pos..end]);
    out.push_str("\r\n");
    pos = end;
    first = false;
  }
  out
}

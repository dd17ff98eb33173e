use chrono::{NaiveDate, NaiveDateTime};

/// Labels describing how a city's wall clock relates to the viewer's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeTimestamp {
  /// "Today", "Tomorrow", "Yesterday" or a short date like "Oct 18".
  pub relative: String,
  /// e.g. "1 hour 30 minutes ahead" or "same time".
  pub full: String,
  /// e.g. "+1:30" or "-2HRS".
  pub short: String,
}

/// Labels `date` relative to `today`.
#[must_use]
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
  match (date - today).num_days() {
    0 => "Today".to_string(),
    1 => "Tomorrow".to_string(),
    -1 => "Yesterday".to_string(),
    _ => date.format("%b %-d").to_string(),
  }
}

fn plural(count: i64, singular: &str, plural: &str) -> String {
  if count == 1 {
    format!("{count} {singular}")
  } else {
    format!("{count} {plural}")
  }
}

/// Describes `target` relative to `reference`.
///
/// Both are wall-clock times; `today` is the viewer's real current date and
/// only drives the date label.
#[must_use]
pub fn relative_timestamp(
  reference: NaiveDateTime,
  target: NaiveDateTime,
  today: NaiveDate,
) -> RelativeTimestamp {
  let relative = date_label(target.date(), today);

  // div_euclid floors, so negative halves round toward +inf like positive ones.
  let diff_minutes = ((target - reference).num_milliseconds() + 30_000).div_euclid(60_000);
  let abs_minutes = diff_minutes.abs();
  let hours = abs_minutes / 60;
  let minutes = abs_minutes % 60;

  let mut parts = Vec::with_capacity(2);
  if hours > 0 {
    parts.push(plural(hours, "hour", "hours"));
  }
  if minutes > 0 {
    parts.push(plural(minutes, "minute", "minutes"));
  }
  let mut full = if parts.is_empty() {
    "same time".to_string()
  } else {
    parts.join(" ")
  };

  let sign = match diff_minutes.signum() {
    1 => {
      full.push_str(" ahead");
      '+'
    }
    -1 => {
      full.push_str(" behind");
      '-'
    }
    _ => '±',
  };

  let short = if minutes > 0 {
    format!("{sign}{hours}:{minutes:02}")
  } else if hours == 1 {
    format!("{sign}{hours}HR")
  } else {
    format!("{sign}{hours}HRS")
  };

  RelativeTimestamp {
    relative,
    full,
    short,
  }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::{
  relative::{RelativeTimestamp, relative_timestamp},
  time_of_day::TimeOfDay,
};

/// A named place and its time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
  pub name: &'static str,
  pub zone: Tz,
}

/// The cities shown by the widget, top to bottom.
pub const CITIES: &[City] = &[
  City {
    name: "Portland",
    zone: chrono_tz::America::Los_Angeles,
  },
  City {
    name: "New York",
    zone: chrono_tz::America::New_York,
  },
  City {
    name: "Reykjavik",
    zone: chrono_tz::Atlantic::Reykjavik,
  },
  City {
    name: "London",
    zone: chrono_tz::Europe::London,
  },
  City {
    name: "Helsinki",
    zone: chrono_tz::Europe::Helsinki,
  },
  City {
    name: "Singapore",
    zone: chrono_tz::Asia::Singapore,
  },
];

/// Everything a row displays for one city at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CityReading {
  pub city: City,
  pub local: DateTime<Tz>,
  pub time_of_day: TimeOfDay,
  pub stamp: RelativeTimestamp,
}

impl CityReading {
  /// Reads `city` at `instant`.
  ///
  /// `reference` is the viewer's wall clock at the same instant and `today`
  /// the viewer's real date.
  #[must_use]
  pub fn new(
    city: City,
    instant: DateTime<Utc>,
    reference: NaiveDateTime,
    today: NaiveDate,
  ) -> Self {
    let local = instant.with_timezone(&city.zone);
    Self {
      city,
      time_of_day: TimeOfDay::from_hour(local.hour()),
      stamp: relative_timestamp(reference, local.naive_local(), today),
      local,
    }
  }

  /// Clock face text, e.g. "9:05".
  #[must_use]
  pub fn clock_text(&self) -> String {
    self.local.format("%-I:%M").to_string()
  }

  /// "AM" or "PM".
  #[must_use]
  pub fn meridiem(&self) -> String {
    self.local.format("%p").to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn reads_singapore_ahead_of_london() {
    // Singapore has no DST; London is on GMT in January.
    let instant = Utc.with_ymd_and_hms(2024, 1, 15, 22, 30, 0).unwrap();
    let london = CITIES.iter().find(|c| c.name == "London").unwrap();
    let singapore = CITIES.iter().find(|c| c.name == "Singapore").unwrap();
    let reference = instant.with_timezone(&london.zone).naive_local();
    let today = reference.date();

    let reading = CityReading::new(*singapore, instant, reference, today);
    assert_eq!(reading.clock_text(), "6:30");
    assert_eq!(reading.meridiem(), "AM");
    assert_eq!(reading.time_of_day, TimeOfDay::Sunrise);
    assert_eq!(reading.stamp.relative, "Tomorrow");
    assert_eq!(reading.stamp.full, "8 hours ahead");
    assert_eq!(reading.stamp.short, "+8HRS");

    let home = CityReading::new(*london, instant, reference, today);
    assert_eq!(home.stamp.full, "same time");
    assert_eq!(home.time_of_day, TimeOfDay::Night);
  }

  #[test]
  fn portland_is_behind_new_york() {
    let instant = Utc.with_ymd_and_hms(2024, 7, 1, 18, 0, 0).unwrap();
    let reference = instant.with_timezone(&CITIES[1].zone).naive_local();
    let reading = CityReading::new(CITIES[0], instant, reference, reference.date());
    assert_eq!(reading.stamp.full, "3 hours behind");
    assert_eq!(reading.clock_text(), "11:00");
    assert_eq!(reading.meridiem(), "AM");
    assert_eq!(reading.time_of_day, TimeOfDay::Day);
  }
}

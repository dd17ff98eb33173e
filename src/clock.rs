use std::{cell::Cell, rc::Rc, time::Duration};

use chrono::{DateTime, Utc};

/// How often the displayed instant is refreshed.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Source of the current instant.
pub trait Clock {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
  now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
  #[must_use]
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      now: Rc::new(Cell::new(now)),
    }
  }

  pub fn advance(&self, by: chrono::Duration) {
    self.now.set(self.now.get() + by);
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    self.now.get()
  }
}

/// Keeps a "current instant" that is re-read from a [`Clock`] once per
/// [`TICK_INTERVAL`] of frame time.
pub struct Ticker {
  clock: Box<dyn Clock>,
  current: DateTime<Utc>,
  last_tick: Option<f64>,
}

impl Ticker {
  #[must_use]
  pub fn new(clock: Box<dyn Clock>) -> Self {
    let current = clock.now();
    Self {
      clock,
      current,
      last_tick: None,
    }
  }

  /// The instant read at the last tick.
  #[must_use]
  pub fn current(&self) -> DateTime<Utc> {
    self.current
  }

  /// Refreshes the current instant if a tick is due at frame time `now`.
  ///
  /// Returns whether a tick happened.
  pub fn tick(&mut self, now: f64) -> bool {
    let due = self
      .last_tick
      .is_none_or(|last| now - last >= TICK_INTERVAL.as_secs_f64());
    if due {
      self.current = self.clock.now();
      self.last_tick = Some(now);
    }
    due
  }
}

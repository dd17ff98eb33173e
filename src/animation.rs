use std::f64::consts::PI;

/// Sine ease-in-out for normalized progress `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_sine(t: f64) -> f64 {
  -((PI * t).cos() - 1.0) / 2.0
}

/// One sampled step of a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
  pub value: f32,
  /// Set on the last frame only.
  pub finished: bool,
}

/// Eased interpolation of a scalar, driven by frame timestamps in seconds.
///
/// Dropping or replacing a tween cancels it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
  from: f32,
  to: f32,
  duration: f64,
  started_at: f64,
  done: bool,
}

impl Tween {
  #[must_use]
  pub fn new(from: f32, to: f32, duration: f64, now: f64) -> Self {
    Self {
      from,
      to,
      duration,
      started_at: now,
      done: false,
    }
  }

  /// Progress in `[0, 1]` at `now`.
  #[must_use]
  pub fn progress(&self, now: f64) -> f64 {
    if self.duration <= 0.0 {
      return 1.0;
    }
    ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
  }

  /// Samples the tween at `now`.
  ///
  /// Returns `None` once the finishing frame has been handed out, so
  /// completion is observed exactly once.
  #[allow(clippy::cast_possible_truncation)]
  pub fn advance(&mut self, now: f64) -> Option<TweenFrame> {
    if self.done {
      return None;
    }
    let progress = self.progress(now);
    let eased = ease_in_out_sine(progress) as f32;
    let finished = progress >= 1.0;
    self.done = finished;
    Some(TweenFrame {
      value: if finished {
        self.to
      } else {
        self.from + (self.to - self.from) * eased
      },
      finished,
    })
  }

  #[must_use]
  pub fn is_finished(&self) -> bool {
    self.done
  }
}

use chrono::{DateTime, Duration, Utc};
use egui::Key;
use log::debug;

use crate::{
  animation::Tween,
  offset::{
    KEY_STEP_MINUTES, MAX_OFFSET_MINUTES, clamp_offset, offset_to_pixel, pixel_to_offset,
  },
};

/// Duration of the snap-back animation in seconds.
pub const RESET_DURATION: f64 = 0.3;

/// Reading direction of the surrounding layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TextDirection {
  #[default]
  Ltr,
  Rtl,
}

/// What the slider is currently doing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SliderState {
  #[default]
  Idle,
  Dragging,
  /// Snapping back to zero. Offset and pixel position animate together.
  Resetting { offset: Tween, pixel: Tween },
}

/// Owns the peek offset and keeps the slider position consistent with it.
///
/// Pixel positions are relative to the left edge of the container.
#[derive(Debug, Clone, Default)]
pub struct PeekController {
  offset: i32,
  slider_x: Option<f32>,
  width: Option<f32>,
  state: SliderState,
  tooltip_visible: bool,
  direction: TextDirection,
}

impl PeekController {
  #[must_use]
  pub fn new(direction: TextDirection) -> Self {
    Self {
      direction,
      ..Self::default()
    }
  }

  /// Offset from now in minutes.
  #[must_use]
  pub fn offset(&self) -> i32 {
    self.offset
  }

  /// Measured slider position, `None` until the container has been laid out.
  #[must_use]
  pub fn slider_x(&self) -> Option<f32> {
    self.slider_x
  }

  /// Where to draw the slider: the measured position or the centre.
  #[must_use]
  pub fn display_x(&self) -> f32 {
    self
      .slider_x
      .unwrap_or_else(|| self.width.map_or(0.0, |w| w / 2.0))
  }

  #[must_use]
  pub fn state(&self) -> &SliderState {
    &self.state
  }

  #[must_use]
  pub fn is_dragging(&self) -> bool {
    self.state == SliderState::Dragging
  }

  #[must_use]
  pub fn is_resetting(&self) -> bool {
    matches!(self.state, SliderState::Resetting { .. })
  }

  #[must_use]
  pub fn is_tooltip_visible(&self) -> bool {
    self.tooltip_visible
  }

  /// The instant being previewed.
  #[must_use]
  pub fn peek_instant(&self, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(i64::from(self.offset))
  }

  /// Offset as laid out left to right.
  fn visual(&self, offset: i32) -> i32 {
    match self.direction {
      TextDirection::Ltr => offset,
      TextDirection::Rtl => -offset,
    }
  }

  fn pixel_for(&self, offset: i32, width: f32) -> f32 {
    offset_to_pixel(self.visual(offset), width, MAX_OFFSET_MINUTES)
  }

  /// Records the container width on mount and resize.
  ///
  /// The slider position is recomputed from the offset when the width changed
  /// or the position is unmeasured. Non-positive widths count as unmounted.
  pub fn refresh_layout(&mut self, width: f32) {
    if width <= 0.0 {
      self.width = None;
      return;
    }
    let changed = self.width != Some(width);
    self.width = Some(width);
    if self.is_resetting() || (!changed && self.slider_x.is_some()) {
      return;
    }
    self.slider_x = Some(self.pixel_for(self.offset, width));
  }

  /// Moves the offset to the pointer at `x`, clamped to the container.
  fn place_at(&mut self, x: f32, width: f32) {
    let x = x.clamp(0.0, width);
    let visual = clamp_offset(pixel_to_offset(x, width, MAX_OFFSET_MINUTES));
    self.offset = self.visual(visual);
    self.slider_x = Some(offset_to_pixel(visual, width, MAX_OFFSET_MINUTES));
  }

  /// Pointer pressed on the slider handle.
  pub fn press_handle(&mut self) {
    if self.is_resetting() {
      return;
    }
    self.state = SliderState::Dragging;
    self.tooltip_visible = true;
    debug!("Peek slider drag started at offset {}", self.offset);
  }

  /// Pointer pressed somewhere in the container: jump there and keep dragging.
  pub fn press_at(&mut self, x: f32) {
    let Some(width) = self.width else { return };
    if self.is_resetting() {
      return;
    }
    self.place_at(x, width);
    self.state = SliderState::Dragging;
    self.tooltip_visible = true;
    debug!("Peek slider jumped to offset {}", self.offset);
  }

  /// Pointer moved to `x` while the button is held.
  pub fn drag_to(&mut self, x: f32) {
    let Some(width) = self.width else { return };
    if !self.is_dragging() {
      return;
    }
    self.place_at(x, width);
  }

  /// Pointer released anywhere.
  pub fn release(&mut self) {
    if self.is_dragging() {
      self.state = SliderState::Idle;
      debug!("Peek slider released at offset {}", self.offset);
    }
  }

  /// Handles a key press on the focused slider. Returns whether it was used.
  pub fn key_down(&mut self, key: Key) -> bool {
    let Some(width) = self.width else {
      return false;
    };
    if self.is_resetting() {
      return false;
    }
    let offset = match key {
      Key::Home => -MAX_OFFSET_MINUTES,
      Key::End => MAX_OFFSET_MINUTES,
      Key::ArrowUp | Key::ArrowRight => clamp_offset(self.offset + KEY_STEP_MINUTES),
      Key::ArrowDown | Key::ArrowLeft => clamp_offset(self.offset - KEY_STEP_MINUTES),
      _ => return false,
    };
    self.offset = offset;
    self.slider_x = Some(self.pixel_for(offset, width));
    self.tooltip_visible = true;
    true
  }

  /// Starts animating back to offset zero at frame time `now`.
  ///
  /// A reset already in flight is replaced by the new one.
  pub fn reset(&mut self, now: f64) {
    let Some(width) = self.width else { return };
    #[allow(clippy::cast_precision_loss)]
    let from_offset = self.offset as f32;
    let from_x = self
      .slider_x
      .unwrap_or_else(|| self.pixel_for(self.offset, width));
    let to_x = self.pixel_for(0, width);
    self.state = SliderState::Resetting {
      offset: Tween::new(from_offset, 0.0, RESET_DURATION, now),
      pixel: Tween::new(from_x, to_x, RESET_DURATION, now),
    };
    debug!("Peek slider resetting from offset {}", self.offset);
  }

  /// Advances a running reset to frame time `now`.
  ///
  /// Returns whether the reset is still running and needs another frame.
  #[allow(clippy::cast_possible_truncation)]
  pub fn animate(&mut self, now: f64) -> bool {
    let SliderState::Resetting { offset, pixel } = &mut self.state else {
      return false;
    };
    if let Some(frame) = offset.advance(now) {
      self.offset = frame.value.round() as i32;
    }
    if let Some(frame) = pixel.advance(now) {
      self.slider_x = Some(frame.value);
    }
    if !(offset.is_finished() && pixel.is_finished()) {
      return true;
    }

    self.state = SliderState::Idle;
    self.offset = 0;
    self.tooltip_visible = false;
    // Recomputed from the offset on the next layout pass.
    self.slider_x = None;
    debug!("Peek slider reset finished");
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use assert_approx_eq::assert_approx_eq;
  use chrono::TimeZone;
  use rstest::rstest;

  use crate::city::{CITIES, CityReading};

  const WIDTH: f32 = 800.0;

  fn mounted(direction: TextDirection) -> PeekController {
    let mut controller = PeekController::new(direction);
    controller.refresh_layout(WIDTH);
    controller
  }

  #[test]
  fn starts_idle_at_the_centre() {
    let controller = mounted(TextDirection::Ltr);
    assert_eq!(controller.offset(), 0);
    assert_eq!(controller.state(), &SliderState::Idle);
    assert!(!controller.is_tooltip_visible());
    assert_approx_eq!(controller.slider_x().unwrap(), WIDTH / 2.0);
  }

  #[test]
  fn unmeasured_falls_back_to_centre() {
    let mut controller = PeekController::new(TextDirection::Ltr);
    assert_eq!(controller.slider_x(), None);
    controller.press_at(10.0);
    assert_eq!(controller.offset(), 0);
    assert!(!controller.key_down(Key::End));
    controller.reset(0.0);
    assert_eq!(controller.state(), &SliderState::Idle);
  }

  #[test]
  fn drag_to_right_edge_peeks_a_day_ahead() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 41, 0).unwrap();
    let mut controller = mounted(TextDirection::Ltr);

    controller.press_handle();
    assert!(controller.is_dragging());
    assert!(controller.is_tooltip_visible());
    controller.drag_to(WIDTH + 250.0);
    controller.release();

    assert_eq!(controller.offset(), MAX_OFFSET_MINUTES);
    assert_eq!(controller.state(), &SliderState::Idle);
    assert_approx_eq!(controller.slider_x().unwrap(), WIDTH);

    let peek = controller.peek_instant(now);
    let reference = peek.naive_utc();
    for city in CITIES {
      let reading = CityReading::new(*city, peek, reference, now.date_naive());
      let expected = (now + Duration::hours(24)).with_timezone(&city.zone);
      assert_eq!(reading.local, expected, "{}", city.name);
    }
  }

  #[test]
  fn drag_requires_a_press() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.drag_to(0.0);
    assert_eq!(controller.offset(), 0);
  }

  #[test]
  fn drag_to_left_edge() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.press_handle();
    controller.drag_to(-40.0);
    assert_eq!(controller.offset(), -MAX_OFFSET_MINUTES);
    assert_approx_eq!(controller.slider_x().unwrap(), 0.0);
  }

  #[test]
  fn click_jumps_and_keeps_dragging() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.press_at(600.0);
    assert_eq!(controller.offset(), 720);
    assert!(controller.is_dragging());
    assert!(controller.is_tooltip_visible());
    controller.drag_to(500.0);
    assert_eq!(controller.offset(), 360);
  }

  #[test]
  fn rtl_mirrors_the_pointer() {
    let mut controller = mounted(TextDirection::Rtl);
    controller.press_at(600.0);
    assert_eq!(controller.offset(), -720);
    assert_approx_eq!(controller.slider_x().unwrap(), 600.0);

    assert!(controller.key_down(Key::End));
    assert_eq!(controller.offset(), MAX_OFFSET_MINUTES);
    assert_approx_eq!(controller.slider_x().unwrap(), 0.0);
  }

  #[rstest]
  #[case(Key::ArrowRight, 30)]
  #[case(Key::ArrowUp, 30)]
  #[case(Key::ArrowLeft, -30)]
  #[case(Key::ArrowDown, -30)]
  #[case(Key::Home, -MAX_OFFSET_MINUTES)]
  #[case(Key::End, MAX_OFFSET_MINUTES)]
  fn keyboard_steps(#[case] key: Key, #[case] expected: i32) {
    let mut controller = mounted(TextDirection::Ltr);
    assert!(controller.key_down(key));
    assert_eq!(controller.offset(), expected);
    assert!(controller.is_tooltip_visible());
    assert!(!controller.is_dragging());
    assert_approx_eq!(
      controller.slider_x().unwrap(),
      offset_to_pixel(expected, WIDTH, MAX_OFFSET_MINUTES)
    );
  }

  #[test]
  fn keyboard_clamps_and_ignores_other_keys() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.key_down(Key::End);
    controller.key_down(Key::ArrowRight);
    assert_eq!(controller.offset(), MAX_OFFSET_MINUTES);
    assert!(!controller.key_down(Key::A));
    assert_eq!(controller.offset(), MAX_OFFSET_MINUTES);
  }

  #[test]
  fn reset_snaps_back_to_the_centre() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.press_at(700.0);
    controller.release();
    let start = controller.offset();
    assert!(start > 0);

    controller.reset(1.0);
    assert!(controller.is_resetting());

    assert!(controller.animate(1.15));
    assert!(controller.offset() < start && controller.offset() > 0);
    assert!(controller.is_tooltip_visible());

    assert!(!controller.animate(1.4));
    assert_eq!(controller.offset(), 0);
    assert_eq!(controller.state(), &SliderState::Idle);
    assert!(!controller.is_tooltip_visible());
    assert_eq!(controller.slider_x(), None);

    controller.refresh_layout(WIDTH);
    assert_approx_eq!(controller.slider_x().unwrap(), WIDTH / 2.0);
  }

  #[test]
  fn input_is_ignored_while_resetting() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.key_down(Key::End);
    controller.reset(0.0);

    controller.press_handle();
    controller.press_at(10.0);
    assert!(!controller.key_down(Key::Home));
    assert!(controller.is_resetting());
    assert_eq!(controller.offset(), MAX_OFFSET_MINUTES);
  }

  #[test]
  fn second_reset_replaces_the_first() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.key_down(Key::End);
    controller.reset(0.0);
    controller.animate(0.2);
    controller.reset(0.2);

    // The first reset would have finished at 0.3.
    assert!(controller.animate(0.35));
    assert!(!controller.animate(0.5));
    assert_eq!(controller.offset(), 0);
  }

  #[test]
  fn resize_keeps_offset_and_moves_slider() {
    let mut controller = mounted(TextDirection::Ltr);
    controller.key_down(Key::Home);
    controller.refresh_layout(400.0);
    assert_eq!(controller.offset(), -MAX_OFFSET_MINUTES);
    assert_approx_eq!(controller.slider_x().unwrap(), 0.0);
    controller.key_down(Key::ArrowRight);
    controller.refresh_layout(1000.0);
    assert_approx_eq!(
      controller.slider_x().unwrap(),
      offset_to_pixel(-MAX_OFFSET_MINUTES + 30, 1000.0, MAX_OFFSET_MINUTES)
    );
  }
}

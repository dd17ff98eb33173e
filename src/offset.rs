//! Conversion between slider pixel positions and time offsets.

/// Largest offset the slider can reach in either direction, in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 1440;

/// Offset change for one arrow key press, in minutes.
pub const KEY_STEP_MINUTES: i32 = 30;

/// Maps a pixel position inside a container of `width` to an offset in minutes.
///
/// The centre of the container is offset zero, the edges are `±max_offset`.
/// A zero width yields a non-finite ratio; callers must only pass measured widths.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn pixel_to_offset(x: f32, width: f32, max_offset: i32) -> i32 {
  let center = width / 2.0;
  let ratio = (x - center) / center;
  (ratio * max_offset as f32).round() as i32
}

/// Inverse of [`pixel_to_offset`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn offset_to_pixel(offset: i32, width: f32, max_offset: i32) -> f32 {
  let center = width / 2.0;
  center + (offset as f32 / max_offset as f32) * center
}

/// Clamps an offset to `[-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES]`.
#[must_use]
pub fn clamp_offset(offset: i32) -> i32 {
  offset.clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES)
}

/// Formats an offset for the tooltip and the slider's value text.
///
/// `0` is "Now", everything else is `±H:MM`.
#[must_use]
pub fn format_offset(minutes: i32) -> String {
  if minutes == 0 {
    return "Now".to_string();
  }
  let sign = if minutes >= 0 { '+' } else { '-' };
  let abs = minutes.unsigned_abs();
  format!("{sign}{}:{:02}", abs / 60, abs % 60)
}

#[cfg(test)]
mod tests {
  use super::*;
  use assert_approx_eq::assert_approx_eq;
  use rstest::rstest;

  #[rstest]
  #[case(0, "Now")]
  #[case(90, "+1:30")]
  #[case(-45, "-0:45")]
  #[case(1440, "+24:00")]
  #[case(-61, "-1:01")]
  fn formats_offsets(#[case] minutes: i32, #[case] expected: &str) {
    assert_eq!(format_offset(minutes), expected);
  }

  #[test]
  fn center_is_zero() {
    assert_eq!(pixel_to_offset(200.0, 400.0, MAX_OFFSET_MINUTES), 0);
    assert_approx_eq!(offset_to_pixel(0, 400.0, MAX_OFFSET_MINUTES), 200.0);
  }

  #[test]
  fn edges_are_the_bounds() {
    assert_eq!(pixel_to_offset(0.0, 400.0, MAX_OFFSET_MINUTES), -1440);
    assert_eq!(pixel_to_offset(400.0, 400.0, MAX_OFFSET_MINUTES), 1440);
    assert_approx_eq!(offset_to_pixel(-1440, 400.0, MAX_OFFSET_MINUTES), 0.0);
    assert_approx_eq!(offset_to_pixel(1440, 400.0, MAX_OFFSET_MINUTES), 400.0);
  }

  #[rstest]
  #[case(400.0)]
  #[case(733.0)]
  #[case(1920.0)]
  fn round_trip_stays_within_rounding(#[case] width: f32) {
    for offset in (-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).step_by(7) {
      let x = offset_to_pixel(offset, width, MAX_OFFSET_MINUTES);
      let back = pixel_to_offset(x, width, MAX_OFFSET_MINUTES);
      assert!((back - offset).abs() <= 1, "{offset} -> {x} -> {back}");
    }
  }

  #[test]
  fn offset_to_pixel_is_monotonic() {
    let mut previous = f32::NEG_INFINITY;
    for offset in -MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES {
      let x = offset_to_pixel(offset, 640.0, MAX_OFFSET_MINUTES);
      assert!(x >= previous);
      previous = x;
    }
  }

  #[test]
  fn clamps_to_range() {
    assert_eq!(clamp_offset(5000), MAX_OFFSET_MINUTES);
    assert_eq!(clamp_offset(-5000), -MAX_OFFSET_MINUTES);
    assert_eq!(clamp_offset(17), 17);
  }
}

//! Small vector icons painted straight onto an egui painter.
//!
//! All icons are drawn into a square `rect`, designed on a 16x16 grid.

use std::f32::consts::TAU;

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

use crate::time_of_day::TimeOfDay;

/// Maps a point on the 16x16 design grid into `rect`.
fn grid(rect: Rect, x: f32, y: f32) -> Pos2 {
  rect.min + vec2(x, y) * (rect.width() / 16.0)
}

fn scale(rect: Rect) -> f32 {
  rect.width() / 16.0
}

#[allow(clippy::cast_precision_loss)]
fn rays(painter: &Painter, center: Pos2, inner: f32, outer: f32, count: usize, stroke: Stroke) {
  for i in 0..count {
    let angle = TAU * i as f32 / count as f32;
    let dir = Vec2::angled(angle);
    painter.line_segment([center + dir * inner, center + dir * outer], stroke);
  }
}

fn sun(painter: &Painter, rect: Rect, color: Color32) {
  let s = scale(rect);
  let center = rect.center();
  painter.circle_filled(center, 4.0 * s, color);
  rays(painter, center, 5.5 * s, 7.5 * s, 8, Stroke::new(s, color));
}

fn moon(painter: &Painter, rect: Rect, color: Color32, background: Color32) {
  let s = scale(rect);
  painter.circle_filled(grid(rect, 7.0, 8.5), 6.5 * s, color);
  painter.circle_filled(grid(rect, 10.0, 6.0), 5.5 * s, background);
  painter.circle_filled(grid(rect, 12.5, 3.0), 1.0 * s, color);
}

/// Half sun on the horizon with an arrow above it pointing `up` or down.
fn horizon_sun(painter: &Painter, rect: Rect, color: Color32, up: bool) {
  let s = scale(rect);
  let stroke = Stroke::new(s, color);
  let center = grid(rect, 8.0, 12.0);

  let arc: Vec<Pos2> = (0..=16)
    .map(|i| {
      #[allow(clippy::cast_precision_loss)]
      let angle = std::f32::consts::PI * (1.0 + i as f32 / 16.0);
      center + Vec2::angled(angle) * 4.0 * s
    })
    .collect();
  painter.add(Shape::convex_polygon(arc, color, Stroke::NONE));
  painter.line_segment([grid(rect, 0.5, 12.0), grid(rect, 15.5, 12.0)], stroke);
  painter.line_segment([grid(rect, 2.5, 5.0), grid(rect, 4.0, 6.5)], stroke);
  painter.line_segment([grid(rect, 13.5, 5.0), grid(rect, 12.0, 6.5)], stroke);

  painter.line_segment([grid(rect, 8.0, 1.0), grid(rect, 8.0, 4.5)], stroke);
  let (tip_y, wing_y) = if up { (1.0, 2.5) } else { (4.5, 3.0) };
  painter.line_segment([grid(rect, 8.0, tip_y), grid(rect, 6.5, wing_y)], stroke);
  painter.line_segment([grid(rect, 8.0, tip_y), grid(rect, 9.5, wing_y)], stroke);
}

/// Paints the icon for a time-of-day category.
pub fn time_of_day(painter: &Painter, rect: Rect, tod: TimeOfDay) {
  let color = tod.foreground();
  match tod {
    TimeOfDay::Sunrise => horizon_sun(painter, rect, color, true),
    TimeOfDay::Day => sun(painter, rect, color),
    TimeOfDay::Sunset => horizon_sun(painter, rect, color, false),
    TimeOfDay::Night => moon(painter, rect, color, tod.background()),
  }
}

/// A cross, used for the reset button.
pub fn close(painter: &Painter, rect: Rect, color: Color32) {
  let stroke = Stroke::new(2.0 * scale(rect), color);
  painter.line_segment([grid(rect, 2.0, 2.0), grid(rect, 14.0, 14.0)], stroke);
  painter.line_segment([grid(rect, 2.0, 14.0), grid(rect, 14.0, 2.0)], stroke);
}

/// A filled triangle pointing left or right.
pub fn triangle(painter: &Painter, rect: Rect, color: Color32, pointing_left: bool) {
  let points = if pointing_left {
    vec![grid(rect, 0.0, 8.0), grid(rect, 12.0, 2.0), grid(rect, 12.0, 14.0)]
  } else {
    vec![grid(rect, 16.0, 8.0), grid(rect, 4.0, 2.0), grid(rect, 4.0, 14.0)]
  };
  painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
}

use chrono::{DateTime, Local, Utc};
use egui::{
  Align, Color32, CursorIcon, EventFilter, Id, Key, Label, Layout, Modifiers, Rect,
  Response, RichText, Sense, Stroke, Ui, UiBuilder, Vec2, WidgetInfo, WidgetType, pos2, vec2,
};
use log::{debug, info};

use crate::{
  city::{CITIES, City, CityReading},
  clock::{Clock, TICK_INTERVAL, Ticker},
  config::Config,
  controller::PeekController,
  icons,
  offset::{KEY_STEP_MINUTES, MAX_OFFSET_MINUTES, format_offset},
};

// Layout constants
const TOOLTIP_HEIGHT: f32 = 34.0;
const TOOLTIP_WIDTH: f32 = 92.0;
const ROW_HEIGHT: f32 = 56.0;
const ROW_GAP: f32 = 4.0;
const ROW_PADDING: f32 = 14.0;
const HANDLE_WIDTH: f32 = 24.0;
const ICON_SIZE: f32 = 16.0;
const CLOSE_SIZE: f32 = 18.0;
/// Below this width rows show the short offset ("+1:30") instead of the full one.
const COMPACT_WIDTH: f32 = 480.0;

const SLIDER_KEYS: [Key; 6] = [
  Key::ArrowLeft,
  Key::ArrowRight,
  Key::ArrowUp,
  Key::ArrowDown,
  Key::Home,
  Key::End,
];

const SLIDER_COLOR: Color32 = Color32::from_rgb(232, 76, 61);
const TOOLTIP_BG_COLOR: Color32 = Color32::from_rgb(30, 30, 36);
const TOOLTIP_TEXT_COLOR: Color32 = Color32::WHITE;

/// The world clock: one row per city and the peek slider on top.
pub struct PeekApp {
  controller: PeekController,
  ticker: Ticker,
  cities: &'static [City],
}

impl PeekApp {
  #[must_use]
  pub fn new(config: &Config, clock: Box<dyn Clock>) -> Self {
    info!("Starting peektime ({:?})", config.direction());
    Self {
      controller: PeekController::new(config.direction()),
      ticker: Ticker::new(clock),
      cities: CITIES,
    }
  }

  #[must_use]
  pub fn controller(&self) -> &PeekController {
    &self.controller
  }

  /// The instant of the last clock tick.
  #[must_use]
  pub fn current_instant(&self) -> DateTime<Utc> {
    self.ticker.current()
  }

  /// Draws the widget into `ui`, using its full available width.
  pub fn ui(&mut self, ui: &mut Ui) {
    let now = ui.input(|i| i.time);
    if self.ticker.tick(now) {
      debug!("Clock tick at {}", self.ticker.current());
    }
    ui.ctx().request_repaint_after(TICK_INTERVAL);

    #[allow(clippy::cast_precision_loss)]
    let rows_height = self.cities.len() as f32 * (ROW_HEIGHT + ROW_GAP);
    let (rect, container) = ui.allocate_exact_size(
      vec2(ui.available_width(), TOOLTIP_HEIGHT + rows_height),
      Sense::click_and_drag(),
    );
    self.controller.refresh_layout(rect.width());
    if self.controller.animate(now) {
      ui.ctx().request_repaint();
    }

    let rows_rect = Rect::from_min_size(
      rect.min + vec2(0.0, TOOLTIP_HEIGHT),
      vec2(rect.width(), rows_height),
    );
    self.rows_ui(ui, rows_rect, rect.width() < COMPACT_WIDTH);

    let x = rect.left() + self.controller.display_x();
    let handle = self.slider_ui(ui, rows_rect, x);
    let reset = if self.controller.is_tooltip_visible() {
      Some(self.tooltip_ui(ui, rect, x))
    } else {
      None
    };

    self.handle_pointer(ui, rect, &container, &handle, reset.as_ref(), now);
    self.handle_keys(ui, &handle);
  }

  fn rows_ui(&self, ui: &mut Ui, rows_rect: Rect, compact: bool) {
    let peek = self.controller.peek_instant(self.ticker.current());
    let reference = peek.with_timezone(&Local).naive_local();
    let today = self.ticker.current().with_timezone(&Local).date_naive();

    for (i, city) in self.cities.iter().enumerate() {
      #[allow(clippy::cast_precision_loss)]
      let top = rows_rect.top() + i as f32 * (ROW_HEIGHT + ROW_GAP);
      let row_rect = Rect::from_min_size(
        pos2(rows_rect.left(), top),
        vec2(rows_rect.width(), ROW_HEIGHT),
      );
      let reading = CityReading::new(*city, peek, reference, today);
      row_ui(ui, row_rect, &reading, compact);
    }
  }

  /// Paints the slider line and returns the handle's response.
  fn slider_ui(&self, ui: &mut Ui, rows_rect: Rect, x: f32) -> Response {
    let painter = ui.painter();
    painter.line_segment(
      [pos2(x, rows_rect.top()), pos2(x, rows_rect.bottom())],
      Stroke::new(2.0, SLIDER_COLOR),
    );
    let arrow_y = rows_rect.top() + ROW_HEIGHT / 2.0;
    icons::triangle(
      painter,
      Rect::from_center_size(pos2(x - 9.0, arrow_y), Vec2::splat(10.0)),
      SLIDER_COLOR,
      true,
    );
    icons::triangle(
      painter,
      Rect::from_center_size(pos2(x + 9.0, arrow_y), Vec2::splat(10.0)),
      SLIDER_COLOR,
      false,
    );

    let handle_rect = Rect::from_center_size(
      pos2(x, rows_rect.center().y),
      vec2(HANDLE_WIDTH, rows_rect.height()),
    );
    let handle = ui.interact(handle_rect, Id::new("peek_slider"), Sense::click_and_drag());

    let offset = self.controller.offset();
    handle.widget_info(|| {
      let mut info = WidgetInfo::slider(true, f64::from(offset), "Peek time");
      info.current_text_value = Some(format_offset(offset));
      info
    });
    ui.ctx().accesskit_node_builder(handle.id, |node| {
      node.set_min_numeric_value(f64::from(-MAX_OFFSET_MINUTES));
      node.set_max_numeric_value(f64::from(MAX_OFFSET_MINUTES));
      node.set_numeric_value_step(f64::from(KEY_STEP_MINUTES));
    });

    if handle.has_focus() {
      ui.painter().rect_stroke(
        handle_rect.shrink2(vec2(4.0, 0.0)),
        4.0,
        ui.visuals().selection.stroke,
        egui::StrokeKind::Outside,
      );
    }
    if handle.hovered() || self.controller.is_dragging() {
      ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    }
    handle
  }

  /// Draws the offset bubble above the slider and returns the reset button.
  fn tooltip_ui(&self, ui: &mut Ui, rect: Rect, x: f32) -> Response {
    let half = TOOLTIP_WIDTH / 2.0;
    let center_x = x.clamp(rect.left() + half, (rect.right() - half).max(rect.left() + half));
    let bubble = Rect::from_center_size(
      pos2(center_x, rect.top() + TOOLTIP_HEIGHT / 2.0 - 2.0),
      vec2(TOOLTIP_WIDTH, TOOLTIP_HEIGHT - 8.0),
    );
    ui.painter().rect_filled(bubble, 6.0, TOOLTIP_BG_COLOR);

    let close_rect = Rect::from_center_size(
      pos2(bubble.right() - CLOSE_SIZE / 2.0 - 6.0, bubble.center().y),
      Vec2::splat(CLOSE_SIZE),
    );
    let text_rect = Rect::from_min_max(bubble.min, pos2(close_rect.left(), bubble.max.y));
    let mut text_ui = ui.new_child(
      UiBuilder::new()
        .max_rect(text_rect)
        .layout(Layout::centered_and_justified(egui::Direction::LeftToRight)),
    );
    text_ui.add(
      Label::new(
        RichText::new(format_offset(self.controller.offset()))
          .strong()
          .color(TOOLTIP_TEXT_COLOR),
      )
      .selectable(false),
    );

    let reset = ui.interact(close_rect, Id::new("peek_reset"), Sense::click());
    reset.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, "Reset"));
    let close_color = if reset.hovered() {
      SLIDER_COLOR
    } else {
      TOOLTIP_TEXT_COLOR
    };
    icons::close(ui.painter(), close_rect.shrink(4.0), close_color);
    if reset.hovered() {
      ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
    }
    reset
  }

  fn handle_pointer(
    &mut self,
    ui: &Ui,
    rect: Rect,
    container: &Response,
    handle: &Response,
    reset: Option<&Response>,
    now: f64,
  ) {
    let (pressed, released, pointer) = ui.input(|i| {
      (
        i.pointer.primary_pressed(),
        i.pointer.any_released(),
        i.pointer.interact_pos(),
      )
    });
    let before = (self.controller.offset(), self.controller.state().clone());

    if reset.is_some_and(Response::clicked) {
      self.controller.reset(now);
      ui.ctx().request_repaint();
    } else if pressed && handle.is_pointer_button_down_on() {
      handle.request_focus();
      self.controller.press_handle();
    } else if pressed
      && container.is_pointer_button_down_on()
      && !reset.is_some_and(Response::hovered)
      && let Some(pos) = pointer
    {
      handle.request_focus();
      self.controller.press_at(pos.x - rect.left());
    }

    if self.controller.is_dragging()
      && let Some(pos) = pointer
    {
      self.controller.drag_to(pos.x - rect.left());
    }
    if released {
      self.controller.release();
    }

    if before != (self.controller.offset(), self.controller.state().clone()) {
      ui.ctx().request_repaint();
    }
  }

  fn handle_keys(&mut self, ui: &Ui, handle: &Response) {
    if !handle.has_focus() {
      return;
    }
    ui.memory_mut(|mem| {
      mem.set_focus_lock_filter(
        handle.id,
        EventFilter {
          horizontal_arrows: true,
          vertical_arrows: true,
          ..Default::default()
        },
      );
    });
    for key in SLIDER_KEYS {
      if ui.input_mut(|i| i.consume_key(Modifiers::NONE, key)) && self.controller.key_down(key) {
        debug!("Peek slider key {key:?} -> offset {}", self.controller.offset());
        ui.ctx().request_repaint();
      }
    }
  }
}

impl eframe::App for PeekApp {
  fn ui(&mut self, ui: &mut Ui, _frame: &mut eframe::Frame) {
    egui::CentralPanel::default().show_inside(ui, |ui| {
      PeekApp::ui(self, ui);
    });
  }
}

/// One city: name and relative offset on the start side, icon and clock on the end side.
fn row_ui(ui: &mut Ui, rect: Rect, reading: &CityReading, compact: bool) {
  let tod = reading.time_of_day;
  let fg = tod.foreground();
  ui.painter().rect_filled(rect, 8.0, tod.background());
  let inner = rect.shrink2(vec2(ROW_PADDING, 6.0));

  let mut start = ui.new_child(
    UiBuilder::new()
      .max_rect(inner)
      .layout(Layout::top_down(Align::Min)),
  );
  start.spacing_mut().item_spacing.y = 2.0;
  start.add(
    Label::new(RichText::new(reading.city.name).strong().size(16.0).color(fg)).selectable(false),
  );
  let offset = if compact {
    &reading.stamp.short
  } else {
    &reading.stamp.full
  };
  start.add(
    Label::new(RichText::new(format!("{}, {offset}", reading.stamp.relative)).color(fg))
      .selectable(false),
  );

  let mut end = ui.new_child(
    UiBuilder::new()
      .max_rect(inner)
      .layout(Layout::right_to_left(Align::Center)),
  );
  end.spacing_mut().item_spacing.x = 4.0;
  end.add(Label::new(RichText::new(reading.meridiem()).small().color(fg)).selectable(false));
  end.add(
    Label::new(RichText::new(reading.clock_text()).size(22.0).color(fg)).selectable(false),
  );
  end.add_space(6.0);
  let (icon_rect, icon) = end.allocate_exact_size(Vec2::splat(ICON_SIZE), Sense::hover());
  icon.widget_info(|| WidgetInfo::labeled(WidgetType::Image, true, tod.name()));
  icons::time_of_day(end.painter(), icon_rect, tod);
}

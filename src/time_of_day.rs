use egui::Color32;

/// Coarse category of a local hour, used to pick a row's icon and colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
  Sunrise,
  Day,
  Sunset,
  Night,
}

impl TimeOfDay {
  /// Classifies an hour of day. Anything outside `[6, 20)` is night.
  #[must_use]
  pub fn from_hour(hour: u32) -> Self {
    match hour {
      6..=8 => TimeOfDay::Sunrise,
      9..=17 => TimeOfDay::Day,
      18..=19 => TimeOfDay::Sunset,
      _ => TimeOfDay::Night,
    }
  }

  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      TimeOfDay::Sunrise => "sunrise",
      TimeOfDay::Day => "day",
      TimeOfDay::Sunset => "sunset",
      TimeOfDay::Night => "night",
    }
  }

  /// Row background.
  #[must_use]
  pub fn background(self) -> Color32 {
    match self {
      TimeOfDay::Sunrise => Color32::from_rgb(253, 214, 146),
      TimeOfDay::Day => Color32::from_rgb(186, 225, 255),
      TimeOfDay::Sunset => Color32::from_rgb(240, 160, 150),
      TimeOfDay::Night => Color32::from_rgb(28, 34, 64),
    }
  }

  /// Text and icon colour on top of [`Self::background`].
  #[must_use]
  pub fn foreground(self) -> Color32 {
    match self {
      TimeOfDay::Night => Color32::from_rgb(230, 232, 245),
      _ => Color32::from_rgb(24, 26, 34),
    }
  }
}

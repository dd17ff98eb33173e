use std::path::PathBuf;

use clap::Parser as CliParser;
use peektime::{
  clock::SystemClock,
  config::Config,
  controller::TextDirection,
  peek_ui::PeekApp,
};

#[derive(clap::Parser, Debug)]
#[command(version, about = "World clock with a peek-time slider")]
struct Args {
  /// Lay the slider out right to left.
  #[arg(long)]
  rtl: bool,

  /// Directory holding config.json. Defaults to ~/.config/peektime.
  #[arg(long)]
  config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Config {
  let mut config = match &args.config {
    Some(dir) => Config::with_dir(dir.clone()),
    None => Config::new(),
  };
  if args.rtl {
    config.direction = Some(TextDirection::Rtl);
  }
  config
}

fn main() -> eframe::Result {
  // init logger.
  env_logger::init();

  let args = Args::parse();
  let config = load_config(&args);
  log::debug!("Using config {config:?}");

  let options = eframe::NativeOptions {
    viewport: egui::ViewportBuilder {
      inner_size: Some(egui::vec2(640.0, 460.0)),
      min_inner_size: Some(egui::vec2(320.0, 420.0)),
      ..Default::default()
    },
    ..Default::default()
  };

  eframe::run_native(
    "peektime",
    options,
    Box::new(move |cc| {
      match config.dark_mode {
        Some(true) => cc.egui_ctx.set_theme(egui::Theme::Dark),
        Some(false) => cc.egui_ctx.set_theme(egui::Theme::Light),
        None => {}
      }
      Ok(Box::new(PeekApp::new(&config, Box::new(SystemClock))))
    }),
  )
}

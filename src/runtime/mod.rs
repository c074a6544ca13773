use std::env;
use std::path::PathBuf;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::audio::RodioEngine;
use crate::logging;
use crate::player::{PlaybackController, SystemClock};

mod event_loop;
mod launch;
mod settings;

use launch::LaunchArgs;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(Some(path)) => info!(log = %path.display(), "cueplay starting"),
        Ok(None) => {}
        Err(e) => eprintln!("cueplay: logging disabled: {e}"),
    }

    let launch = LaunchArgs::parse(env::args().skip(1));
    let picker_root = launch
        .picker_root
        .or_else(|| settings.library.start_dir.clone())
        .or_else(|| env::current_dir().ok())
        .map_or_else(|| PathBuf::from("."), launch::absolute);

    let engine = RodioEngine::new()?;
    let mut player = PlaybackController::new(
        engine,
        SystemClock,
        i32::from(settings.audio.initial_volume),
    );
    for file in launch.files {
        player.enqueue(file);
    }

    let mut app = App::new(
        picker_root,
        settings.library.clone(),
        settings.audio.volume_step,
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut player);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("cueplay exiting");
    run_result
}

use std::fs::File;
use std::io::{self, Write, stdout};
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags},
    execute, terminal,
};

use flappy_gap::audio::{Silent, Soundtrack, Speakers};
use flappy_gap::consts::TICK;
use flappy_gap::screen::Screen;
use flappy_gap::{Config, Controller, Input, ScoreFile};

/// Logs go to a file: stdout and stderr belong to the game
fn init_logging(path: &Path) {
    match File::create(path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Logging disabled, cannot open {}: {}", path.display(), e),
    }
}

fn open_soundtrack(config: &Config) -> Box<dyn Soundtrack> {
    if config.mute {
        log::info!("Audio muted");
        return Box::new(Silent);
    }
    match Speakers::open(&config.music) {
        Ok(speakers) => Box::new(speakers),
        Err(e) => {
            log::warn!("Audio disabled: {}", e);
            Box::new(Silent)
        }
    }
}

fn run(controller: &mut Controller, out: &mut impl Write) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(cols, rows);
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(std::time::Duration::ZERO)? {
            match event::read()? {
                Event::Resize(c, r) => screen.resize(c, r),
                other => {
                    if let Some(input) = Input::from_event(&other) {
                        controller.handle(input);
                    }
                }
            }
        }
        if controller.exit_requested() {
            return Ok(());
        }

        // Update
        let now = Instant::now();
        controller.advance(now - last);
        last = now;

        // Render
        screen.draw(controller, out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < TICK {
            std::thread::sleep(TICK - elapsed);
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::parse();
    init_logging(&config.log_file);

    let seed = config.seed();
    log::info!(
        "Flappy Gap starting (seed {}, scores {}, music {})",
        seed,
        config.scores.display(),
        config.music.display()
    );

    let soundtrack = open_soundtrack(&config);
    let mut controller = Controller::new(seed, ScoreFile::new(&config.scores), soundtrack);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableMouseCapture,
    )?;
    // Without event kinds, auto-repeat arrives as more key presses
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            out,
            event::PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    log::debug!("Keyboard event kinds reported: {}", enhanced);

    let result = run(&mut controller, &mut out);

    if enhanced {
        if let Err(e) = execute!(out, event::PopKeyboardEnhancementFlags) {
            log::warn!("Error restoring keyboard mode: {}", e);
        }
    }
    let cleanup = execute!(
        out,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )
    .and_then(|_| terminal::disable_raw_mode());

    log::info!("Bye");
    result.and(cleanup)
}

//! Viewer: page through a file in the terminal.
//!
//! ```text
//! cargo run --example viewer -- <file> [syntax-config]
//! ```
//!
//! Arrows move the cursor (Shift selects, Ctrl scrolls), PageUp/PageDown
//! page, the mouse places the cursor and the wheel scrolls. Press 'q' or
//! Escape to quit. Set `GRIDTEXT_LOG=<path>` to capture logs; `RUST_LOG`
//! picks the level.

use crossbeam_channel::bounded;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use gridtext::{
    EditorContext, Frame, GridConfig, InputActor, InputEvent, KeyCode, KeyModifiers, OutputBuffer,
    SyntaxTables,
};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Raw mode, alternate screen and mouse capture, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn init_logging() {
    // The terminal belongs to the UI, so logs only go to a file.
    let Some(path) = std::env::var_os("GRIDTEXT_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn is_quit(event: &InputEvent) -> bool {
    match event {
        InputEvent::Key { code, modifiers } => {
            matches!(code, KeyCode::Char('q') | KeyCode::Esc)
                || (*code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
        }
        InputEvent::Shutdown => true,
        _ => false,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: viewer <file> [syntax-config]");
        std::process::exit(2);
    };

    let config = GridConfig {
        line_numbers: true,
        ..GridConfig::default()
    };
    let mut view = EditorContext::open(&path, config)?;
    if let Some(syntax) = args.next() {
        let parsed = SyntaxTables::load(&syntax)?;
        for anomaly in &parsed.anomalies {
            eprintln!("{syntax}: {anomaly}");
        }
        view.set_tables(parsed.tables);
    }

    let (cols, rows) = terminal::size()?;
    view.resize(usize::from(rows), usize::from(cols));

    let _guard = TerminalGuard::enter()?;
    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let input = InputActor::spawn(input_tx, Duration::from_millis(10))?;

    let mut frame = Frame::new(0, 0);
    let mut output = OutputBuffer::new();
    let mut stdout = io::stdout();
    let mut dirty = true;

    loop {
        if dirty {
            view.render(&mut frame);
            output.clear();
            output.write_frame(&frame, view.caret());
            output.flush_to(&mut stdout)?;
            dirty = false;
        }

        let Ok(event) = input_rx.recv() else {
            break;
        };
        if is_quit(&event) {
            break;
        }
        // Pointer state is consumed per render, so every event gets its own pass.
        dirty = view.handle_input(&event);
    }

    input.join();
    stdout.flush()?;
    Ok(())
}

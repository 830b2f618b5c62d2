mod app;
mod config;
mod domain;
mod infrastructure;
mod logging;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::{App, Control, InputMode};
use crate::infrastructure::ethereum::JsonRpcWalletConnector;
use crate::infrastructure::runtime::{alloy_readers, RuntimeBridge};

#[derive(Debug, Parser)]
#[command(
    name = "base-pulse",
    version,
    about = "Base Pulse: wallet connect and read-only Base network pulse"
)]
struct Args {
    /// Config file (default: $BASE_PULSE_CONFIG or ~/.config/base-pulse/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-RPC wallet endpoint (e.g. http://127.0.0.1:1248). Defaults to the network RPC.
    #[arg(long)]
    wallet_rpc: Option<String>,

    /// Log level or filter directives (e.g. debug, warn,base_pulse=trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    let log_level = args.log_level.clone().unwrap_or_else(|| config.log_level());
    let log_warning = match config.log_file() {
        Some(path) => logging::setup_logging(&log_level, &path)
            .err()
            .map(|err| format!("Logging disabled: {err:#}")),
        None => Some("Logging disabled: no data directory".to_string()),
    };

    let meta = config.app_meta();
    let networks = config.network_registry();
    let wallet_rpc = args.wallet_rpc.clone().or_else(|| config.wallet_rpc());
    let connector = Arc::new(JsonRpcWalletConnector::new(wallet_rpc));

    let runtime = RuntimeBridge::new(meta.clone(), connector, alloy_readers())?;

    let mut app = App::new(meta, networks);
    if let Some(warning) = log_warning {
        app.set_status(warning, app::StatusLevel::Warn);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{err:#}");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_event(event);
    }

    for cmd in app.take_pending() {
        if let Err(err) = runtime.send(cmd) {
            app.apply_event(infrastructure::runtime::RuntimeEvent::Error {
                message: format!("{err:#}"),
            });
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Address => handle_address_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => app.should_quit = true,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.should_quit = true,
        (KeyCode::Tab, _) => app.activate(Control::AddressInput),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.scroll_up(1),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.scroll_down(1),
        (KeyCode::PageUp, _) => app.scroll_up(page_amount(app)),
        (KeyCode::PageDown, _) => app.scroll_down(page_amount(app)),
        (KeyCode::Char(c), _) => {
            if let Some(control) = Control::ALL.iter().find(|ctl| ctl.shortcut() == c) {
                app.activate(*control);
            }
        }
        _ => {}
    }
}

fn handle_address_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Tab, _) => app.leave_input(),
        (KeyCode::Enter, _) => {
            app.leave_input();
            app.activate(Control::CheckBalance);
        }
        (KeyCode::Backspace, _) => app.input_backspace(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.input_clear(),
        (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_char(c)
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match app.control_at(mouse.column, mouse.row) {
                Some(control) => app.activate(control),
                None => app.leave_input(),
            }
        }
        MouseEventKind::ScrollUp => app.scroll_up(3),
        MouseEventKind::ScrollDown => app.scroll_down(3),
        _ => {}
    }
}

fn page_amount(app: &App) -> u16 {
    app.output_area.height.saturating_sub(2).max(1)
}

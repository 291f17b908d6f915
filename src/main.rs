use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
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
use ratatui::layout::Rect;
use ratatui::Terminal;
use serde::Serialize;
use tracing::{info, warn};

use edfloor::app::{App, InputMode};
use edfloor::config::{self, Config};
use edfloor::core::{ActiveView, ClassFilter, DateRange, Tab, ViewState};
use edfloor::logging;
use edfloor::modules::export::ReportKind;
use edfloor::modules::filters::FilterField;
use edfloor::ui;

#[derive(Debug, Parser)]
#[command(
    name = "edfloor",
    version,
    about = "EdFloor: a terminal analytics dashboard for student performance"
)]
struct Args {
    /// Tab to open (performance, attendance, comparison, grades)
    #[arg(long)]
    tab: Option<String>,

    /// Class filter (e.g. "All Classes", "Class A")
    #[arg(long)]
    class: Option<String>,

    /// Date range filter (e.g. "Last 5 Months", "This Year")
    #[arg(long)]
    range: Option<String>,

    /// Config file path (defaults to ~/.config/edfloor/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the active view as JSON and exit
    #[arg(long)]
    snapshot: bool,
}

/// JSON shape printed by `--snapshot`
#[derive(Serialize)]
struct Snapshot<'a> {
    tab: Tab,
    class: ClassFilter,
    range: DateRange,
    view: &'a ActiveView,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = match args.config.as_deref() {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    let mut startup_warnings = Vec::new();
    if let Some(log_path) = config.log_path() {
        if let Err(err) = logging::init(&log_path) {
            startup_warnings.push(format!("Logging disabled: {err}"));
        }
    }
    info!("edfloor starting");
    if let Some(err) = config_error {
        warn!("using default config: {err}");
        startup_warnings.push(format!("Config: {err}"));
    }

    let mut view = ViewState::new();
    startup_warnings.extend(config.apply_defaults(&mut view));
    view.apply_selection(
        args.tab.as_deref(),
        args.class.as_deref(),
        args.range.as_deref(),
    )
    .context("invalid command-line selection")?;

    if args.snapshot {
        let snapshot = Snapshot {
            tab: view.active_tab(),
            class: view.selected_class(),
            range: view.date_range(),
            view: view.active_view(),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let mut app = App::with_view(view);
    app.report_warnings(&startup_warnings);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, config.tick_rate());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }
    info!("edfloor stopped");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;
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
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Filter => app.handle_filter_key(key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Char('?'), _) => app.help_open = true,
        (KeyCode::Char(':'), _) => app.enter_command(),
        (KeyCode::Char(ch @ '1'..='4'), _) => {
            if let Some(tab) = Tab::from_shortcut(ch) {
                app.select_tab(tab);
            }
        }
        (KeyCode::Tab | KeyCode::Right | KeyCode::Char('l'), _) => app.cycle_tab(true),
        (KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h'), _) => app.cycle_tab(false),
        (KeyCode::Char('f'), _) => app.open_filter(FilterField::Class),
        (KeyCode::Char('c'), _) => app.view.cycle_class(true),
        (KeyCode::Char('C'), _) => app.view.cycle_class(false),
        (KeyCode::Char('d'), _) => app.view.cycle_date_range(true),
        (KeyCode::Char('D'), _) => app.view.cycle_date_range(false),
        (KeyCode::Char('p'), _) => app.request_export(ReportKind::Pdf),
        (KeyCode::Char('v'), _) => app.request_export(ReportKind::Csv),
        (KeyCode::Esc, _) => app.status = None,
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            if app.command.input.pop().is_none() {
                app.exit_command();
            }
        }
        KeyCode::Char(ch) => app.command.input.push(ch),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.input_mode != InputMode::Normal {
        return;
    }
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size);
    if let Some(tab) = ui::tabs::tab_at(areas.tabs, mouse.column, mouse.row) {
        app.select_tab(tab);
    }
}

fn terminal_rect() -> Option<Rect> {
    crossterm::terminal::size()
        .ok()
        .map(|(width, height)| Rect::new(0, 0, width, height))
}

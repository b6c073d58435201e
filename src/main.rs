mod app;
mod calendar;
mod cli;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::time::Duration;

use app::App;
use calendar::store::Quarantined;
use calendar::Store;
use chrono::Local;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use event::Input;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use tracing::{info, warn};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;

    let level = if cli.verbose > 0 {
        logging::level_for(cli.verbose).to_string()
    } else {
        config
            .log_level
            .clone()
            .unwrap_or_else(|| logging::level_for(0).to_string())
    };
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .or_else(config::default_log_file);
    if let Some(path) = log_file {
        if let Err(err) = logging::init(&path, &level) {
            eprintln!("Logging disabled: {err:#}");
        }
    }

    let store = match cli.events.as_ref().or(config.events_file.as_ref()) {
        Some(path) => Store::load(path)
            .wrap_err_with(|| format!("could not load events from {}", path.display()))?,
        None => Store::bundled()?,
    };

    let mut app = App::new(store, Local::now().date_naive(), cli.month);
    if let Some(message) = skipped_message(app.store.quarantined()) {
        warn!(skipped = app.store.quarantined().len(), "some event records were not loaded");
        app.status_message = Some(message);
    }
    info!(
        month = %app.current_date.format("%Y-%m"),
        source = ?app.store.source(),
        events = app.store.events().len(),
        "starting calendar"
    );

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui(frame, app))?;

        if let Some(input) = event::next_input(Duration::from_millis(100))? {
            handle_input(app, input);
        }
    }

    Ok(())
}

fn handle_input(app: &mut App, input: Input) {
    match input {
        Input::Key(key) => {
            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    app.show_help = false;
                }
                return;
            }

            handle_key(app, key.code, key.modifiers);
        }
        Input::Mouse(mouse) if !app.show_help => handle_mouse(app, mouse),
        Input::Mouse(_) | Input::Resize => {}
    }
}

/// Status line for records left out at load time, naming the first one.
fn skipped_message(skipped: &[Quarantined]) -> Option<String> {
    let first = skipped.first()?;
    let message = match skipped.len() {
        1 => format!("Skipped malformed {first}"),
        n => format!("Skipped {n} malformed records, first {first} (see log)"),
    };
    Some(message)
}

fn ui(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Main layout: month grid + status bar
    let [content, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    let marks = components::Highlights {
        today: app.today,
        selected: app.selected_date,
        hovered: app.hovered_date,
    };
    app.hit_map = {
        let cells = app.grid();
        components::MonthView::render(frame, content, app.current_date, &cells, marks)
    };

    // Tooltip for the hovered day, if it has anything to show
    if let Some(hovered) = app.hovered_date {
        let anchor = app
            .hit_map
            .cells
            .iter()
            .find(|(date, _)| *date == hovered)
            .map(|(_, rect)| *rect);
        let events = app.hovered_events();
        if let (Some(anchor), false) = (anchor, events.is_empty()) {
            components::Tooltip::render(frame, content, anchor, &events);
        }
    }

    components::StatusBar::render(frame, status, app);

    if app.show_help {
        render_help(frame, area);
    }
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('?'), _) => app.show_help = true,
        (KeyCode::Char('t'), _) => {
            app.go_to_today();
            app.status_message = Some("Jumped to today".to_string());
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.move_cursor(-1),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.move_cursor(1),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.move_cursor(-7),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.move_cursor(7),
        (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => app.prev_month(),
        (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => app.next_month(),
        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => app.select_hovered(),
        (KeyCode::Esc, _) => {
            app.clear_selection();
            app.hover(None);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => app.mouse_moved(mouse.column, mouse.row),
        MouseEventKind::Down(MouseButton::Left) => app.mouse_clicked(mouse.column, mouse.row),
        MouseEventKind::ScrollUp => app.prev_month(),
        MouseEventKind::ScrollDown => app.next_month(),
        _ => {}
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let theme = theme::current();

    let popup_w = area.width.clamp(30, 52).min(area.width);
    let popup_h = area.height.clamp(12, 20).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme::HEADER_STYLE)
        .borders(Borders::ALL)
        .border_style(theme.selected);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme.tooltip_title;
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let binding = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<11}", keys), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        binding("h/l \u{2190}/\u{2192}", "Previous/next day"),
        binding("k/j \u{2191}/\u{2193}", "Previous/next week"),
        binding("[/] PgUp/Dn", "Previous/next month"),
        binding("t", "Jump to today"),
        Line::from(""),
        Line::from(Span::styled("Selection", section_style)),
        binding("Enter/Space", "Select day under cursor"),
        Line::from(""),
        Line::from(Span::styled("Mouse", section_style)),
        binding("hover", "Show events for a day"),
        binding("click", "Select day / Prev / Next"),
        binding("wheel", "Previous/next month"),
        Line::from(""),
        binding("q", "Quit"),
        binding("Esc", "Close help / clear selection"),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

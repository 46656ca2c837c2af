// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive terminal UI (ratatui + crossterm).
//!
//! A sidebar lists subjects with their color and visibility, the week grid fills the rest.
//! Mouse clicks on blocks toggle selection, mouse movement drives the inspector.

use std::{
    error::Error,
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{info, warn};

use crate::interact::{
    export_file_stem, Controller, InteractError, MSG_CLEARED, MSG_NOTHING_TO_EXPORT,
};
use crate::model::{format_minutes, RenderId};
use crate::render::{Canvas, ExportImage};

mod theme;

use theme::{canvas_text, rgb_color, TuiTheme};

const SIDEBAR_WIDTH: u16 = 32;
const INSPECTOR_HEIGHT: u16 = 5;
const TOAST_TTL: Duration = Duration::from_secs(3);
const KEY_HINTS: &str = "click select · ␣ show/hide · c clear · e export · q quit";

/// Runs the interactive terminal UI until the user quits.
///
/// Exports are written to `export_dir`.
pub fn run(controller: Controller, export_dir: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(controller, export_dir);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_code(key.code),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                // Resizes are picked up by the next draw.
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[0]);
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(INSPECTOR_HEIGHT)])
        .split(columns[0]);

    draw_subjects(frame, app, sidebar[0]);
    draw_inspector(frame, app, sidebar[1]);
    draw_grid(frame, app, columns[1]);
    draw_status(frame, app, rows[1]);
}

fn draw_subjects(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let theme = app.theme;
    let model = app.controller.model();
    let view = app.controller.view();
    let items = model
        .subjects()
        .iter()
        .map(|subject| {
            let checkbox = if view.is_subject_visible(subject.code().as_str()) {
                "[x]"
            } else {
                "[ ]"
            };
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled("██", Style::default().fg(rgb_color(subject.color()))),
                    Span::raw(" "),
                    Span::styled(checkbox, theme.base_style()),
                    Span::raw(" "),
                    Span::styled(subject.name().to_owned(), theme.base_style().bold()),
                ]),
                Line::from(Span::styled(
                    format!("       {} · {} credits", subject.code(), subject.credits()),
                    theme.muted_style(),
                )),
            ]))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .style(theme.base_style())
        .highlight_style(theme.cursor_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Subjects")
                .border_style(theme.panel_border_style(true)),
        );
    frame.render_stateful_widget(list, area, &mut app.subjects_state);
}

fn draw_inspector(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = app.theme;
    let lines = app
        .hover
        .as_ref()
        .and_then(|id| app.controller.describe(id.as_str()))
        .map(|lines| {
            lines
                .into_iter()
                .map(|line| Line::from(Span::styled(line, theme.base_style())))
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|| {
            vec![Line::from(Span::styled(
                "Hover a class for details.",
                theme.muted_style(),
            ))]
        });

    let inspector = Paragraph::new(Text::from(lines))
        .style(theme.base_style())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Inspector")
                .border_style(theme.panel_border_style(false)),
        );
    frame.render_widget(inspector, area);
}

fn draw_grid(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.grid_title())
        .border_style(theme.panel_border_style(false))
        .style(theme.base_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.render_grid(usize::from(inner.width), usize::from(inner.height)) {
        Ok(text) => {
            app.grid_origin = Some((inner.x, inner.y));
            frame.render_widget(Paragraph::new(text), inner);
        }
        Err(err) => {
            app.grid_origin = None;
            let message = Paragraph::new(format!("Terminal too small: {err}"))
                .style(theme.status_style(true))
                .wrap(Wrap { trim: true });
            frame.render_widget(message, inner);
        }
    }
}

fn draw_status(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let theme = app.theme;
    if app
        .toast
        .as_ref()
        .is_some_and(|toast| toast.expires_at <= Instant::now())
    {
        app.toast = None;
    }
    let (message, is_error) = match &app.toast {
        Some(toast) => (toast.message.clone(), toast.is_error),
        None => (app.controller.summary_message(), false),
    };
    let line = Line::from(vec![
        Span::styled(format!(" {message}"), theme.status_style(is_error)),
        Span::styled(format!(" | {KEY_HINTS}"), theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme.base_style()), area);
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    is_error: bool,
    expires_at: Instant,
}

struct App {
    controller: Controller,
    canvas: Option<Canvas>,
    /// Screen position of grid cell (0, 0), known after the grid was drawn.
    grid_origin: Option<(u16, u16)>,
    subjects_state: ListState,
    hover: Option<RenderId>,
    toast: Option<Toast>,
    theme: TuiTheme,
    export_dir: PathBuf,
    should_quit: bool,
}

impl App {
    fn new(controller: Controller, export_dir: PathBuf) -> Self {
        let mut subjects_state = ListState::default();
        if !controller.model().subjects().is_empty() {
            subjects_state.select(Some(0));
        }
        Self {
            controller,
            canvas: None,
            grid_origin: None,
            subjects_state,
            hover: None,
            toast: None,
            theme: TuiTheme::default(),
            export_dir,
            should_quit: false,
        }
    }

    fn grid_title(&self) -> String {
        let window = self.controller.model().window();
        let source = self.controller.model().source().unwrap_or("timetable");
        format!(
            "{source} · {}–{}",
            format_minutes(window.start_min()),
            format_minutes(window.end_min())
        )
    }

    /// Fits the controller to a `width` x `height` grid, renders it and returns styled text.
    fn render_grid(&mut self, width: usize, height: usize) -> Result<Text<'static>, InteractError> {
        let surface = self.controller.surface();
        if surface.width() != width || surface.height() != height {
            self.controller.resize(width, height)?;
        }

        let mut canvas = match self.canvas.take() {
            Some(canvas) if canvas.width() == width && canvas.height() == height => canvas,
            _ => Canvas::new(width, height)?,
        };
        self.controller.render(&mut canvas)?;
        let text = canvas_text(&canvas);
        self.canvas = Some(canvas);
        Ok(text)
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error: false,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error: true,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn handle_key_code(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_cursor_subject(),
            KeyCode::Char('c') => {
                self.controller.clear_selection();
                self.set_toast(MSG_CLEARED);
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let cell = self.grid_cell(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((x, y)) = cell {
                    self.click(x, y);
                }
            }
            MouseEventKind::Moved => {
                self.hover = cell.and_then(|(x, y)| self.controller.hit_test(x, y).cloned());
            }
            _ => {}
        }
    }

    /// Maps a screen position to grid cell coordinates.
    fn grid_cell(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let (x0, y0) = self.grid_origin?;
        let x = usize::from(column.checked_sub(x0)?);
        let y = usize::from(row.checked_sub(y0)?);
        let surface = self.controller.surface();
        (x < surface.width() && y < surface.height()).then_some((x, y))
    }

    fn click(&mut self, x: usize, y: usize) {
        match self.controller.click(x, y) {
            Ok(Some((id, selected))) => {
                if let Some(message) = self.controller.selection_message(id.as_str(), selected) {
                    self.set_toast(message);
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "click on stale geometry");
                self.set_error(err.to_string());
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.controller.model().subjects().len();
        if len == 0 {
            return;
        }
        let current = self.subjects_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.subjects_state.select(Some(next));
    }

    fn toggle_cursor_subject(&mut self) {
        let Some(subject) = self
            .subjects_state
            .selected()
            .and_then(|idx| self.controller.model().subjects().get(idx))
        else {
            return;
        };
        let code = subject.code().to_string();
        match self.controller.toggle_subject_visibility(&code) {
            Ok(Some(true)) => self.set_toast(format!("Showing {code}.")),
            Ok(Some(false)) => self.set_toast(format!("Hiding {code}.")),
            Ok(None) => {}
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn export(&mut self) {
        let image = match self.controller.export_selection() {
            Ok(image) => image,
            Err(InteractError::EmptySelectionExport) => {
                self.set_error(MSG_NOTHING_TO_EXPORT);
                return;
            }
            Err(err) => {
                self.set_error(format!("Export failed: {err}"));
                return;
            }
        };

        let source = self.controller.model().source().unwrap_or("timetable");
        let path = self.export_dir.join(format!("{}.ans", export_file_stem(source)));
        match write_export(&path, &image) {
            Ok(()) => {
                info!(path = %path.display(), "wrote export");
                self.set_toast(format!("Exported {}.", path.display()));
            }
            Err(err) => self.set_error(format!("Export failed: {err}")),
        }
    }
}

fn write_export(path: &Path, image: &ExportImage) -> io::Result<()> {
    fs::write(path, image.to_ansi()?)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;

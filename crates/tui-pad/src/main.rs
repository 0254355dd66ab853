//! Terminal notepad
//!
//! A minimal single-document text editor built with crossterm and ratatui on top of `pad-core`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tui-pad -- [file_path]
//! ```
//!
//! A path that does not exist yet starts an empty document that saves to it.
//!
//! # Keys
//!
//! - F10 / Alt+F / Alt+E / Alt+H: open the File / Edit / Help menus
//! - Ctrl+N / Ctrl+O / Ctrl+S / Ctrl+Shift+S / Ctrl+Q: New / Open / Save / Save As / Exit
//! - Ctrl+Z / Ctrl+Y: Undo / Redo
//! - Ctrl+X / Ctrl+C / Ctrl+V / Ctrl+A: Cut / Copy / Paste / Select All
//! - Ctrl+P: Print, F1: Help
//! - Arrows, Home/End, Ctrl+Home/End, PageUp/PageDown move the caret; hold Shift to select
//!
//! Logs are written to `<cache dir>/pad/pad.log`; set `RUST_LOG` to change the level.

mod clipboard;
mod keymap;
mod logging;
mod menu;
mod view;

use crate::clipboard::SystemClipboard;
use crate::menu::{MenuAction, MenuBar};
use crate::view::{TAB_WIDTH, cell_width, scroll_to_fit, visual_x};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use pad_core::{
    Command, CursorCommand, Dispatcher, EditCommand, GuardChoice, Notice, Outcome, PadConfig,
    Position, Prompt, Reply, Severity, SystemPrinter,
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::{
    env,
    io::{self, Write, stdout},
    ops::Range,
    path::{Path, PathBuf},
    time::Duration,
};

/// Modal overlay drawn over the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    None,
    /// Modal notification; any key dismisses it.
    Notice(Notice),
    /// Save / Don't Save / Cancel question.
    Confirm { message: String },
    /// Single-line file name entry.
    PathInput { title: &'static str, input: String },
}

/// Application state
struct App {
    /// Command dispatcher holding the document
    pad: Dispatcher,
    /// Menu bar
    menu: MenuBar,
    /// Current modal overlay
    overlay: Overlay,
    /// Whether to exit the main loop
    should_quit: bool,
    /// First visible line
    scroll_top: usize,
    /// First visible cell column
    scroll_left: usize,
    /// Text area size in cells (width, height)
    viewport: (usize, usize),
}

impl App {
    /// Create the application, optionally opening `path`.
    fn new(path: Option<&Path>) -> Self {
        let pad = Dispatcher::new(
            PadConfig::default(),
            Box::new(SystemClipboard::new()),
            Box::new(SystemPrinter::new()),
        );
        let mut app = Self::with_dispatcher(pad);
        if let Some(path) = path {
            let outcome = app.pad.open_initial(path);
            app.apply_outcome(outcome);
        }
        app
    }

    fn with_dispatcher(pad: Dispatcher) -> Self {
        Self {
            pad,
            menu: MenuBar::new(),
            overlay: Overlay::None,
            should_quit: false,
            scroll_top: 0,
            scroll_left: 0,
            viewport: (0, 0),
        }
    }

    /// Handle a key press.
    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.overlay != Overlay::None {
            self.handle_overlay_key(key);
            return;
        }

        if self.menu.is_open() {
            if let MenuAction::Run(command) = self.menu.handle_key(&key) {
                self.run(command);
            }
            return;
        }

        if self.menu.try_open(&key) {
            return;
        }

        match key.code {
            KeyCode::PageUp | KeyCode::PageDown => {
                let extend = key.modifiers.contains(KeyModifiers::SHIFT);
                let command = if key.code == KeyCode::PageUp {
                    CursorCommand::Up { extend }
                } else {
                    CursorCommand::Down { extend }
                };
                for _ in 0..self.viewport.1.max(1) {
                    self.run(Command::Cursor(command));
                }
            }
            _ => {
                if let Some(command) = keymap::command_for_key(&key) {
                    self.run(command);
                }
            }
        }
        self.adjust_scroll();
    }

    /// Bracketed paste from the terminal: typed in as a single edit.
    fn handle_paste(&mut self, text: String) {
        if self.overlay != Overlay::None || self.menu.is_open() {
            if let Overlay::PathInput { input, .. } = &mut self.overlay {
                input.push_str(text.trim_end_matches(['\r', '\n']));
            }
            return;
        }
        let text = pasted_line_endings(&text);
        self.run(Command::Edit(EditCommand::InsertText { text }));
        self.adjust_scroll();
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match &mut self.overlay {
            Overlay::None => {}
            Overlay::Notice(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.overlay = Overlay::None;
                }
            }
            Overlay::Confirm { .. } => {
                let choice = match key.code {
                    KeyCode::Char('s' | 'S' | 'y' | 'Y') | KeyCode::Enter => GuardChoice::Save,
                    KeyCode::Char('d' | 'D' | 'n' | 'N') => GuardChoice::Discard,
                    KeyCode::Char('c' | 'C') | KeyCode::Esc => GuardChoice::Cancel,
                    _ => return,
                };
                self.overlay = Overlay::None;
                self.resume(Reply::Choice(choice));
            }
            Overlay::PathInput { input, .. } => match key.code {
                KeyCode::Esc => {
                    self.overlay = Overlay::None;
                    self.resume(Reply::Cancel);
                }
                KeyCode::Enter => {
                    let entered = input.trim();
                    if entered.is_empty() {
                        return;
                    }
                    let path = PathBuf::from(entered);
                    self.overlay = Overlay::None;
                    self.resume(Reply::Path(path));
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    input.push(c);
                }
                _ => {}
            },
        }
        self.adjust_scroll();
    }

    fn run(&mut self, command: Command) {
        let outcome = self.pad.dispatch(command);
        self.apply_outcome(outcome);
    }

    fn resume(&mut self, reply: Reply) {
        let outcome = self.pad.resume(reply);
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Done => {}
            Outcome::Prompt(prompt) => self.overlay = self.overlay_for(prompt),
            Outcome::Notify(notice) => self.overlay = Overlay::Notice(notice),
            Outcome::Exit => self.should_quit = true,
        }
    }

    fn overlay_for(&self, prompt: Prompt) -> Overlay {
        match prompt {
            Prompt::SaveChanges { message } => Overlay::Confirm { message },
            Prompt::OpenPath => Overlay::PathInput {
                title: "Open",
                input: String::new(),
            },
            Prompt::SavePath { suggested } => Overlay::PathInput {
                title: "Save As",
                input: suggested
                    .map(|path| path.display().to_string())
                    .unwrap_or_default(),
            },
        }
    }

    /// Keep the caret inside the viewport.
    fn adjust_scroll(&mut self) {
        let (width, height) = self.viewport;
        let editor = self.pad.editor();
        let cursor = editor.cursor_position();
        let line = editor.line_text(cursor.line).unwrap_or_default();

        self.scroll_top = scroll_to_fit(cursor.line, self.scroll_top, height)
            .min(editor.line_count().saturating_sub(1));
        self.scroll_left = scroll_to_fit(visual_x(&line, cursor.column), self.scroll_left, width);
    }

    /// Window title.
    fn title(&self) -> String {
        self.pad.title()
    }

    /// Render UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // menu bar
                Constraint::Min(1),    // text area
                Constraint::Length(1), // status line
                Constraint::Length(1), // key hints
            ])
            .split(frame.area());

        let editor_area = chunks[1];
        let viewport = (
            editor_area.width.saturating_sub(2) as usize,
            editor_area.height.saturating_sub(2) as usize,
        );
        if viewport != self.viewport {
            self.viewport = viewport;
            self.adjust_scroll();
        }

        self.menu.render_bar(frame, chunks[0], &self.title());
        self.render_editor(frame, editor_area);
        self.render_status_line(frame, chunks[2]);
        self.render_shortcuts(frame, chunks[3]);

        self.menu.render_dropdown(frame, chunks[0]);
        self.render_overlay(frame);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let editor = self.pad.editor();
        let selection = editor.selection().range();
        let width = inner.width as usize;

        let lines: Vec<Line> = (0..inner.height as usize)
            .map(|row| {
                let line_index = self.scroll_top + row;
                match editor.line_text(line_index) {
                    Some(text) => {
                        let line_start = editor.position_to_offset(Position::new(line_index, 0));
                        self.render_line(&text, line_start, &selection, width)
                    }
                    None => Line::default(),
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if self.overlay != Overlay::None || self.menu.is_open() {
            return;
        }

        let cursor = editor.cursor_position();
        let Some(row) = cursor.line.checked_sub(self.scroll_top) else {
            return;
        };
        let line = editor.line_text(cursor.line).unwrap_or_default();
        let Some(x) = visual_x(&line, cursor.column).checked_sub(self.scroll_left) else {
            return;
        };
        if row < inner.height as usize && x < width.max(1) {
            frame.set_cursor_position((inner.x + x as u16, inner.y + row as u16));
        }
    }

    /// One text row, clipped horizontally, selection highlighted.
    fn render_line(
        &self,
        text: &str,
        line_start: usize,
        selection: &Range<usize>,
        width: usize,
    ) -> Line<'static> {
        let selected_style = Style::default().bg(Color::Blue).fg(Color::White);
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_selected = false;
        let mut x = 0;

        for (index, c) in text.chars().enumerate() {
            let w = cell_width(c);
            let visible_from = self.scroll_left.max(x);
            x += w;
            if x <= self.scroll_left {
                continue;
            }
            if x > self.scroll_left + width {
                break;
            }

            let selected = selection.contains(&(line_start + index));
            if selected != run_selected && !run.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut run),
                    if run_selected { selected_style } else { Style::default() },
                ));
            }
            run_selected = selected;

            let shown = x - visible_from;
            match c {
                '\t' => run.push_str(&" ".repeat(shown.min(TAB_WIDTH))),
                c if c.is_control() => run.push('?'),
                // Wide character cut by the left edge.
                _ if shown < w => run.push_str(&" ".repeat(shown)),
                c => run.push(c),
            }
        }

        if !run.is_empty() {
            spans.push(Span::styled(
                run,
                if run_selected { selected_style } else { Style::default() },
            ));
        }

        // Mark a selected line break with one highlighted cell.
        let line_end = line_start + text.chars().count();
        if selection.contains(&line_end) && x >= self.scroll_left && x < self.scroll_left + width {
            spans.push(Span::styled(" ", selected_style));
        }

        Line::from(spans)
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let editor = self.pad.editor();
        let cursor = editor.cursor_position();
        let state = self.pad.document().state();

        let mut status = format!(
            "Ln {}, Col {} | {} lines, {} chars",
            cursor.line + 1,
            cursor.column + 1,
            state.line_count,
            state.char_count
        );
        if !editor.selection().is_empty() {
            status.push_str(&format!(" | {} selected", editor.selection().range().len()));
        }
        if state.is_modified {
            status.push_str(" | Modified");
        }

        let status_line = Paragraph::new(status).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = match (&self.overlay, self.menu.open_menu()) {
            (Overlay::Notice(_), _) => "Enter/Esc: Close".to_string(),
            (Overlay::Confirm { .. }, _) => "S: Save  D: Don't Save  Esc: Cancel".to_string(),
            (Overlay::PathInput { .. }, _) => "Enter: OK  Esc: Cancel".to_string(),
            (Overlay::None, Some(menu)) => format!(
                "{}: Up/Down Select  Enter Run  Left/Right Switch  Esc Close",
                menu.title
            ),
            (Overlay::None, None) => {
                "F10: Menu  Ctrl-S: Save  Ctrl-O: Open  Ctrl-Q: Exit  Ctrl-Z/Y: Undo/Redo  F1: Help"
                    .to_string()
            }
        };

        let shortcuts_line =
            Paragraph::new(shortcuts).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(shortcuts_line, area);
    }

    fn render_overlay(&self, frame: &mut Frame) {
        let screen = frame.area();
        match &self.overlay {
            Overlay::None => {}
            Overlay::Notice(notice) => {
                let color = match notice.severity {
                    Severity::Info => Color::Cyan,
                    Severity::Warning => Color::Yellow,
                    Severity::Error => Color::LightRed,
                };
                let height = notice.message.lines().count() as u16 + 2;
                let width = notice
                    .message
                    .lines()
                    .map(|line| line.chars().count())
                    .chain([notice.title.chars().count()])
                    .max()
                    .unwrap_or(0) as u16
                    + 4;
                let area = centered_rect(width, height, screen);
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(Span::styled(
                        format!(" {} ", notice.title),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ));
                frame.render_widget(Clear, area);
                frame.render_widget(
                    Paragraph::new(notice.message.as_str())
                        .block(block)
                        .wrap(Wrap { trim: false }),
                    area,
                );
            }
            Overlay::Confirm { message } => {
                let text = vec![
                    Line::from(message.as_str()),
                    Line::default(),
                    Line::from("[S]ave   [D]on't Save   [Esc] Cancel"),
                ];
                let width = message.chars().count().max(36) as u16 + 4;
                let area = centered_rect(width, 5, screen);
                frame.render_widget(Clear, area);
                frame.render_widget(
                    Paragraph::new(text)
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title(format!(" {} ", self.pad.config().app_name)),
                        )
                        .wrap(Wrap { trim: false }),
                    area,
                );
            }
            Overlay::PathInput { title, input } => {
                let filters = self
                    .pad
                    .config()
                    .file_filters
                    .iter()
                    .map(|filter| format!("{} ({})", filter.label, filter.pattern))
                    .collect::<Vec<_>>()
                    .join(" | ");
                let width = (screen.width.saturating_sub(4)).min(72);
                let area = centered_rect(width, 4, screen);
                let inner_width = area.width.saturating_sub(2) as usize;

                // Keep the end of a long path visible.
                let prompt = format!("> {input}");
                let skip = prompt.chars().count().saturating_sub(inner_width.saturating_sub(1));
                let shown: String = prompt.chars().skip(skip).collect();

                frame.render_widget(Clear, area);
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(shown.clone()),
                        Line::styled(filters, Style::default().fg(Color::DarkGray)),
                    ])
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(format!(" {title} ")),
                    ),
                    area,
                );
                let cursor_x = area.x + 1 + shown.chars().count() as u16;
                frame.set_cursor_position((
                    cursor_x.min(area.right().saturating_sub(2)),
                    area.y + 1,
                ));
            }
        }
    }
}

/// Terminals deliver pasted line breaks as bare `\r`; turn those into `\n` and keep `\r\n`.
fn pasted_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' && chars.peek() != Some(&'\n') {
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

/// Rectangle of at most `width` x `height` centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn main() -> anyhow::Result<()> {
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    let path = env::args_os().nth(1).map(PathBuf::from);
    let mut app = App::new(path.as_deref());

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal loop failed");
    }
    result.map_err(Into::into)
}

fn run_app<B: Backend + Write>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut shown_title = String::new();

    loop {
        let title = app.title();
        if title != shown_title {
            execute!(terminal.backend_mut(), SetTitle(&title))?;
            shown_title = title;
        }

        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Paste(text) => app.handle_paste(text),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    Ok(())
}

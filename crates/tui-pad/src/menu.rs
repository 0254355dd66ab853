//! Menu bar: File / Edit / Help.
//!
//! F10 opens the first menu, Alt+<mnemonic> opens a specific one. While a menu is open,
//! Left/Right switch menus, Up/Down move the highlight, Enter runs the item and Esc closes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pad_core::{Command, EditCommand, FileCommand};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

/// One entry in a drop-down menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: &'static str,
    pub accelerator: &'static str,
    pub command: Command,
}

/// A top-level menu.
#[derive(Debug, Clone)]
pub struct Menu {
    pub title: &'static str,
    pub mnemonic: char,
    pub items: Vec<MenuItem>,
}

fn item(label: &'static str, accelerator: &'static str, command: Command) -> MenuItem {
    MenuItem {
        label,
        accelerator,
        command,
    }
}

/// The editor's menus.
pub fn menus() -> Vec<Menu> {
    vec![
        Menu {
            title: "File",
            mnemonic: 'f',
            items: vec![
                item("New", "Ctrl+N", Command::File(FileCommand::New)),
                item("Open...", "Ctrl+O", Command::File(FileCommand::Open)),
                item("Save", "Ctrl+S", Command::File(FileCommand::Save)),
                item("Save As...", "Ctrl+Shift+S", Command::File(FileCommand::SaveAs)),
                item("Exit", "Ctrl+Q", Command::File(FileCommand::Exit)),
            ],
        },
        Menu {
            title: "Edit",
            mnemonic: 'e',
            items: vec![
                item("Undo", "Ctrl+Z", Command::Edit(EditCommand::Undo)),
                item("Redo", "Ctrl+Y", Command::Edit(EditCommand::Redo)),
                item("Cut", "Ctrl+X", Command::Edit(EditCommand::Cut)),
                item("Copy", "Ctrl+C", Command::Edit(EditCommand::Copy)),
                item("Paste", "Ctrl+V", Command::Edit(EditCommand::Paste)),
                item("Select All", "Ctrl+A", Command::Edit(EditCommand::SelectAll)),
                item("Print", "Ctrl+P", Command::Edit(EditCommand::Print)),
            ],
        },
        Menu {
            title: "Help",
            mnemonic: 'h',
            items: vec![item("Help", "F1", Command::Help)],
        },
    ]
}

/// Result of a key press while a menu is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Key consumed, menu still open.
    Consumed,
    /// Menu closed without running anything.
    Closed,
    /// Menu closed; run this command.
    Run(Command),
}

/// Menu bar state.
pub struct MenuBar {
    menus: Vec<Menu>,
    open: Option<usize>,
    selected: usize,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: menus(),
            open: None,
            selected: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_menu(&self) -> Option<&Menu> {
        self.open.map(|index| &self.menus[index])
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn open(&mut self, index: usize) {
        if index < self.menus.len() {
            self.open = Some(index);
            self.selected = 0;
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Open the menu bound to F10 / Alt+<mnemonic>. Returns `false` if the key is not a menu key.
    pub fn try_open(&mut self, key: &KeyEvent) -> bool {
        let index = match key.code {
            KeyCode::F(10) => Some(0),
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
                let c = c.to_ascii_lowercase();
                self.menus.iter().position(|menu| menu.mnemonic == c)
            }
            _ => None,
        };
        match index {
            Some(index) => {
                self.open(index);
                true
            }
            None => false,
        }
    }

    /// Handle a key while a menu is open.
    pub fn handle_key(&mut self, key: &KeyEvent) -> MenuAction {
        let Some(open) = self.open else {
            return MenuAction::Closed;
        };
        let count = self.menus.len();
        let items = self.menus[open].items.len();

        match key.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                MenuAction::Closed
            }
            KeyCode::Left => {
                self.open((open + count - 1) % count);
                MenuAction::Consumed
            }
            KeyCode::Right => {
                self.open((open + 1) % count);
                MenuAction::Consumed
            }
            KeyCode::Up => {
                self.selected = (self.selected + items - 1) % items;
                MenuAction::Consumed
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % items;
                MenuAction::Consumed
            }
            KeyCode::Enter => {
                let command = self.menus[open].items[self.selected].command.clone();
                self.close();
                MenuAction::Run(command)
            }
            _ => MenuAction::Consumed,
        }
    }

    /// Render the one-line bar.
    pub fn render_bar(&self, frame: &mut Frame, area: Rect, title: &str) {
        let bar_style = Style::default().bg(Color::Gray).fg(Color::Black);
        let mut spans = Vec::with_capacity(self.menus.len() * 2 + 1);
        for (index, menu) in self.menus.iter().enumerate() {
            let style = if self.open == Some(index) {
                bar_style.bg(Color::Blue).fg(Color::White)
            } else {
                bar_style
            };
            spans.push(Span::styled(format!(" {} ", menu.title), style));
        }

        let used: usize = self.menus.iter().map(|m| m.title.len() + 2).sum();
        let padding = (area.width as usize).saturating_sub(used + title.chars().count() + 1);
        spans.push(Span::styled(" ".repeat(padding), bar_style));
        spans.push(Span::styled(
            format!("{title} "),
            bar_style.add_modifier(Modifier::BOLD),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);
    }

    /// Render the open drop-down below the bar.
    pub fn render_dropdown(&self, frame: &mut Frame, bar: Rect) {
        let Some(open) = self.open else {
            return;
        };
        let menu = &self.menus[open];

        let x_offset: usize = self.menus[..open].iter().map(|m| m.title.len() + 2).sum();
        let label_width = menu.items.iter().map(|i| i.label.len()).max().unwrap_or(0);
        let accel_width = menu.items.iter().map(|i| i.accelerator.len()).max().unwrap_or(0);
        let width = (label_width + accel_width + 6) as u16;
        let height = menu.items.len() as u16 + 2;

        let screen = frame.area();
        let x = (bar.x + x_offset as u16).min(screen.width.saturating_sub(width));
        let area = Rect::new(x, bar.y + 1, width, height).intersection(screen);

        let items: Vec<ListItem> = menu
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let text = format!(
                    " {:<label_width$}  {:>accel_width$} ",
                    item.label, item.accelerator
                );
                let style = if index == self.selected() {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(text).style(style)
            })
            .collect();

        frame.render_widget(Clear, area);
        frame.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_f10_opens_file_menu() {
        let mut bar = MenuBar::new();
        assert!(bar.try_open(&key(KeyCode::F(10))));
        assert_eq!(bar.open_menu().map(|m| m.title), Some("File"));
    }

    #[test]
    fn test_alt_mnemonic_opens_menu() {
        let mut bar = MenuBar::new();
        assert!(bar.try_open(&KeyEvent::new(KeyCode::Char('e'), KeyModifiers::ALT)));
        assert_eq!(bar.open_menu().map(|m| m.title), Some("Edit"));
        assert!(!MenuBar::new().try_open(&KeyEvent::new(KeyCode::Char('z'), KeyModifiers::ALT)));
    }

    #[test]
    fn test_navigate_and_run() {
        let mut bar = MenuBar::new();
        bar.open(0);
        bar.handle_key(&key(KeyCode::Down));
        bar.handle_key(&key(KeyCode::Down));
        assert_eq!(bar.selected(), 2);
        assert_eq!(
            bar.handle_key(&key(KeyCode::Enter)),
            MenuAction::Run(Command::File(FileCommand::Save))
        );
        assert!(!bar.is_open());
    }

    #[test]
    fn test_up_wraps_and_left_switches_menu() {
        let mut bar = MenuBar::new();
        bar.open(0);
        bar.handle_key(&key(KeyCode::Up));
        assert_eq!(bar.selected(), 4);
        bar.handle_key(&key(KeyCode::Left));
        assert_eq!(bar.open_menu().map(|m| m.title), Some("Help"));
        assert_eq!(bar.selected(), 0);
    }

    #[test]
    fn test_escape_closes() {
        let mut bar = MenuBar::new();
        bar.open(1);
        assert_eq!(bar.handle_key(&key(KeyCode::Esc)), MenuAction::Closed);
        assert!(!bar.is_open());
    }

    #[test]
    fn test_every_menu_command_has_an_accelerator() {
        for menu in menus() {
            for item in menu.items {
                assert!(!item.accelerator.is_empty(), "{} has no accelerator", item.label);
            }
        }
    }
}

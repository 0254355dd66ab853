//! Keyboard accelerators and editing keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pad_core::{Command, CursorCommand, EditCommand, FileCommand};

/// Translate a key press into an editor command.
///
/// Returns `None` for keys handled by the frontend itself (menus, paging) or not bound at all.
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    let mods = key.modifiers;
    let ctrl = mods.contains(KeyModifiers::CONTROL);
    let shift = mods.contains(KeyModifiers::SHIFT);
    let alt = mods.contains(KeyModifiers::ALT);

    if ctrl
        && !alt
        && let KeyCode::Char(c) = key.code
    {
        // Some terminals report Ctrl+Shift+S as an uppercase 'S' without SHIFT.
        let shift = shift || c.is_ascii_uppercase();
        return accelerator(c.to_ascii_lowercase(), shift);
    }

    let command = match key.code {
        KeyCode::F(1) => Command::Help,
        KeyCode::Left => Command::Cursor(CursorCommand::Left { extend: shift }),
        KeyCode::Right => Command::Cursor(CursorCommand::Right { extend: shift }),
        KeyCode::Up => Command::Cursor(CursorCommand::Up { extend: shift }),
        KeyCode::Down => Command::Cursor(CursorCommand::Down { extend: shift }),
        KeyCode::Home if ctrl => Command::Cursor(CursorCommand::DocumentStart { extend: shift }),
        KeyCode::End if ctrl => Command::Cursor(CursorCommand::DocumentEnd { extend: shift }),
        KeyCode::Home => Command::Cursor(CursorCommand::LineStart { extend: shift }),
        KeyCode::End => Command::Cursor(CursorCommand::LineEnd { extend: shift }),
        KeyCode::Backspace => Command::Edit(EditCommand::Backspace),
        KeyCode::Delete => Command::Edit(EditCommand::DeleteForward),
        KeyCode::Enter => insert("\n"),
        KeyCode::Tab => insert("\t"),
        KeyCode::Char(c) if !ctrl && !alt => insert(&c.to_string()),
        _ => return None,
    };
    Some(command)
}

fn accelerator(c: char, shift: bool) -> Option<Command> {
    let command = match (c, shift) {
        ('n', false) => Command::File(FileCommand::New),
        ('o', false) => Command::File(FileCommand::Open),
        ('s', false) => Command::File(FileCommand::Save),
        ('s', true) => Command::File(FileCommand::SaveAs),
        ('q', false) => Command::File(FileCommand::Exit),
        ('z', false) => Command::Edit(EditCommand::Undo),
        ('y', false) => Command::Edit(EditCommand::Redo),
        ('x', false) => Command::Edit(EditCommand::Cut),
        ('c', false) => Command::Edit(EditCommand::Copy),
        ('v', false) => Command::Edit(EditCommand::Paste),
        ('a', false) => Command::Edit(EditCommand::SelectAll),
        ('p', false) => Command::Edit(EditCommand::Print),
        _ => return None,
    };
    Some(command)
}

fn insert(text: &str) -> Command {
    Command::Edit(EditCommand::InsertText {
        text: text.to_string(),
    })
}

//! Reading a secret from the terminal without echoing it.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Read one line from the terminal with echo turned off.
///
/// Returns `None` when the user gives up: Ctrl-C, Esc, or Ctrl-D on an empty
/// line. The caller prints the prompt and the trailing newline.
pub fn read_hidden_line() -> io::Result<Option<String>> {
    terminal::enable_raw_mode()?;
    let line = collect_line(std::iter::from_fn(|| Some(event::read())));
    terminal::disable_raw_mode()?;
    line
}

fn collect_line(
    events: impl IntoIterator<Item = io::Result<Event>>,
) -> io::Result<Option<String>> {
    let mut line = String::new();
    for event in events {
        let key = match event? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Paste(text) => {
                line.push_str(&text);
                continue;
            }
            _ => continue,
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return Ok(Some(line)),
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if ctrl => return Ok(None),
            KeyCode::Char('d') if ctrl => {
                if line.is_empty() {
                    return Ok(None);
                }
            }
            KeyCode::Char(c) if !ctrl => line.push(c),
            KeyCode::Backspace => {
                line.pop();
            }
            _ => {}
        }
    }
    Ok(None)
}

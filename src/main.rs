mod app;
mod braille;
mod coins;
mod config;
mod data;
mod error;
mod map;
mod selection;
mod table;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use coins::{SortKey, FIRST_YEAR, LAST_YEAR};
use config::Config;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use selection::{Command, SelectionState};

fn main() -> Result<()> {
    let config = Config::parse();
    config::init_logging(config.log_file.as_deref())?;

    // Load before touching the terminal; handlers only run once data is in
    let dataset = data::load_all(&config.data_dir);
    let state = SelectionState::new(config.year, &config.country);

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, dataset, state);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Map a sort key press to its command: lowercase ascending, uppercase descending
fn sort_command(c: char) -> Option<Command> {
    let key = match c.to_ascii_lowercase() {
        'y' => SortKey::Year,
        'p' => SortKey::Price,
        'm' => SortKey::Mintage,
        _ => return None,
    };
    Some(Command::SetSort {
        key,
        ascending: c.is_ascii_lowercase(),
    })
}

/// Handle mouse events: click to select, hover for details, wheel to scroll
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.wheel(mouse.column, mouse.row, 1),
        MouseEventKind::ScrollUp => app.wheel(mouse.column, mouse.row, -1),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, dataset: data::Dataset, state: SelectionState) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(dataset, state, size.width, size.height);

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Every input is fully handled before the next read
        match event::read()? {
            Event::Key(key) => {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                        // Timeline
                        KeyCode::Left | KeyCode::Char('h') => app.step_year(-1),
                        KeyCode::Right | KeyCode::Char('l') => app.step_year(1),
                        KeyCode::Home => app.dispatch(Command::SelectYear(FIRST_YEAR)),
                        KeyCode::End => app.dispatch(Command::SelectYear(LAST_YEAR)),

                        // Table scrolling
                        KeyCode::Down | KeyCode::Char('j') => app.scroll_table(1),
                        KeyCode::Up | KeyCode::Char('k') => app.scroll_table(-1),
                        KeyCode::PageDown => app.scroll_table(5),
                        KeyCode::PageUp => app.scroll_table(-5),

                        KeyCode::Char(c) => {
                            if let Some(command) = sort_command(c) {
                                app.dispatch(command);
                            }
                        }

                        _ => {}
                    }
                }
            }
            Event::Mouse(mouse) => {
                handle_mouse(&mut app, mouse);
            }
            Event::Resize(width, height) => {
                app.resize(width, height);
            }
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_keys() {
        assert_eq!(
            sort_command('p'),
            Some(Command::SetSort {
                key: SortKey::Price,
                ascending: true
            })
        );
        assert_eq!(
            sort_command('M'),
            Some(Command::SetSort {
                key: SortKey::Mintage,
                ascending: false
            })
        );
        assert_eq!(sort_command('x'), None);
    }
}

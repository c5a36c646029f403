pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::tty::IsTty;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, ModfetchError, Result};
use crate::domain::{Entry, OwnershipIndex};
use crate::downloader::DownloadOutcome;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Whether the terminal can host the interactive browser.
pub fn is_supported() -> bool {
    io::stdout().is_tty()
}

/// Capability query run at startup, before any network access.
pub fn ensure_supported() -> Result<()> {
    if is_supported() {
        Ok(())
    } else {
        Err(ModfetchError::Ui(
            "stdout is not a terminal; run from an interactive shell or drop --interactive".into(),
        ))
    }
}

pub async fn run(ctx: &AppContext, entries: Vec<Entry>, owned: OwnershipIndex) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, entries, owned).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    ctx: &AppContext,
    entries: Vec<Entry>,
    owned: OwnershipIndex,
) -> Result<()> {
    let mut app = TuiApp::new(entries, owned);
    let event_handler = EventHandler::new(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| layout::render(frame, &app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match Action::from(key) {
                Action::Quit => {
                    app.should_quit = true;
                }
                Action::MoveUp => {
                    app.move_up();
                }
                Action::MoveDown => {
                    app.move_down();
                }
                Action::Download => {
                    if let Some(entry) = app.selected_entry().cloned() {
                        app.is_downloading = true;
                        app.set_status(format!("Downloading {}...", entry.filename));
                        terminal.draw(|frame| layout::render(frame, &app))?;

                        let outcome = ctx
                            .downloader
                            .download(&entry, &ctx.settings.output_dir)
                            .await;
                        app.is_downloading = false;

                        match outcome {
                            Ok(DownloadOutcome::Downloaded) => {
                                app.mark_selected_owned();
                                app.set_status(format!("Downloaded {}", entry.filename));
                            }
                            Ok(DownloadOutcome::AlreadyOwned) => {
                                app.mark_selected_owned();
                                app.set_status(format!(
                                    "{} is already downloaded",
                                    entry.filename
                                ));
                            }
                            Err(e) => {
                                app.set_status(format!("Download failed: {}", e));
                            }
                        }
                    }
                }
                Action::Stream => {
                    if let Some(entry) = app.selected_entry() {
                        let url = entry.stream_url.clone();
                        let title = entry.display_title().to_string();
                        let status = match open::that(&url) {
                            Ok(()) => format!("Streaming {} in the browser", title),
                            Err(e) => format!("Failed to open browser: {}", e),
                        };
                        app.set_status(status);
                    }
                }
                Action::OpenPage => {
                    if let Some(entry) = app.selected_entry() {
                        let url = entry.page_url.clone();
                        let status = match open::that(&url) {
                            Ok(()) => format!("Opened {}", url),
                            Err(e) => format!("Failed to open browser: {}", e),
                        };
                        app.set_status(status);
                    }
                }
                Action::None => {}
            },
            AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

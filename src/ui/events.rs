use crate::aws::Request;
use crate::types::LogsOutcome;
use crate::ui::app::{App, Mode};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Everything the UI loop reacts to: key input plus completion events from
/// background requests. Completion events carry the sequence number of the
/// request that produced them.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    ClustersLoaded {
        seq: u64,
        result: Result<Vec<String>, String>,
    },
    ServicesLoaded {
        seq: u64,
        result: Result<Vec<String>, String>,
    },
    LogsLoaded {
        seq: u64,
        outcome: LogsOutcome,
    },
    RedeployDone {
        service: String,
        result: Result<(), String>,
    },
}

/// Forward terminal key events into the app channel.
pub async fn event_loop(tx: mpsc::Sender<AppEvent>) {
    use crossterm::event::EventStream;

    let mut event_stream = EventStream::new();
    while let Some(Ok(event)) = event_stream.next().await {
        if let Event::Key(key) = event
            && tx.send(AppEvent::Key(key)).await.is_err()
        {
            break;
        }
    }
}

/// Handle one key event; a returned request is spawned by the caller.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Request> {
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::RegionPicker => handle_region_picker(app, key),
        Mode::Help => {
            app.mode = Mode::Normal;
            None
        }
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Request> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('Q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.should_quit = true;
            None
        }
        (KeyCode::Char('r'), _) => {
            app.open_region_picker();
            None
        }
        (KeyCode::Char('d'), _) => app.redeploy_selected(),
        (KeyCode::Char('t'), _) => {
            app.show_timestamps = !app.show_timestamps;
            None
        }
        (KeyCode::Char('?'), _) => {
            app.mode = Mode::Help;
            None
        }
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
            app.toggle_focus();
            None
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
            app.move_up();
            None
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
            app.move_down();
            None
        }
        (KeyCode::Enter, _) => app.activate_highlighted(),
        (KeyCode::PageUp, _) => {
            app.logs_page_up(20);
            None
        }
        (KeyCode::PageDown, _) => {
            app.logs_page_down(20);
            None
        }
        _ => None,
    }
}

fn handle_region_picker(app: &mut App, key: KeyEvent) -> Option<Request> {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.region_picker_previous();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.region_picker_next();
            None
        }
        KeyCode::Enter => app.confirm_region_pick(),
        _ => None,
    }
}

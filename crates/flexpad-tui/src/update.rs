//! TUI reducer (update function).
//!
//! All view-state changes happen here. The runtime calls `update(app, event)`
//! and executes the returned effects; document I/O never happens in this
//! module.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flexpad_core::DocumentOutcome;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::mutations::StateMutation;
use crate::overlays::{OverlayExt, OverlayRequest, OverlayTransition, OverlayUpdate};
use crate::render;
use crate::state::{AppState, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            app.tui.viewport = render::editor_viewport(width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::AutosaveDue => vec![UiEffect::Autosave],
        UiEvent::Document { outcome, snapshot } => {
            if outcome == DocumentOutcome::Quit {
                app.tui.should_quit = true;
            }
            app.tui.status.on_outcome(&outcome);
            app.tui.apply_snapshot(snapshot);
            vec![]
        }
    };

    let tui = &mut app.tui;
    tui.editor.scroll_to_cursor(tui.viewport, tui.wrap);
    effects
}

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        mutation.apply(tui);
    }
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    apply_mutations(&mut app.tui, update.mutations);
    if update.transition == OverlayTransition::Close {
        app.overlay = None;
    }
    update.effects
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => handle_paste(app, &text),
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    if app.overlay.is_some() || text.is_empty() {
        return vec![];
    }
    app.tui.editor.buffer.paste(text);
    vec![UiEffect::ContentChanged]
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(key);
        return apply_overlay_update(app, update);
    }

    if let Some(effects) = handle_shortcut(app, key) {
        return effects;
    }

    let tui = &mut app.tui;
    match key.code {
        KeyCode::PageUp => {
            tui.editor.buffer.page_up(tui.viewport.height);
            vec![]
        }
        KeyCode::PageDown => {
            tui.editor.buffer.page_down(tui.viewport.height);
            vec![]
        }
        KeyCode::Esc => {
            tui.status.clear();
            vec![]
        }
        _ => {
            if tui.editor.buffer.input(key) {
                vec![UiEffect::ContentChanged]
            } else {
                vec![]
            }
        }
    }
}

/// Window-level shortcuts. Returns `None` for keys meant for the text area.
fn handle_shortcut(app: &mut AppState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    if key.code == KeyCode::F(1) {
        app.overlay.open_or_focus(OverlayRequest::FileMenu, &app.tui);
        return Some(vec![]);
    }

    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };

    let effects = match c.to_ascii_lowercase() {
        's' => vec![UiEffect::Save],
        'o' => vec![UiEffect::Open],
        'n' => vec![UiEffect::NewDocument],
        'q' => vec![UiEffect::Close],
        'f' => {
            app.overlay.open_or_focus(OverlayRequest::FileMenu, &app.tui);
            vec![]
        }
        't' => {
            app.overlay.open_or_focus(OverlayRequest::Format, &app.tui);
            vec![]
        }
        'l' => {
            StateMutation::ToggleAppearance.apply(&mut app.tui);
            vec![]
        }
        _ => return None,
    };
    Some(effects)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use flexpad_core::config::{Appearance, Config, FontWeight};
    use flexpad_core::{DocumentStats, SaveTrigger};

    use super::*;
    use crate::events::DocumentSnapshot;
    use crate::overlays::Overlay;

    fn snapshot(title: &str, dirty: bool, content: Option<&str>) -> DocumentSnapshot {
        DocumentSnapshot {
            title: title.to_string(),
            stats: DocumentStats::default(),
            dirty,
            content: content.map(str::to_string),
        }
    }

    fn app() -> AppState {
        let mut app = AppState::new(
            &Config::default(),
            "hello",
            snapshot("FlexPad - Text Editor", false, None),
        );
        update(
            &mut app,
            UiEvent::Frame {
                width: 40,
                height: 12,
            },
        );
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    #[test]
    fn typing_reports_content_change() {
        let mut app = app();
        assert_eq!(
            update(&mut app, key(KeyCode::Char('!'))),
            vec![UiEffect::ContentChanged]
        );
        assert_eq!(app.tui.editor.text(), "!hello");
    }

    #[test]
    fn navigation_is_not_an_edit() {
        let mut app = app();
        assert!(update(&mut app, key(KeyCode::End)).is_empty());
        assert!(update(&mut app, key(KeyCode::PageDown)).is_empty());
        assert_eq!(app.tui.editor.text(), "hello");
    }

    #[test]
    fn document_shortcuts() {
        let mut app = app();
        assert_eq!(update(&mut app, ctrl('s')), vec![UiEffect::Save]);
        assert_eq!(update(&mut app, ctrl('o')), vec![UiEffect::Open]);
        assert_eq!(update(&mut app, ctrl('n')), vec![UiEffect::NewDocument]);
        assert_eq!(update(&mut app, ctrl('q')), vec![UiEffect::Close]);
        assert_eq!(app.tui.editor.text(), "hello");
    }

    #[test]
    fn toggle_appearance() {
        let mut app = app();
        assert_eq!(app.tui.appearance, Appearance::Dark);
        update(&mut app, ctrl('l'));
        assert_eq!(app.tui.appearance, Appearance::Light);
        update(&mut app, ctrl('l'));
        assert_eq!(app.tui.appearance, Appearance::Dark);
    }

    #[test]
    fn file_menu_routes_keys_and_closes() {
        let mut app = app();
        update(&mut app, ctrl('f'));
        assert!(matches!(app.overlay, Some(Overlay::FileMenu(_))));

        // Typing goes to the menu, not the text area.
        assert_eq!(update(&mut app, key(KeyCode::Char('s'))), vec![UiEffect::Save]);
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.editor.text(), "hello");
    }

    #[test]
    fn format_overlay_applies_choices() {
        let mut app = app();
        update(&mut app, ctrl('t'));
        assert!(matches!(app.overlay, Some(Overlay::Format(_))));

        update(&mut app, key(KeyCode::Right));
        update(&mut app, key(KeyCode::Enter));
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.font_weight, FontWeight::Bold);
    }

    #[test]
    fn paste_is_an_edit() {
        let mut app = app();
        assert_eq!(
            update(&mut app, UiEvent::Terminal(Event::Paste("a\r\nb".into()))),
            vec![UiEffect::ContentChanged]
        );
        assert_eq!(app.tui.editor.text(), "a\nbhello");
    }

    #[test]
    fn autosave_due_requests_autosave() {
        let mut app = app();
        assert_eq!(update(&mut app, UiEvent::AutosaveDue), vec![UiEffect::Autosave]);
    }

    #[test]
    fn document_outcome_updates_view() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Document {
                outcome: DocumentOutcome::Opened(PathBuf::from("/tmp/notes.txt")),
                snapshot: snapshot("FlexPad - notes.txt", false, Some("from disk")),
            },
        );
        assert_eq!(app.tui.editor.text(), "from disk");
        assert_eq!(app.tui.document.title, "FlexPad - notes.txt");
        assert_eq!(app.tui.status.message.as_deref(), Some("Opened notes.txt"));
        assert!(!app.tui.should_quit);

        update(
            &mut app,
            UiEvent::Document {
                outcome: DocumentOutcome::Saved {
                    path: PathBuf::from("/tmp/notes.txt"),
                    trigger: SaveTrigger::Manual,
                },
                snapshot: snapshot("FlexPad - notes.txt", false, None),
            },
        );
        assert_eq!(app.tui.editor.text(), "from disk");
    }

    #[test]
    fn quit_outcome_stops_the_loop() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Document {
                outcome: DocumentOutcome::Quit,
                snapshot: snapshot("FlexPad - Text Editor", false, None),
            },
        );
        assert!(app.tui.should_quit);
    }
}

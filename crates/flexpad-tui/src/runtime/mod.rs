//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them through
//! the `DocumentController` and feeds the outcome back as a
//! `UiEvent::Document`.
//!
//! Structure:
//! - `mod.rs`: core runtime (event loop, autosave deadline, effect dispatch)
//! - `modal.rs`: blocking prompts drawn over the editor

mod modal;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use flexpad_core::config::Config;
use flexpad_core::{DocumentController, DocumentOutcome, SaveTrigger};
pub use modal::ModalDialogs;
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::{DocumentSnapshot, UiEvent};
use crate::state::AppState;
use crate::terminal::{self, EditorTerminal};
use crate::{render, update};

/// Frame interval while the user is typing (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen editor runtime.
///
/// Owns the terminal, the view state and the document controller. Terminal
/// state is restored on drop and on panic.
pub struct EditorRuntime {
    terminal: EditorTerminal,
    /// View state (split: tui + overlay).
    pub state: AppState,
    controller: DocumentController,
    /// Directory the file choosers start in.
    root: PathBuf,
    last_tick: Instant,
    last_terminal_event: Instant,
    /// Title last sent to the terminal.
    window_title: String,
    needs_redraw: bool,
}

impl EditorRuntime {
    pub fn new(config: &Config, controller: DocumentController, root: PathBuf) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let session = controller.session();
        let snapshot = DocumentSnapshot::of(session, &DocumentOutcome::Idle);
        let state = AppState::new(config, session.content(), snapshot);

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            controller,
            root,
            last_tick: now,
            last_terminal_event: now,
            window_title: String::new(),
            needs_redraw: true,
        })
    }

    /// Runs the main event loop until the user confirms quitting.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        self.sync_window_title();

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Frame goes first so the viewport is current for every other event
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick triggers render; input is batched to the next tick
                if matches!(&event, UiEvent::Tick) {
                    self.needs_redraw = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if self.needs_redraw && !self.state.tui.should_quit {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects terminal input, the render tick and the autosave deadline.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Wake up for whichever comes first: the next tick or the autosave deadline
        let mut poll_duration = tick_interval.saturating_sub(self.last_tick.elapsed());
        if let Some(until_autosave) = self.controller.time_until_autosave(Instant::now()) {
            poll_duration = poll_duration.min(until_autosave);
        }

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.controller.autosave_due(Instant::now()) {
            events.push(UiEvent::AutosaveDue);
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        debug!(?effect, "Executing effect");

        let outcome = match effect {
            UiEffect::ContentChanged => {
                let content = self.state.tui.editor.text();
                self.controller.on_edit(content, Instant::now());
                DocumentOutcome::Idle
            }
            UiEffect::Save => self.with_dialogs(|controller, dialogs| {
                controller.save(SaveTrigger::Manual, dialogs)
            }),
            UiEffect::Open => {
                self.with_dialogs(|controller, dialogs| controller.open_with_chooser(dialogs))
            }
            UiEffect::NewDocument => {
                self.with_dialogs(|controller, dialogs| controller.new_document(dialogs))
            }
            UiEffect::Close => self.with_dialogs(|controller, dialogs| controller.close(dialogs)),
            UiEffect::Autosave => self.with_dialogs(|controller, dialogs| {
                controller.poll_autosave(Instant::now(), dialogs)
            }),
        };

        let snapshot = DocumentSnapshot::of(self.controller.session(), &outcome);
        self.dispatch_event(UiEvent::Document { outcome, snapshot });
        self.sync_window_title();
        self.needs_redraw = true;
    }

    /// Runs a controller operation with prompts drawn over the current view.
    fn with_dialogs(
        &mut self,
        op: impl FnOnce(&mut DocumentController, &mut ModalDialogs<'_>) -> DocumentOutcome,
    ) -> DocumentOutcome {
        let mut dialogs = ModalDialogs::new(&mut self.terminal, &self.state, &self.root);
        op(&mut self.controller, &mut dialogs)
    }

    fn sync_window_title(&mut self) {
        let title = &self.state.tui.document.title;
        if *title == self.window_title {
            return;
        }
        if let Err(err) = terminal::set_title(title) {
            warn!("Failed to set window title: {err:#}");
        }
        self.window_title.clone_from(title);
    }
}

impl Drop for EditorRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

use crate::components::{Footer, Header, ReadyPanel, TerminalBody};
use crate::event_handler::{EventHandler, KeyAction};
use crate::layout::IntroLayout;
use crate::state::{IntroOutcome, IntroPhase, IntroState};
use crate::theme::Theme;

use crossterm::event::Event;
use greemls_core::{PlaybackState, Plan, Typewriter, TypewriterConfig, TypewriterEvent, intro_script};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, widgets::Block};
use std::io::{Result, Stdout};
use tokio::sync::{mpsc, watch};

mod event_loop;

/// Full-screen GREEMLS intro
///
/// Owns the typewriter playing the intro script and mirrors its state into
/// [`IntroState`] for rendering.
pub struct App {
    state: IntroState,
    typewriter: Typewriter,
    events_rx: mpsc::UnboundedReceiver<TypewriterEvent>,
    state_rx: watch::Receiver<PlaybackState>,
}

impl App {
    /// Create an idle intro for `plan`
    pub fn new(plan: Plan, config: TypewriterConfig) -> Self {
        let (typewriter, events_rx) = Typewriter::new(config);
        let state_rx = typewriter.subscribe();
        let state = IntroState::new(plan, intro_script(plan));
        Self { state, typewriter, events_rx, state_rx }
    }

    pub fn state(&self) -> &IntroState {
        &self.state
    }

    /// Start typing and blinking. Requires a tokio runtime.
    pub fn start(&mut self) {
        let script = self.state.playback.script().clone();
        let plan = self.state.plan;
        self.typewriter.start(script, move || tracing::info!(%plan, "intro sequence complete"));
        self.typewriter.cursor_blink(self.typewriter.config().cursor_interval);
    }

    /// Run the intro in the terminal until the user leaves it
    pub async fn run(&mut self) -> Result<IntroOutcome> {
        self.start();
        let result = event_loop::run(self).await;
        self.typewriter.dispose();
        result?;
        Ok(self.state.outcome().unwrap_or(IntroOutcome::Exit))
    }

    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && let Some(action) = EventHandler::handle_key_event(key, &self.state)
        {
            self.handle_key_action(action);
        }
    }

    pub fn handle_key_action(&mut self, action: KeyAction) {
        tracing::debug!(?action, "intro key action");
        match action {
            KeyAction::Interrupt | KeyAction::Skip => {
                self.typewriter.interrupt();
                self.state.finish(IntroOutcome::Continue);
            }
            KeyAction::InterruptAndExit => {
                self.typewriter.interrupt();
                self.state.finish(IntroOutcome::Exit);
            }
            KeyAction::Continue => self.state.finish(IntroOutcome::Continue),
            KeyAction::Exit => self.state.finish(IntroOutcome::Exit),
        }
    }

    pub fn handle_typewriter_event(&mut self, event: TypewriterEvent) {
        self.sync_playback();
        if let TypewriterEvent::Completed { reason } = event {
            self.state.complete(reason);
        }
    }

    /// Apply every typewriter event already queued
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_typewriter_event(event);
        }
        self.sync_playback();
    }

    /// Copy the latest published playback state
    pub fn sync_playback(&mut self) {
        self.state.playback = self.state_rx.borrow_and_update().clone();
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Theme::base()), area);

        let layout = IntroLayout::calculate(area);
        Header::new(&self.state).render(frame, layout.header);

        match self.state.phase {
            IntroPhase::Playing => TerminalBody::new(&self.state.playback).render(frame, layout.body),
            IntroPhase::Ready => {
                let (lines, panel) = layout.body_with_ready_panel();
                TerminalBody::new(&self.state.playback).render(frame, lines);
                ReadyPanel::new(self.state.plan).render(frame, panel);
            }
        }

        Footer::new(&self.state).render(frame, layout.footer);
    }

    pub fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }
}

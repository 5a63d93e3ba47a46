//! Typewriter sequencer: reveals a [`Script`] character by character.
//!
//! [`PlaybackState`] is a synchronous state machine; each [`PlaybackState::tick`]
//! performs one reveal or one line transition and returns the resulting event.
//! [`Typewriter`] drives it on tokio timers, publishes every state change on a
//! `watch` channel and every event on an `mpsc` channel, and runs the
//! completion callback exactly once per playback.

use crate::config::IntroConfig;
use crate::script::{Script, ScriptLine};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why a playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// Every line was revealed
    Finished,
    /// `interrupt()` was called first
    Interrupted,
}

/// Observable sequencer events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// One more character of `line` is visible; `chars` is the new count
    Reveal { line: usize, chars: usize },
    /// A line moved into the completed list; `completed` is the new count
    LineAdvance { completed: usize },
    /// The cursor glyph flipped
    CursorToggled { visible: bool },
    /// Playback ended and the completion callback has been taken
    Completed { reason: CompletionReason },
}

/// Progress of one playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    /// Fully revealed lines, in script order
    pub completed_lines: Vec<ScriptLine>,
    /// Index of the line being revealed; equals the script length once finished
    pub active_line_index: usize,
    /// Characters of the active line revealed so far
    pub active_char_count: usize,
    /// Whether the host should draw the cursor glyph
    pub cursor_visible: bool,
    script: Script,
}

impl PlaybackState {
    pub fn new(script: Script) -> Self {
        Self {
            completed_lines: Vec::with_capacity(script.len()),
            active_line_index: 0,
            active_char_count: 0,
            cursor_visible: true,
            script,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn is_finished(&self) -> bool {
        self.active_line_index >= self.script.len()
    }

    /// The line being revealed, `None` once finished
    pub fn active_line(&self) -> Option<&ScriptLine> {
        self.script.get(self.active_line_index)
    }

    /// The visible part of the active line
    pub fn revealed_text(&self) -> Option<&str> {
        self.active_line().map(|line| line.prefix(self.active_char_count))
    }

    /// Delay before the next tick, `None` once finished.
    ///
    /// A fully revealed line (including an empty one) waits `line_delay`
    /// before its transition; otherwise the next character waits `char_delay`.
    pub fn next_delay(&self, config: &TypewriterConfig) -> Option<Duration> {
        let line = self.active_line()?;
        if self.active_char_count < line.char_len() { Some(config.char_delay) } else { Some(config.line_delay) }
    }

    /// Perform one reveal or one line transition.
    ///
    /// Returns `None` without touching the state once finished.
    pub fn tick(&mut self) -> Option<TypewriterEvent> {
        let line = self.script.get(self.active_line_index)?;

        if self.active_char_count < line.char_len() {
            self.active_char_count += 1;
            return Some(TypewriterEvent::Reveal { line: self.active_line_index, chars: self.active_char_count });
        }

        self.completed_lines.push(line.clone());
        self.active_line_index += 1;
        self.active_char_count = 0;
        Some(TypewriterEvent::LineAdvance { completed: self.completed_lines.len() })
    }

    /// Start over on `script`, keeping the cursor flag
    fn reset_to(&mut self, script: Script) {
        let cursor_visible = self.cursor_visible;
        *self = PlaybackState::new(script);
        self.cursor_visible = cursor_visible;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Script::default())
    }
}

/// Sequencer pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Delay before each revealed character (always positive)
    pub char_delay: Duration,
    /// Pause between a fully revealed line and its transition
    pub line_delay: Duration,
    /// Cursor blink interval (always positive)
    pub cursor_interval: Duration,
}

const MIN_DELAY: Duration = Duration::from_millis(1);

impl TypewriterConfig {
    /// Zero `char_delay` or `cursor_interval` values are raised to 1ms.
    pub fn new(char_delay: Duration, line_delay: Duration, cursor_interval: Duration) -> Self {
        Self { char_delay: char_delay.max(MIN_DELAY), line_delay, cursor_interval: cursor_interval.max(MIN_DELAY) }
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        IntroConfig::default().into()
    }
}

impl From<IntroConfig> for TypewriterConfig {
    fn from(config: IntroConfig) -> Self {
        Self::new(config.char_delay(), config.line_delay(), config.cursor_interval())
    }
}

type OnComplete = Box<dyn FnOnce() + Send + 'static>;

/// Liveness flag and completion slot of one playback.
///
/// Timer callbacks mutate state only while holding this lock and seeing
/// `live`, so clearing `live` under the lock fences off every queued callback.
struct Session {
    live: bool,
    on_complete: Option<OnComplete>,
}

type SharedSession = Arc<Mutex<Session>>;

fn lock(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

struct ActivePlayback {
    session: SharedSession,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ActivePlayback {
    /// Kill the playback without running its callback
    fn discard(self) {
        {
            let mut session = lock(&self.session);
            session.live = false;
            session.on_complete = None;
        }
        self.cancel.cancel();
        self.task.abort();
    }
}

struct CursorBlink {
    alive: Arc<Mutex<bool>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl CursorBlink {
    fn stop(self) {
        *self.alive.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Timer-driven typewriter.
///
/// Must be used from within a tokio runtime. Dropping the typewriter disposes
/// it.
pub struct Typewriter {
    config: TypewriterConfig,
    state_tx: Arc<watch::Sender<PlaybackState>>,
    events_tx: mpsc::UnboundedSender<TypewriterEvent>,
    playback: Option<ActivePlayback>,
    cursor: Option<CursorBlink>,
}

impl Typewriter {
    /// Create an idle typewriter and the receiving end of its event stream
    pub fn new(config: TypewriterConfig) -> (Self, mpsc::UnboundedReceiver<TypewriterEvent>) {
        let (state_tx, _) = watch::channel(PlaybackState::default());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let typewriter = Self { config, state_tx: Arc::new(state_tx), events_tx, playback: None, cursor: None };
        (typewriter, events_rx)
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PlaybackState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every reveal, transition and cursor toggle
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state_tx.subscribe()
    }

    /// Whether a playback is running and has not completed
    pub fn is_playing(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| lock(&p.session).live)
    }

    /// Play `script` from the beginning.
    ///
    /// A playback already in progress is discarded and its callback dropped
    /// without being called.
    pub fn start<F>(&mut self, script: Script, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(previous) = self.playback.take() {
            tracing::debug!("restarting typewriter playback");
            previous.discard();
        }

        tracing::debug!(lines = script.len(), chars = script.total_chars(), "starting typewriter playback");
        self.state_tx.send_modify(|state| state.reset_to(script));

        let session = Arc::new(Mutex::new(Session { live: true, on_complete: Some(Box::new(on_complete)) }));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_playback(
            Arc::clone(&session),
            cancel.clone(),
            Arc::clone(&self.state_tx),
            self.events_tx.clone(),
            self.config,
        ));

        self.playback = Some(ActivePlayback { session, cancel, task });
    }

    /// End the playback now and treat it as complete.
    ///
    /// Returns `true` if this call ran the completion callback. A no-op when
    /// nothing is playing, after natural completion, or when repeated.
    pub fn interrupt(&mut self) -> bool {
        let Some(playback) = &self.playback else {
            return false;
        };

        let callback = {
            let mut session = lock(&playback.session);
            if !session.live {
                return false;
            }
            session.live = false;
            session.on_complete.take()
        };
        playback.cancel.cancel();

        tracing::debug!(line = self.state_tx.borrow().active_line_index, "typewriter interrupted");
        let _ = self.events_tx.send(TypewriterEvent::Completed { reason: CompletionReason::Interrupted });
        if let Some(callback) = callback {
            callback();
        }
        true
    }

    /// Toggle the cursor every `interval` until disposal.
    ///
    /// Independent of playback progress; a second call replaces the first
    /// blink timer.
    pub fn cursor_blink(&mut self, interval: Duration) {
        if let Some(previous) = self.cursor.take() {
            previous.stop();
        }

        let alive = Arc::new(Mutex::new(true));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_cursor(
            Arc::clone(&alive),
            cancel.clone(),
            Arc::clone(&self.state_tx),
            self.events_tx.clone(),
            interval.max(MIN_DELAY),
        ));

        self.cursor = Some(CursorBlink { alive, cancel, task });
    }

    /// Stop every timer. Never runs the completion callback.
    pub fn dispose(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.discard();
        }
        if let Some(cursor) = self.cursor.take() {
            cursor.stop();
        }
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn run_playback(
    session: SharedSession, cancel: CancellationToken, state_tx: Arc<watch::Sender<PlaybackState>>,
    events_tx: mpsc::UnboundedSender<TypewriterEvent>, config: TypewriterConfig,
) {
    loop {
        let delay = state_tx.borrow().next_delay(&config);
        if let Some(delay) = delay {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let mut guard = lock(&session);
        if !guard.live {
            return;
        }

        let mut event = None;
        state_tx.send_if_modified(|state| {
            event = state.tick();
            event.is_some()
        });

        match event {
            Some(event) => {
                if let TypewriterEvent::LineAdvance { completed } = event {
                    tracing::trace!(completed, "typewriter line complete");
                }
                let _ = events_tx.send(event);
            }
            None => {
                guard.live = false;
                let callback = guard.on_complete.take();
                drop(guard);

                tracing::debug!("typewriter playback finished");
                let _ = events_tx.send(TypewriterEvent::Completed { reason: CompletionReason::Finished });
                if let Some(callback) = callback {
                    callback();
                }
                return;
            }
        }
    }
}

async fn run_cursor(
    alive: Arc<Mutex<bool>>, cancel: CancellationToken, state_tx: Arc<watch::Sender<PlaybackState>>,
    events_tx: mpsc::UnboundedSender<TypewriterEvent>, interval: Duration,
) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let guard = alive.lock().unwrap_or_else(PoisonError::into_inner);
        if !*guard {
            return;
        }

        let mut visible = false;
        state_tx.send_modify(|state| {
            state.cursor_visible = !state.cursor_visible;
            visible = state.cursor_visible;
        });
        let _ = events_tx.send(TypewriterEvent::CursorToggled { visible });
    }
}

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::debug;

use crate::models::{Author, Identity, MoodCategory, Turn};
use crate::replies::ReplyPolicy;

/// Simulated latencies. The reference values are tunables, not contracts;
/// tests inject shorter ones or run under paused virtual time.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub login: Duration,
    pub reply: Duration,
    pub mood_ack: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1500),
            reply: Duration::from_millis(2000),
            mood_ack: Duration::from_millis(1000),
        }
    }
}

struct EngineState {
    turns: Vec<Turn>,
    composing: String,
    awaiting_reply: bool,
    // Bumped on close; deferred appends carrying a stale generation are
    // dropped instead of writing into a torn-down session.
    generation: u64,
    next_id: u64,
}

impl EngineState {
    fn push_turn(&mut self, author: Author, text: String, mood_tag: Option<MoodCategory>) {
        let id = self.next_id;
        self.next_id += 1;
        self.turns.push(Turn {
            id,
            author,
            text,
            sent_at: Utc::now(),
            mood_tag,
        });
    }
}

/// One student chat session: an append-only transcript plus the pending
/// input and typing-indicator state. Replies arrive as deferred work after a
/// simulated thinking delay; mood acknowledgments take a shorter, independent
/// path and may land before an in-flight text reply. Turns are never edited
/// or removed once appended.
#[derive(Clone)]
pub struct ChatSession {
    state: Arc<Mutex<EngineState>>,
    policy: Arc<dyn ReplyPolicy>,
    timings: Timings,
}

impl ChatSession {
    /// Opens a session for `identity`, seeding the transcript with the
    /// assistant's greeting.
    pub fn start(identity: &Identity, policy: Arc<dyn ReplyPolicy>, timings: Timings) -> Self {
        let mut state = EngineState {
            turns: Vec::new(),
            composing: String::new(),
            awaiting_reply: false,
            generation: 0,
            next_id: 0,
        };
        state.push_turn(
            Author::Assistant,
            format!(
                "Hello {}! I'm MindMate, your AI wellness companion. How are you feeling today?",
                identity.username
            ),
            None,
        );

        Self {
            state: Arc::new(Mutex::new(state)),
            policy,
            timings,
        }
    }

    pub fn transcript(&self) -> Vec<Turn> {
        self.state.lock().turns.clone()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.state.lock().awaiting_reply
    }

    pub fn composing(&self) -> String {
        self.state.lock().composing.clone()
    }

    pub fn set_composing(&self, text: impl Into<String>) {
        self.state.lock().composing = text.into();
    }

    /// Sends a user message. Returns `false` without touching the transcript
    /// when the text trims to empty or a reply is already pending. Otherwise
    /// the user turn is appended immediately and the assistant's reply is
    /// scheduled after the thinking delay.
    pub fn send_text(&self, text: &str) -> bool {
        let generation = {
            let mut state = self.state.lock();
            if text.trim().is_empty() || state.awaiting_reply {
                return false;
            }
            state.push_turn(Author::User, text.to_string(), None);
            state.composing.clear();
            state.awaiting_reply = true;
            state.generation
        };

        let session = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(session.timings.reply).await;
            let mut state = session.state.lock();
            if state.generation != generation {
                debug!("dropping reply scheduled before session close");
                return;
            }
            let reply = session.policy.generate_reply(&state.turns);
            state.push_turn(Author::Assistant, reply, None);
            state.awaiting_reply = false;
        });
        true
    }

    /// Shares a quick mood tag. Appends the templated user turn immediately
    /// and schedules the acknowledgment after the short ack delay. This path
    /// neither sets nor checks `awaiting_reply`, so it interleaves freely
    /// with an in-flight text reply.
    pub fn select_mood(&self, mood: MoodCategory) {
        let generation = {
            let mut state = self.state.lock();
            state.push_turn(Author::User, format!("I'm feeling {mood}"), Some(mood));
            state.generation
        };

        let session = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(session.timings.mood_ack).await;
            let mut state = session.state.lock();
            if state.generation != generation {
                debug!("dropping mood acknowledgment scheduled before session close");
                return;
            }
            state.push_turn(
                Author::Assistant,
                format!(
                    "Thank you for sharing that you're feeling {mood}. \
                     I'm here to support you through this."
                ),
                None,
            );
        });
    }

    /// Tears the session down. Replies still in flight are dropped when they
    /// fire; nothing is appended after this call.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.awaiting_reply = false;
    }
}

//! Thread-safe session handle with a busy latch.
//!
//! Input handlers may fire while a previous intent is still running (a
//! double tap on "draw", a roll requested during an animation callback).
//! `SharedSession` never queues such intents: if the session is busy the
//! attempt returns `Attempt::Busy` and nothing changes.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cards::{Card, CardAction};
use crate::core::Result;
use crate::dice::DieRoll;

use super::orchestrator::{ActionOutcome, CrossroadsRoll, DrawnCard, GameSession};

/// Result of an intent submitted to a `SharedSession`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Attempt<T> {
    /// The intent ran.
    Done(T),
    /// Another intent was in flight; this one was dropped.
    Busy,
}

impl<T> Attempt<T> {
    /// Whether the intent was dropped.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// The value, if the intent ran.
    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Busy => None,
        }
    }
}

/// Cloneable handle over one `GameSession`.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
}

impl SharedSession {
    /// Take ownership of `session`.
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` against the session unless another intent holds it.
    pub fn with<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> Attempt<R> {
        match self.inner.try_lock() {
            Some(mut session) => Attempt::Done(f(&mut session)),
            None => {
                debug!("session busy; intent dropped");
                Attempt::Busy
            }
        }
    }

    /// See `GameSession::roll_for_mode`.
    pub fn roll_for_mode(&self) -> Attempt<CrossroadsRoll> {
        self.with(GameSession::roll_for_mode)
    }

    /// See `GameSession::roll_die`.
    pub fn roll_die(&self) -> Attempt<DieRoll> {
        self.with(GameSession::roll_die)
    }

    /// See `GameSession::draw_card`. A busy latch never touches the ledger.
    pub fn draw_card(&self) -> Attempt<Result<DrawnCard>> {
        self.with(GameSession::draw_card)
    }

    /// Resolve `card` with `roll` and apply the resulting action.
    pub fn play_card(&self, card: &Card, roll: Option<DieRoll>) -> Attempt<Result<ActionOutcome>> {
        self.with(|session| {
            let action = session.resolve_card(card, roll)?;
            session.apply_action(action)
        })
    }

    /// See `GameSession::apply_action`.
    pub fn apply_action(&self, action: CardAction) -> Attempt<Result<ActionOutcome>> {
        self.with(|session| session.apply_action(action))
    }

    /// See `GameSession::acknowledge_win`.
    pub fn acknowledge_win(&self) -> Attempt<bool> {
        self.with(GameSession::acknowledge_win)
    }

    /// Give up the handle, returning the session if no other clone exists.
    pub fn into_inner(self) -> Option<GameSession> {
        Arc::try_unwrap(self.inner).ok().map(Mutex::into_inner)
    }
}

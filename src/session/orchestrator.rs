//! Game session: the player-facing operations.
//!
//! `GameSession` owns the board, the drawn-card ledger and the dice, and
//! saves a snapshot after every state change. A failed save is logged and
//! kept for the caller, but in-memory progress is never rolled back.
//!
//! Snapshots also carry the dice and deck stream positions, so a seeded
//! session that is restored continues the same sequence of rolls and draws.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::board::{BoardEngine, BoardPhase, StepOutcome};
use crate::cards::{Card, CardAction, CardProvider, CatalogError, Outcome};
use crate::core::{ConfigError, GameConfig, GameError, GameRng, Result, TransportMode};
use crate::deck::DeckLedger;
use crate::dice::{action_for_roll, Dice, DieRoll};
use crate::persistence::{
    KeyValueStore, Notebook, NotebookEntry, PersistenceError, PersistenceGateway, RngSnapshot,
    SessionSnapshot,
};

/// Result of a crossroads roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrossroadsRoll {
    /// Face rolled.
    pub roll: DieRoll,
    /// Path it selected.
    pub mode: TransportMode,
}

/// A card taken from the deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnCard {
    /// The card, already marked drawn.
    pub card: Card,
    /// The deck ran out and was reshuffled before this draw.
    pub reshuffled: bool,
}

/// Board effect of an applied card action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// `Nothing`: board unchanged.
    Unchanged,
    /// Back at the crossroads with no mode.
    ReturnedToCrossroads,
    /// Moved along the path.
    Moved(StepOutcome),
}

impl ActionOutcome {
    /// Whether the action reached the polling station.
    #[must_use]
    pub fn won(&self) -> bool {
        matches!(self, Self::Moved(step) if step.won)
    }
}

/// One player's journey.
pub struct GameSession {
    config: GameConfig,
    board: BoardEngine,
    ledger: DeckLedger,
    dice: Dice,
    deck_rng: GameRng,
    provider: Box<dyn CardProvider>,
    /// Catalog snapshot per mode, fetched once per journey.
    cards: FxHashMap<TransportMode, Arc<[Card]>>,
    gateway: PersistenceGateway,
    persistence_error: Option<PersistenceError>,
}

impl GameSession {
    /// Create a session at the crossroads.
    ///
    /// `config` is validated first, so a configuration built in code gets
    /// the same checks as one loaded from TOML. Call `restore_session`
    /// afterwards to resume a saved journey.
    pub fn new(
        config: GameConfig,
        provider: impl CardProvider + 'static,
        store: Arc<dyn KeyValueStore>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let board = BoardEngine::new(config.path_lengths)
            .with_play_past_finish(config.allow_play_past_finish);
        let gateway = PersistenceGateway::new(store, config.storage.clone());

        Ok(Self {
            board,
            ledger: DeckLedger::new(),
            dice: Dice::new(rng.for_context("dice")),
            deck_rng: rng.for_context("deck"),
            provider: Box::new(provider),
            cards: FxHashMap::default(),
            gateway,
            persistence_error: None,
            config,
        })
    }

    // === Accessors ===

    /// Validated configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board engine (read-only).
    #[must_use]
    pub fn board(&self) -> &BoardEngine {
        &self.board
    }

    /// Current board phase.
    #[must_use]
    pub fn phase(&self) -> BoardPhase {
        self.board.phase()
    }

    /// Drawn-card ledger (read-only).
    #[must_use]
    pub fn ledger(&self) -> &DeckLedger {
        &self.ledger
    }

    /// Current state as it would be persisted.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.board.state(), self.ledger.clone()).with_rng(RngSnapshot {
            dice: self.dice.rng_state(),
            deck: self.deck_rng.state(),
        })
    }

    /// Take the most recent save failure, if any.
    pub fn take_persistence_error(&mut self) -> Option<PersistenceError> {
        self.persistence_error.take()
    }

    // === Startup ===

    /// Resume the persisted journey, if there is one.
    ///
    /// Returns the adopted snapshot (after range normalization), or `None`
    /// on a fresh install. A corrupt snapshot is reported and leaves the
    /// session at the crossroads.
    pub fn restore_session(
        &mut self,
    ) -> std::result::Result<Option<SessionSnapshot>, PersistenceError> {
        let Some(snapshot) = self.gateway.load_snapshot()? else {
            debug!("no saved journey");
            return Ok(None);
        };
        self.board.restore(snapshot.board());
        self.ledger = snapshot.ledger;
        if let Some(rng) = &snapshot.rng {
            self.dice = Dice::from_state(&rng.dice);
            self.deck_rng = GameRng::from_state(&rng.deck);
        }
        self.cards.clear();
        info!(
            mode = ?self.board.mode(),
            position = self.board.position(),
            drawn = self.ledger.len(),
            "journey restored"
        );
        Ok(Some(self.snapshot()))
    }

    // === Player intents ===

    /// Roll at the crossroads and start a leg on the rolled mode.
    pub fn roll_for_mode(&mut self) -> CrossroadsRoll {
        let (roll, mode) = self.dice.roll_for_mode();
        self.board.select_mode(mode);
        info!(%roll, %mode, "crossroads roll");
        self.persist();
        CrossroadsRoll { roll, mode }
    }

    /// Roll the die for a multi-outcome card.
    ///
    /// The saved dice stream position advances with the roll.
    pub fn roll_die(&mut self) -> DieRoll {
        let roll = self.dice.roll_die();
        debug!(%roll, "die rolled");
        self.persist();
        roll
    }

    /// Draw a card for the current mode without replacement.
    ///
    /// When every card has been drawn the deck is reshuffled (the whole
    /// ledger is cleared) and the draw retried once; `DeckExhausted` means
    /// the catalog has no card for this mode at all.
    pub fn draw_card(&mut self) -> Result<DrawnCard> {
        let mode = self.board.mode().ok_or(GameError::NoTransportMode)?;
        if self.board.is_finished() && !self.config.allow_play_past_finish {
            return Err(GameError::JourneyFinished);
        }
        let cards = self.cards_for(mode)?;

        let mut reshuffled = false;
        let mut available = self.ledger.available(mode, &cards);
        if available.is_empty() {
            info!(%mode, "deck empty; reshuffling");
            self.ledger.reset();
            reshuffled = true;
            available = self.ledger.available(mode, &cards);
        }

        let Some(card) = self.deck_rng.choose(&available).map(|card| (*card).clone()) else {
            // The reset ledger must reach the store even though nothing was drawn.
            self.persist();
            return Err(GameError::DeckExhausted { mode });
        };
        self.ledger.mark_card(&card);
        debug!(%mode, card = %card.id, remaining = available.len() - 1, "card drawn");

        self.persist();
        Ok(DrawnCard { card, reshuffled })
    }

    /// The outcome a card resolves to.
    ///
    /// Single-outcome cards ignore `roll`; multi-outcome cards require it.
    pub fn resolve_outcome<'c>(&self, card: &'c Card, roll: Option<DieRoll>) -> Result<&'c Outcome> {
        if let Some(outcome) = card.single_outcome() {
            return Ok(outcome);
        }
        let roll = roll.ok_or_else(|| GameError::RollRequired {
            card: card.id.clone(),
        })?;
        action_for_roll(card, roll).ok_or_else(|| {
            GameError::Catalog(CatalogError::NoOutcomes {
                card: card.id.clone(),
            })
        })
    }

    /// The action a card resolves to.
    pub fn resolve_card(&self, card: &Card, roll: Option<DieRoll>) -> Result<CardAction> {
        self.resolve_outcome(card, roll).map(|outcome| outcome.action)
    }

    /// Apply a card action to the board and save.
    pub fn apply_action(&mut self, action: CardAction) -> Result<ActionOutcome> {
        let outcome = match action {
            CardAction::Nothing => ActionOutcome::Unchanged,
            CardAction::ReturnToCrossroads => {
                self.board.apply_crossroads();
                ActionOutcome::ReturnedToCrossroads
            }
            CardAction::Move(steps) => {
                ActionOutcome::Moved(self.board.apply_step(steps.get().into())?)
            }
        };
        self.persist();
        Ok(outcome)
    }

    /// Apply a raw content action code.
    ///
    /// An unknown code is rejected without touching the board.
    pub fn apply_action_code(&mut self, code: &str) -> Result<ActionOutcome> {
        let action = code.parse::<CardAction>().map_err(|code| {
            warn!(code = %code, "rejected invalid action code");
            GameError::InvalidActionCode(code)
        })?;
        self.apply_action(action)
    }

    /// Leave the polling station and start a fresh journey.
    ///
    /// Returns `false` if the player has not finished.
    pub fn acknowledge_win(&mut self) -> bool {
        let mode = self.board.mode();
        if !self.board.acknowledge_win() {
            return false;
        }
        info!(?mode, "win acknowledged");
        self.start_fresh_journey();
        true
    }

    /// Start a fresh journey: crossroads, empty ledger, catalog refetched
    /// on the next draw. The notebook is kept.
    pub fn reset_journey(&mut self) {
        self.board.apply_crossroads();
        debug!("journey reset");
        self.start_fresh_journey();
    }

    // === Notebook ===

    /// Record the card's link in the notebook.
    ///
    /// Returns `false` if the card has no link or the link is already there.
    pub fn record_link(&self, card: &Card) -> std::result::Result<bool, PersistenceError> {
        match NotebookEntry::from_card(card) {
            Some(entry) => self.gateway.append_notebook(entry),
            None => Ok(false),
        }
    }

    /// Record an arbitrary link in the notebook.
    pub fn record_notebook_entry(
        &self,
        id: &str,
        url: &str,
        description: &str,
    ) -> std::result::Result<bool, PersistenceError> {
        self.gateway
            .append_notebook(NotebookEntry::new(id, url, description))
    }

    /// Read the notebook.
    pub fn notebook(&self) -> std::result::Result<Notebook, PersistenceError> {
        self.gateway.load_notebook()
    }

    // === Internals ===

    fn cards_for(&mut self, mode: TransportMode) -> Result<Arc<[Card]>> {
        if let Some(cards) = self.cards.get(&mode) {
            return Ok(Arc::clone(cards));
        }
        let fetched: Arc<[Card]> = self
            .provider
            .fetch_cards(mode)?
            .into_iter()
            .filter(|card| card.transport.matches(mode))
            .collect();
        debug!(%mode, count = fetched.len(), "catalog fetched");
        self.cards.insert(mode, Arc::clone(&fetched));
        Ok(fetched)
    }

    fn start_fresh_journey(&mut self) {
        self.ledger.reset();
        self.cards.clear();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.gateway.save_snapshot(&self.snapshot()) {
            warn!(error = %err, "progress not saved; continuing with in-memory state");
            self.persistence_error = Some(err);
        }
    }
}

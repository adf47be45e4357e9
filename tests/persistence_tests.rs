//! Persistence integration tests.
//!
//! Sessions are saved through real stores and restored by a second
//! session, the way an app restart would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use polling_path::board::BoardPhase;
use polling_path::cards::CardCatalog;
use polling_path::core::{GameConfig, StorageKeys, TransportMode};
use polling_path::persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistenceError, SessionSnapshot, StoreError,
};
use polling_path::session::GameSession;
use polling_path::{CardAction, Steps};

const CATALOG: &str = r#"[
  {"id": "b1", "transportType": "bus", "url": "https://vote.example/id",
   "description": "Bring a photo ID",
   "outcomes": {"1,2,3,4,5,6": ["2", "You remembered your ID"]}},
  {"id": "a1", "transportType": "any",
   "outcomes": {"1,2,3,4,5,6": ["1", "Keep going"]}}
]"#;

fn catalog() -> CardCatalog {
    CardCatalog::from_json_str(CATALOG).unwrap()
}

/// Play until the session is on the bus path with some cards drawn.
fn play_on_bus(session: &mut GameSession) {
    while session.board().mode() != Some(TransportMode::Bus) {
        session.roll_for_mode();
    }
    let drawn = session.draw_card().unwrap();
    let action = session.resolve_card(&drawn.card, None).unwrap();
    session.apply_action(action).unwrap();
}

/// Store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    reject_writes: AtomicBool,
}

impl KeyValueStore for FlakyStore {
    fn save(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("storage full".into()));
        }
        self.inner.save(key, blob)
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.load(key)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

// =============================================================================
// Restore
// =============================================================================

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let store = Arc::new(FileStore::new(dir.path()).unwrap());
        let mut session =
            GameSession::new(GameConfig::new().with_seed(21), catalog(), store).unwrap();
        play_on_bus(&mut session);
        session.snapshot()
    };

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let mut session = GameSession::new(GameConfig::new().with_seed(21), catalog(), store).unwrap();
    let restored = session.restore_session().unwrap().unwrap();
    assert_eq!(restored, saved);
    assert_eq!(session.board().mode(), Some(TransportMode::Bus));
    assert_eq!(session.ledger().len(), 1);
}

#[test]
fn test_fresh_install_has_nothing_to_restore() {
    let mut session =
        GameSession::new(GameConfig::new(), catalog(), Arc::new(MemoryStore::new())).unwrap();
    assert_eq!(session.restore_session().unwrap(), None);
    assert_eq!(session.phase(), BoardPhase::AtCrossroads);
}

#[test]
fn test_corrupt_snapshot_is_reported() {
    let store = Arc::new(MemoryStore::new());
    store.save("gameProgress", "{\"position\": \"far\"}").unwrap();
    let mut session = GameSession::new(GameConfig::new(), catalog(), store).unwrap();

    let err = session.restore_session().unwrap_err();
    assert!(matches!(err, PersistenceError::Decode { ref key, .. } if key == "gameProgress"));
    assert_eq!(session.board().mode(), None);
}

#[test]
fn test_restored_position_is_clamped() {
    let store = Arc::new(MemoryStore::new());
    store
        .save(
            "gameProgress",
            r#"{"transportMode": "bicycle", "position": 90, "drawnCards": {}}"#,
        )
        .unwrap();
    let mut session = GameSession::new(GameConfig::new(), catalog(), store).unwrap();

    let restored = session.restore_session().unwrap().unwrap();
    assert_eq!(restored.position, 24);
    assert_eq!(session.phase(), BoardPhase::Finished);
}

#[test]
fn test_custom_storage_keys() {
    let keys = StorageKeys {
        progress_key: "progress-v2".into(),
        notebook_key: "links-v2".into(),
    };
    let store = Arc::new(MemoryStore::new());
    let mut session = GameSession::new(
        GameConfig::new().with_seed(2).with_storage_keys(keys),
        catalog(),
        store.clone(),
    )
    .unwrap();
    session.roll_for_mode();

    assert!(store.load("progress-v2").unwrap().is_some());
    assert!(store.load("gameProgress").unwrap().is_none());
}

#[test]
fn test_keys_differing_in_punctuation_stay_separate_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let keys = StorageKeys {
        progress_key: "game.progress".into(),
        notebook_key: "gameprogress".into(),
    };
    let config = GameConfig::new().with_seed(6).with_storage_keys(keys);
    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let mut session = GameSession::new(config.clone(), catalog(), store).unwrap();

    play_on_bus(&mut session);
    let card = catalog()
        .iter()
        .find(|card| card.url.is_some())
        .cloned()
        .unwrap();
    assert!(session.record_link(&card).unwrap());
    assert_eq!(session.notebook().unwrap().len(), 1);

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let mut reopened = GameSession::new(config, catalog(), store).unwrap();
    let restored = reopened.restore_session().unwrap().unwrap();
    assert_eq!(restored, session.snapshot());
    assert_eq!(reopened.notebook().unwrap().len(), 1);
}

#[test]
fn test_restart_continues_the_random_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let mut first = GameSession::new(GameConfig::new().with_seed(30), catalog(), store).unwrap();
    play_on_bus(&mut first);
    first.roll_die();

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let mut second = GameSession::new(GameConfig::new(), catalog(), store).unwrap();
    second.restore_session().unwrap().unwrap();

    for _ in 0..10 {
        assert_eq!(first.roll_die(), second.roll_die());
    }
}

// =============================================================================
// Write Failures
// =============================================================================

#[test]
fn test_failed_save_does_not_roll_back() {
    let store = Arc::new(FlakyStore::default());
    let mut session =
        GameSession::new(GameConfig::new().with_seed(4), catalog(), store.clone()).unwrap();
    play_on_bus(&mut session);
    let before = session.board().position();

    store.reject_writes.store(true, Ordering::SeqCst);
    session
        .apply_action(CardAction::Move(Steps::new(1).unwrap()))
        .unwrap();
    assert_eq!(session.board().position(), before + 1);

    let err = session.take_persistence_error().unwrap();
    assert!(err.is_write());

    let stale: SessionSnapshot =
        serde_json::from_str(&store.load("gameProgress").unwrap().unwrap()).unwrap();
    assert_eq!(stale.position, before);

    store.reject_writes.store(false, Ordering::SeqCst);
    session.apply_action(CardAction::Nothing).unwrap();
    let fresh: SessionSnapshot =
        serde_json::from_str(&store.load("gameProgress").unwrap().unwrap()).unwrap();
    assert_eq!(fresh.position, before + 1);
}

#[test]
fn test_notebook_write_failure_is_returned() {
    let store = Arc::new(FlakyStore::default());
    let session = GameSession::new(GameConfig::new(), catalog(), store.clone()).unwrap();
    store.reject_writes.store(true, Ordering::SeqCst);

    let err = session
        .record_notebook_entry("x", "https://vote.example/x", "X")
        .unwrap_err();
    assert!(matches!(err, PersistenceError::Write { .. }));
    assert!(session.notebook().unwrap().is_empty());
}

// =============================================================================
// Notebook
// =============================================================================

#[test]
fn test_notebook_outlives_journeys() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let mut session =
        GameSession::new(GameConfig::new().with_seed(8), catalog(), store.clone()).unwrap();

    play_on_bus(&mut session);
    let card = catalog()
        .iter()
        .find(|card| card.url.is_some())
        .cloned()
        .unwrap();
    assert!(session.record_link(&card).unwrap());
    assert!(session
        .record_notebook_entry("faq", "https://vote.example/faq", "Voting FAQ")
        .unwrap());
    assert!(!session.record_link(&card).unwrap());

    session.reset_journey();
    assert_eq!(session.board().mode(), None);
    assert!(session.ledger().is_empty());

    let reopened = GameSession::new(GameConfig::new(), catalog(), store).unwrap();
    let notebook = reopened.notebook().unwrap();
    let urls: Vec<_> = notebook.entries().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["https://vote.example/id", "https://vote.example/faq"]);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_drives_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(
        &path,
        r#"
seed = 42

[path_lengths]
bus = 3
carpool = 3
bicycle = 3

[storage]
progress_key = "save"
notebook_key = "links"
"#,
    )
    .unwrap();

    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.seed, Some(42));

    let store = Arc::new(MemoryStore::new());
    let mut session = GameSession::new(config, catalog(), store.clone()).unwrap();
    play_on_bus(&mut session);
    session
        .apply_action(CardAction::Move(Steps::new(3).unwrap()))
        .unwrap();
    assert_eq!(session.phase(), BoardPhase::Finished);
    assert_eq!(session.board().position(), 3);
    assert!(store.load("save").unwrap().is_some());
}

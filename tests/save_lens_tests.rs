//! Tests for the side-effecting save-file optic.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use focal::config::SaveConfig;
use focal::optics::{Optic, compose, json_bytes, prop, set};
use focal::storage::{ByteStore, FileStore, MemoryStore, SaveFileLens, StoreError};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TIMESTAMP: i64 = 1_700_000_000_123;

#[fixture]
fn saved_game() -> MemoryStore {
    MemoryStore::new().with_entry("savedgame.json", r#"{"level":1,"name":"ann"}"#)
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("focal=debug"))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn read_json(store: &impl ByteStore, name: &str) -> Value {
    serde_json::from_slice(&store.read(name).unwrap()).unwrap()
}

// =============================================================================
// Naming
// =============================================================================

#[rstest]
fn update_is_written_under_a_derived_name(saved_game: MemoryStore) {
    let saves = SaveFileLens::with_sources(saved_game.clone(), || TIMESTAMP, || "abc123".to_string());
    let level = compose(compose(saves, json_bytes()), prop("level"));

    let saved_as = set(&level, json!(5), "savedgame.json".to_string());

    assert_eq!(saved_as, format!("savedgame_{TIMESTAMP}_abc123.json"));
    assert_eq!(saved_game.writes(), vec![saved_as.clone()]);
    assert_eq!(read_json(&saved_game, &saved_as), json!({"level": 5, "name": "ann"}));
}

#[rstest]
fn original_resource_is_left_untouched(saved_game: MemoryStore) {
    let saves = SaveFileLens::with_sources(saved_game.clone(), || TIMESTAMP, || "abc123".to_string());
    let level = saves.compose(json_bytes()).compose(prop("level"));

    level.set("savedgame.json".to_string(), json!(9));

    assert_eq!(read_json(&saved_game, "savedgame.json"), json!({"level": 1, "name": "ann"}));
    assert_eq!(
        saved_game.names(),
        vec![
            "savedgame.json".to_string(),
            format!("savedgame_{TIMESTAMP}_abc123.json"),
        ]
    );
}

#[rstest]
fn each_save_draws_a_fresh_token(saved_game: MemoryStore) {
    let counter = AtomicUsize::new(0);
    let saves = SaveFileLens::with_sources(saved_game.clone(), || TIMESTAMP, move || {
        format!("t{}", counter.fetch_add(1, Ordering::SeqCst))
    });

    let first = saves.set("savedgame.json".to_string(), b"{}".to_vec());
    let second = saves.set("savedgame.json".to_string(), b"[]".to_vec());

    assert_eq!(first, format!("savedgame_{TIMESTAMP}_t0.json"));
    assert_eq!(second, format!("savedgame_{TIMESTAMP}_t1.json"));
    assert_eq!(saved_game.writes().len(), 2);
}

#[rstest]
fn chained_saves_stack_suffixes(saved_game: MemoryStore) {
    let saves = SaveFileLens::with_sources(saved_game.clone(), || 7_i64, || "x".to_string());
    let level = saves.compose(json_bytes()).compose(prop("level"));

    let once = level.set("savedgame.json".to_string(), json!(2));
    let twice = level.set(once.clone(), json!(3));

    assert_eq!(once, "savedgame_7_x.json");
    assert_eq!(twice, "savedgame_7_x_7_x.json");
    assert_eq!(read_json(&saved_game, &twice)["level"], 3);
}

#[rstest]
fn uuid_tokens_have_the_configured_length(saved_game: MemoryStore) {
    let saves = SaveFileLens::new(saved_game);
    let name = saves.derived_name("savedgame.json");

    let token = name
        .trim_end_matches(".json")
        .rsplit('_')
        .next()
        .unwrap();
    assert_eq!(token.len(), 6);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

// =============================================================================
// Failures
// =============================================================================

#[rstest]
fn collision_is_refused_and_nothing_is_written() {
    init_tracing();
    let store = MemoryStore::new()
        .with_entry("savedgame.json", "{}")
        .with_entry(format!("savedgame_{TIMESTAMP}_abc123.json"), "taken");
    let saves = SaveFileLens::with_sources(store.clone(), || TIMESTAMP, || "abc123".to_string());

    let error = saves.save("savedgame.json", b"{}").unwrap_err();
    assert!(matches!(error, StoreError::Collision { ref name } if name.ends_with("_abc123.json")));
    assert_eq!(
        saves.set("savedgame.json".to_string(), b"{}".to_vec()),
        "savedgame.json"
    );
    assert!(store.writes().is_empty());
    assert_eq!(
        store
            .read(&format!("savedgame_{TIMESTAMP}_abc123.json"))
            .unwrap(),
        b"taken"
    );
}

#[rstest]
fn missing_resource_makes_composed_update_a_no_op() {
    init_tracing();
    let store = MemoryStore::new();
    let saves = SaveFileLens::with_sources(store.clone(), || TIMESTAMP, || "abc123".to_string());
    let level = saves.compose(json_bytes()).compose(prop("level"));

    assert_eq!(level.preview(&"absent.json".to_string()), None);
    assert_eq!(level.set("absent.json".to_string(), json!(1)), "absent.json");
    assert!(store.writes().is_empty());
}

#[rstest]
fn invalid_json_payload_is_not_rewritten() {
    let store = MemoryStore::new().with_entry("broken.json", "{oops");
    let saves = SaveFileLens::with_sources(store.clone(), || TIMESTAMP, || "abc123".to_string());
    let level = saves.compose(json_bytes()).compose(prop("level"));

    assert_eq!(level.set("broken.json".to_string(), json!(1)), "broken.json");
    assert!(store.writes().is_empty());
}

// =============================================================================
// File-backed store
// =============================================================================

#[rstest]
fn file_store_round_trip() {
    let directory = tempfile::tempdir().unwrap();
    let store = FileStore::new(directory.path());

    store.write("slots/one.json", b"{\"hp\":3}").unwrap();

    assert!(store.exists("slots/one.json"));
    assert_eq!(store.read("slots/one.json").unwrap(), b"{\"hp\":3}");
    assert!(directory.path().join("slots").join("one.json").is_file());
}

#[rstest]
#[case("../escape.json")]
#[case("/etc/passwd")]
#[case("")]
fn file_store_rejects_names_outside_root(#[case] name: &str) {
    let directory = tempfile::tempdir().unwrap();
    let store = FileStore::new(directory.path());

    assert!(matches!(
        store.write(name, b"x"),
        Err(StoreError::InvalidName { .. })
    ));
    assert!(!store.exists(name));
}

#[rstest]
fn file_store_create_never_replaces_an_existing_file() {
    let directory = tempfile::tempdir().unwrap();
    let store = FileStore::new(directory.path());

    store.create("slot.json", b"first").unwrap();
    assert!(matches!(
        store.create("slot.json", b"second"),
        Err(StoreError::Collision { ref name }) if name == "slot.json"
    ));
    assert_eq!(store.read("slot.json").unwrap(), b"first");
}

#[rstest]
fn file_backed_save_refuses_a_taken_name() {
    let directory = tempfile::tempdir().unwrap();
    let store = FileStore::new(directory.path());
    store.write("game.json", b"{}").unwrap();
    store.write("game_5_t.json", b"taken").unwrap();
    let saves = SaveFileLens::with_sources(store.clone(), || 5_i64, || "t".to_string());

    assert!(matches!(
        saves.save("game.json", b"{\"hp\":1}"),
        Err(StoreError::Collision { .. })
    ));
    assert_eq!(store.read("game_5_t.json").unwrap(), b"taken");
}

#[rstest]
fn file_store_missing_resource_is_not_found() {
    let directory = tempfile::tempdir().unwrap();
    let store = FileStore::new(directory.path());
    assert!(matches!(
        store.read("nothing.json"),
        Err(StoreError::NotFound { .. })
    ));
}

#[rstest]
fn configured_lens_saves_into_the_configured_directory() {
    let directory = tempfile::tempdir().unwrap();
    std::fs::write(directory.path().join("savedgame.json"), r#"{"level":1}"#).unwrap();
    let config = SaveConfig {
        save_dir: directory.path().to_path_buf(),
        token_length: 12,
    };
    let saves = SaveFileLens::from_config(&config);
    let level = saves.compose(json_bytes()).compose(prop("level"));

    let saved_as = level.set("savedgame.json".to_string(), json!(4));

    assert_ne!(saved_as, "savedgame.json");
    assert!(saved_as.starts_with("savedgame_") && saved_as.ends_with(".json"));
    let token = saved_as.trim_end_matches(".json").rsplit('_').next().unwrap();
    assert_eq!(token.len(), 12);
    let written: Value =
        serde_json::from_slice(&std::fs::read(directory.path().join(&saved_as)).unwrap()).unwrap();
    assert_eq!(written, json!({"level": 4}));
}

#[rstest]
fn shared_store_sees_saves_from_every_thread() {
    let store = Arc::new(MemoryStore::new().with_entry("base.json", "{}"));
    let handles: Vec<_> = (0..4_i64)
        .map(|n| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let saves = SaveFileLens::with_sources(store, move || n, || "s".to_string());
                saves.set("base.json".to_string(), b"{}".to_vec())
            })
        })
        .collect();

    let mut names: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    names.sort();
    assert_eq!(
        names,
        ["base_0_s.json", "base_1_s.json", "base_2_s.json", "base_3_s.json"]
    );
    assert_eq!(store.writes().len(), 4);
}

use std::cell::RefCell;

use serde_json::Value;
use yamb_game::{
    COLUMN_COUNT, Column, GameSession, ROW_COUNT, RowId, Scorekeeper, SessionStore,
};

/// Storage backend for the contract tests: keeps the encoded snapshot,
/// like a browser key-value store would.
#[derive(Default)]
struct JsonSlotStore {
    slot: RefCell<Option<String>>,
}

impl JsonSlotStore {
    fn seeded(text: &str) -> Self {
        Self {
            slot: RefCell::new(Some(text.to_string())),
        }
    }
}

impl SessionStore for JsonSlotStore {
    type Error = serde_json::Error;

    fn save(&self, session: &GameSession) -> Result<(), Self::Error> {
        let json = session.to_json()?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<GameSession>, Self::Error> {
        self.slot
            .borrow()
            .as_deref()
            .map(GameSession::from_json)
            .transpose()
    }

    fn clear(&self) -> Result<(), Self::Error> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

fn played_session() -> GameSession {
    let mut session = GameSession::start(&["Ana", "Bo"]).unwrap();
    session.enter_score(0, Column::Up, RowId::Ones, "4").unwrap();
    session.enter_score(0, Column::Free, RowId::Poker, "24").unwrap();
    session.set_one_roll(0, Column::Free, RowId::Poker, true).unwrap();
    session.mark_predicted(1, RowId::Karta).unwrap();
    session.cross_out(1, Column::Down, RowId::Poker).unwrap();
    session.advance_turn();
    session
}

#[test]
fn snapshot_has_the_documented_shape() {
    let session = played_session();
    let value: Value = serde_json::from_str(&session.to_json().unwrap()).unwrap();

    let players = value["players"].as_array().expect("players array");
    assert_eq!(players.len(), 2);
    assert_eq!(value["active_player_index"], 1);

    let ana = &players[0];
    assert_eq!(ana["name"], "Ana");
    assert_eq!(ana["next_up_row"], "twos");
    assert_eq!(ana["next_down_row"], "poker");

    let grid = ana["grid"].as_array().expect("grid array");
    assert_eq!(grid.len(), COLUMN_COUNT);
    for column in grid {
        assert_eq!(column.as_array().expect("row array").len(), ROW_COUNT);
    }

    // Cells carry value plus the three flags.
    let poker = &grid[Column::Free.index()][RowId::Poker.index()];
    assert_eq!(poker["value"], 24);
    assert_eq!(poker["crossed"], false);
    assert_eq!(poker["one_roll"], true);
    assert_eq!(poker["predicted"], false);

    let bo = &players[1];
    assert_eq!(bo["next_down_row"], "karta");
    let crossed = &bo["grid"][Column::Down.index()][RowId::Poker.index()];
    assert_eq!(crossed["value"], 0);
    assert_eq!(crossed["crossed"], true);
}

#[test]
fn a_completed_down_column_serializes_its_cursor_as_null() {
    let mut session = GameSession::start(&["Solo"]).unwrap();
    for row in RowId::ALL.iter().rev() {
        session.cross_out(0, Column::Down, *row).unwrap();
    }
    let value: Value = serde_json::from_str(&session.to_json().unwrap()).unwrap();
    assert_eq!(value["players"][0]["next_down_row"], Value::Null);
    assert_eq!(value["players"][0]["next_up_row"], "ones");
}

#[test]
fn snapshots_round_trip_through_a_store() {
    let session = played_session();
    let keeper = Scorekeeper::new(JsonSlotStore::default());
    keeper.save(&session).unwrap();
    let restored = keeper.load().unwrap().expect("stored snapshot");
    assert_eq!(restored, session);
    assert_eq!(restored.to_json().unwrap(), session.to_json().unwrap());
}

#[test]
fn a_corrupt_snapshot_falls_back_to_an_empty_session() {
    let keeper = Scorekeeper::new(JsonSlotStore::seeded("{not json"));
    assert!(keeper.load().is_err());
    let session = keeper.load_or_default();
    assert_eq!(session, GameSession::default());
    assert_eq!(session.player_count(), 0);
}

#[test]
fn clearing_the_store_forgets_the_game() {
    let keeper = Scorekeeper::new(JsonSlotStore::default());
    keeper.save(&played_session()).unwrap();
    keeper.clear().unwrap();
    assert_eq!(keeper.load().unwrap(), None);
}

#[test]
fn snapshots_tolerate_unknown_fields_from_older_versions() {
    let mut value: Value = serde_json::from_str(&played_session().to_json().unwrap()).unwrap();
    value["saved_at"] = Value::String("2024-06-01".to_string());
    value["players"][0]["color"] = Value::String("teal".to_string());
    let restored = GameSession::from_json(&value.to_string());
    assert!(restored.is_ok(), "unknown fields should not break loads: {restored:?}");
}

#[test]
fn cells_with_missing_flags_load_as_defaults() {
    let mut value: Value = serde_json::from_str(&played_session().to_json().unwrap()).unwrap();
    let cell = &mut value["players"][0]["grid"][Column::Up.index()][RowId::Ones.index()];
    *cell = serde_json::json!({ "value": 4 });
    let restored = GameSession::from_json(&value.to_string()).unwrap();
    let cell = restored.player(0).unwrap().cell(Column::Up, RowId::Ones);
    assert_eq!(cell.value, Some(4));
    assert!(!cell.crossed);
    assert!(!cell.one_roll);
    assert!(!cell.predicted);
}

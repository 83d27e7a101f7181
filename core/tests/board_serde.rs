use serde_json::json;
use sweeper_core::{Board, GameState};

fn played_board() -> Board {
    let mut board = Board::from_hazard_coords((4, 3), &[(3, 0), (0, 2)]).unwrap();
    board.reveal((0, 0)).unwrap();
    board
}

#[test]
fn saved_game_loads_back() {
    let board = played_board();
    let value = serde_json::to_value(&board).unwrap();

    let loaded: Board = serde_json::from_value(value).unwrap();

    assert_eq!(loaded, board);
    assert_eq!(loaded.state(), GameState::InProgress);
}

#[test]
fn inflated_hazard_count_is_rejected() {
    let mut value = serde_json::to_value(played_board()).unwrap();
    value["hazard_count"] = json!(50);

    let err = serde_json::from_value::<Board>(value).unwrap_err();
    assert!(err.to_string().contains("hazard count"), "{err}");
}

#[test]
fn tampered_cells_are_rejected() {
    let mut value = serde_json::to_value(played_board()).unwrap();
    value["revealed_safe_count"] = json!(0);
    assert!(serde_json::from_value::<Board>(value).is_err());

    let mut value = serde_json::to_value(played_board()).unwrap();
    value["triggered_hazard"] = json!([3, 0]);
    assert!(serde_json::from_value::<Board>(value).is_err());

    let mut value = serde_json::to_value(played_board()).unwrap();
    value["cells"]["data"][3]["hazard"] = json!(false);
    assert!(serde_json::from_value::<Board>(value).is_err());
}

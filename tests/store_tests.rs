use kanbo::board::{Board, ColumnId};

fn card_titles(board: &Board, column: ColumnId) -> Vec<String> {
    board
        .column(column)
        .unwrap()
        .cards
        .iter()
        .map(|c| c.title.clone())
        .collect()
}

// === Board construction ===

#[test]
fn test_new_board_has_fixed_columns() {
    let board = Board::new();

    assert_eq!(board.columns.len(), 3);
    assert_eq!(board.columns[0].id, ColumnId::Todo);
    assert_eq!(board.columns[1].id, ColumnId::InProgress);
    assert_eq!(board.columns[2].id, ColumnId::Done);
    assert!(board.columns.iter().all(|c| c.cards.is_empty()));
}

#[test]
fn test_seed_board_shape() {
    let board = Board::seed();

    assert_eq!(board.column(ColumnId::Todo).unwrap().cards.len(), 3);
    assert_eq!(board.column(ColumnId::InProgress).unwrap().cards.len(), 2);
    assert_eq!(board.column(ColumnId::Done).unwrap().cards.len(), 2);

    // Seven cards with unique ids across the whole board
    let ids: Vec<&str> = board
        .columns
        .iter()
        .flat_map(|c| c.cards.iter().map(|card| card.id.as_str()))
        .collect();
    assert_eq!(ids.len(), 7);
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 7);
}

#[test]
fn test_column_titles() {
    assert_eq!(ColumnId::Todo.title(), "To Do");
    assert_eq!(ColumnId::InProgress.title(), "In Progress");
    assert_eq!(ColumnId::Done.title(), "Done");
}

#[test]
fn test_column_id_round_trip() {
    for &id in ColumnId::all() {
        assert_eq!(ColumnId::from_str(id.as_str()), Some(id));
    }
    assert_eq!(ColumnId::from_str("archive"), None);
}

// === add_card ===

#[test]
fn test_add_card_appends_to_target_column_only() {
    let board = Board::seed();
    let after = board.add_card(ColumnId::Todo, "Write tests", "");

    assert_eq!(after.column(ColumnId::Todo).unwrap().cards.len(), 4);
    assert_eq!(after.column(ColumnId::InProgress).unwrap().cards.len(), 2);
    assert_eq!(after.column(ColumnId::Done).unwrap().cards.len(), 2);

    let new_card = after.column(ColumnId::Todo).unwrap().cards.last().unwrap();
    assert_eq!(new_card.title, "Write tests");
    assert!(new_card.description.is_none());
}

#[test]
fn test_add_card_preserves_existing_ids_and_order() {
    let board = Board::seed();
    let before_ids: Vec<String> = board
        .column(ColumnId::Todo)
        .unwrap()
        .cards
        .iter()
        .map(|c| c.id.clone())
        .collect();

    let after = board.add_card(ColumnId::Todo, "Write tests", "");
    let after_ids: Vec<String> = after
        .column(ColumnId::Todo)
        .unwrap()
        .cards
        .iter()
        .map(|c| c.id.clone())
        .collect();

    assert_eq!(&after_ids[..3], &before_ids[..]);
}

#[test]
fn test_add_card_with_description() {
    let board = Board::new();
    let after = board.add_card(ColumnId::Done, "Ship it", "Tag and release v1.0");

    let card = after.column(ColumnId::Done).unwrap().cards.last().unwrap();
    assert_eq!(card.description.as_deref(), Some("Tag and release v1.0"));
}

#[test]
fn test_add_card_blank_description_becomes_none() {
    let board = Board::new();
    let after = board.add_card(ColumnId::Todo, "Title only", "   ");

    let card = after.column(ColumnId::Todo).unwrap().cards.last().unwrap();
    assert!(card.description.is_none());
}

#[test]
fn test_add_card_empty_title_is_noop() {
    let board = Board::seed();

    assert_eq!(board.add_card(ColumnId::Todo, "", "desc"), board);
    assert_eq!(board.add_card(ColumnId::Todo, "   ", "desc"), board);
}

#[test]
fn test_add_card_does_not_mutate_original() {
    let board = Board::seed();
    let snapshot = board.clone();

    let _ = board.add_card(ColumnId::Todo, "Write tests", "");

    assert_eq!(board, snapshot);
}

#[test]
fn test_added_cards_get_unique_ids() {
    let mut board = Board::new();
    for i in 0..50 {
        board = board.add_card(ColumnId::Todo, &format!("card {}", i), "");
    }

    let mut ids: Vec<String> = board
        .column(ColumnId::Todo)
        .unwrap()
        .cards
        .iter()
        .map(|c| c.id.clone())
        .collect();
    assert_eq!(ids.len(), 50);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

// === delete_card ===

#[test]
fn test_delete_card_removes_exactly_one() {
    let board = Board::seed();
    let after = board.delete_card(ColumnId::Todo, "task-1");

    assert_eq!(after.column(ColumnId::Todo).unwrap().cards.len(), 2);
    assert!(after.card(ColumnId::Todo, "task-1").is_none());
    assert_eq!(
        card_titles(&after, ColumnId::Todo),
        vec!["Define database schema", "Create initial UI mockups"]
    );
}

#[test]
fn test_delete_card_is_idempotent() {
    let board = Board::seed();
    let once = board.delete_card(ColumnId::Todo, "task-1");
    let twice = once.delete_card(ColumnId::Todo, "task-1");

    assert_eq!(once, twice);
}

#[test]
fn test_delete_unknown_card_is_noop() {
    let board = Board::seed();
    assert_eq!(board.delete_card(ColumnId::Todo, "task-99"), board);
}

#[test]
fn test_delete_card_wrong_column_is_noop() {
    let board = Board::seed();
    // task-4 lives in InProgress, not Todo
    assert_eq!(board.delete_card(ColumnId::Todo, "task-4"), board);
}

// === update_card ===

#[test]
fn test_update_card_changes_title_and_description() {
    let board = Board::seed();
    let after = board.update_card(ColumnId::Todo, "task-2", "New title", "New description");

    let card = after.card(ColumnId::Todo, "task-2").unwrap();
    assert_eq!(card.title, "New title");
    assert_eq!(card.description.as_deref(), Some("New description"));
}

#[test]
fn test_update_card_keeps_id_and_position() {
    let board = Board::seed();
    let after = board.update_card(ColumnId::Todo, "task-2", "New title", "");

    let column = after.column(ColumnId::Todo).unwrap();
    assert_eq!(column.cards[1].id, "task-2");
    assert_eq!(column.cards[0].title, "Setup project repository");
    assert_eq!(column.cards[2].title, "Create initial UI mockups");
}

#[test]
fn test_update_card_empty_description_clears_it() {
    let board = Board::seed();
    let after = board.update_card(ColumnId::Todo, "task-1", "Setup project repository", "");

    assert!(after.card(ColumnId::Todo, "task-1").unwrap().description.is_none());
}

#[test]
fn test_update_unknown_card_is_noop() {
    let board = Board::seed();
    assert_eq!(board.update_card(ColumnId::Done, "task-99", "x", "y"), board);
}

#[test]
fn test_update_leaves_other_columns_untouched() {
    let board = Board::seed();
    let after = board.update_card(ColumnId::InProgress, "task-4", "Ship API", "");

    assert_eq!(
        after.column(ColumnId::Todo),
        board.column(ColumnId::Todo)
    );
    assert_eq!(
        after.column(ColumnId::Done),
        board.column(ColumnId::Done)
    );
}

// === Scenario from the board's intended use ===

#[test]
fn test_add_then_delete_scenario() {
    let board = Board::seed();
    assert_eq!(board.column(ColumnId::Todo).unwrap().cards.len(), 3);

    let board = board.add_card(ColumnId::Todo, "Write tests", "");
    assert_eq!(board.column(ColumnId::Todo).unwrap().cards.len(), 4);
    assert_eq!(
        board.column(ColumnId::Todo).unwrap().cards.last().unwrap().title,
        "Write tests"
    );

    let board = board.delete_card(ColumnId::Todo, "task-1");
    let column = board.column(ColumnId::Todo).unwrap();
    assert_eq!(column.cards.len(), 3);
    assert!(board.card(ColumnId::Todo, "task-1").is_none());
    assert_eq!(column.cards[0].id, "task-2");
    assert_eq!(column.cards[1].id, "task-3");
    assert_eq!(column.cards[2].title, "Write tests");
}

//! End-to-end controller scenarios driven through JSON events.

use serde_json::json;
use tabula::{handle_event, initialize, Config, Event, Record, SortDirection, TabulaError};

const GRID_TOML: &str = r#"
columns = ["id", "name", "amount", "created"]
page_size = 2

[schema]
id_field = "id"
searchable = ["name"]
numeric = ["amount"]
dates = ["created"]
"#;

fn records() -> Vec<Record> {
    vec![
        Record::new()
            .with("id", "1")
            .with("name", "Ada Lovelace")
            .with("amount", 10)
            .with("created", "2024-03-01"),
        Record::new()
            .with("id", "2")
            .with("name", "Grace Hopper")
            .with("amount", 5)
            .with("created", "2023-12-24"),
        Record::new()
            .with("id", "3")
            .with("name", "Alan Turing")
            .with("amount", 20)
            .with("created", "2024-01-15"),
        Record::new().with("id", "4").with("name", "Edsger Dijkstra"),
    ]
}

fn send(state: &mut tabula::AppState, event: serde_json::Value) -> Result<bool, TabulaError> {
    let event = Event::from_json(&event.to_string())?;
    handle_event(state, &event)
}

fn visible_ids(state: &tabula::AppState) -> Vec<String> {
    state
        .compute_viewmodel()
        .rows
        .into_iter()
        .map(|row| row.id)
        .collect()
}

#[test]
fn header_clicks_cycle_through_sort_directions() {
    let config = Config::from_toml_str(GRID_TOML).unwrap();
    let mut state = initialize(&config, records()).unwrap();
    send(&mut state, json!({"type": "set_page_size", "page_size": 10})).unwrap();

    send(&mut state, json!({"type": "header_clicked", "column_index": 3})).unwrap();
    assert_eq!(visible_ids(&state), ["2", "1", "3", "4"]);

    send(&mut state, json!({"type": "header_clicked", "column_index": 3})).unwrap();
    assert_eq!(state.snapshot().current_sort.direction, SortDirection::Descending);
    assert_eq!(visible_ids(&state), ["3", "1", "2", "4"]);

    send(&mut state, json!({"type": "header_clicked", "column_index": 3})).unwrap();
    assert_eq!(state.snapshot().current_sort.direction, SortDirection::None);
    assert_eq!(visible_ids(&state), ["1", "2", "3", "4"]);

    send(&mut state, json!({"type": "header_clicked", "column_index": 4})).unwrap();
    assert_eq!(visible_ids(&state), ["2", "3", "1", "4"]);

    let vm = state.compute_viewmodel();
    assert_eq!(vm.headers.len(), 5);
    assert_eq!(vm.headers[4].sort, SortDirection::Ascending);
    assert_eq!(vm.headers[3].sort, SortDirection::None);

    // Selection column and out-of-range headers do nothing.
    assert!(!send(&mut state, json!({"type": "header_clicked", "column_index": 0})).unwrap());
    assert!(!send(&mut state, json!({"type": "header_clicked", "column_index": 9})).unwrap());
}

#[test]
fn search_filters_and_paging_compose() {
    let config = Config::from_toml_str(GRID_TOML).unwrap();
    let mut state = initialize(&config, records()).unwrap();
    assert_eq!(state.page_count(), 2);

    send(&mut state, json!({"type": "next_page"})).unwrap();
    assert_eq!(visible_ids(&state), ["3", "4"]);

    send(&mut state, json!({"type": "set_search_query", "query": "LA"})).unwrap();
    let vm = state.compute_viewmodel();
    assert_eq!(vm.page.page, 0);
    assert_eq!(vm.page.filtered_count, 2);
    assert_eq!(vm.search_query, "LA");
    assert_eq!(visible_ids(&state), ["1", "3"]);

    send(
        &mut state,
        json!({"type": "add_filter", "column": "created", "operator": "gt", "value": "2024-02-01"}),
    )
    .unwrap();
    assert_eq!(visible_ids(&state), ["1"]);

    send(&mut state, json!({"type": "set_search_query", "query": "nobody"})).unwrap();
    let vm = state.compute_viewmodel();
    assert!(vm.rows.is_empty());
    assert_eq!(vm.page.page_count, 1);
    assert_eq!(vm.page.first_row, 0);
    assert!(vm.empty_state.is_some());

    assert!(send(&mut state, json!({"type": "remove_filter", "column": "created"})).unwrap());
    assert!(!send(&mut state, json!({"type": "remove_filter", "column": "created"})).unwrap());

    send(&mut state, json!({"type": "set_search_query", "query": ""})).unwrap();
    assert_eq!(state.snapshot().filtered_count, 4);
}

#[test]
fn edits_keep_views_and_selection_in_step() {
    let config = Config::from_toml_str(GRID_TOML).unwrap();
    let mut state = initialize(&config, records()).unwrap();
    send(&mut state, json!({"type": "set_page_size", "page_size": 10})).unwrap();
    send(&mut state, json!({"type": "sort_by_column", "column": "amount"})).unwrap();

    send(&mut state, json!({"type": "toggle_row_selection", "id": "2"})).unwrap();
    let edit = json!({"type": "update_cell", "id": "2", "column": "amount", "value": "100"});
    send(&mut state, edit).unwrap();
    assert_eq!(visible_ids(&state), ["1", "3", "2", "4"]);

    let rekey = json!({"type": "update_cell", "id": "2", "column": "id", "value": "20"});
    send(&mut state, rekey).unwrap();
    assert!(state.is_selected("20"));
    assert!(!state.is_selected("2"));
    assert_eq!(visible_ids(&state), ["1", "3", "20", "4"]);

    // Colliding identifier edits are rejected without touching state.
    let before = state.snapshot().clone();
    let collision = json!({"type": "update_cell", "id": "20", "column": "id", "value": "1"});
    assert!(!send(&mut state, collision).unwrap());
    assert_eq!(state.snapshot(), &before);

    send(
        &mut state,
        json!({"type": "add_row", "record": {"id": "5", "name": "Barbara Liskov", "amount": 1}}),
    )
    .unwrap();
    assert_eq!(visible_ids(&state), ["5", "1", "3", "20", "4"]);

    send(&mut state, json!({"type": "delete_row", "id": "20"})).unwrap();
    assert_eq!(state.selected_ids().count(), 0);
    assert!(!send(&mut state, json!({"type": "delete_row", "id": "20"})).unwrap());

    let anonymous = json!({"type": "add_row", "record": {"name": "Anonymous"}});
    let err = send(&mut state, anonymous).unwrap_err();
    assert!(matches!(err, TabulaError::MissingIdentifier { .. }));
}

#[test]
fn select_all_tracks_the_filtered_view() {
    let config = Config::from_toml_str(GRID_TOML).unwrap();
    let mut state = initialize(&config, records()).unwrap();

    send(&mut state, json!({"type": "set_search_query", "query": "la"})).unwrap();
    send(&mut state, json!({"type": "toggle_select_all"})).unwrap();
    assert_eq!(state.selected_ids().collect::<Vec<_>>(), ["1", "3"]);
    assert!(state.compute_viewmodel().selection.all_selected);

    send(&mut state, json!({"type": "toggle_select_all"})).unwrap();
    assert_eq!(state.selected_ids().count(), 0);

    send(&mut state, json!({"type": "toggle_row_selection", "id": "4"})).unwrap();
    send(&mut state, json!({"type": "toggle_select_all"})).unwrap();
    assert_eq!(state.selected_ids().collect::<Vec<_>>(), ["1", "3"]);

    assert!(send(&mut state, json!({"type": "clear_selection"})).unwrap());
    assert!(!send(&mut state, json!({"type": "clear_selection"})).unwrap());
}

#[test]
fn view_model_serializes_for_the_host() {
    let config = Config::from_toml_str(GRID_TOML).unwrap();
    let state = initialize(&config, records()).unwrap();

    let value = serde_json::to_value(state.compute_viewmodel()).unwrap();
    assert_eq!(value["page"]["total_rows"], 4);
    assert_eq!(value["page"]["last_row"], 2);
    assert_eq!(value["rows"][0]["cells"], json!(["1", "Ada Lovelace", "10", "2024-03-01"]));
    assert_eq!(value["headers"][1]["column"], "id");
}

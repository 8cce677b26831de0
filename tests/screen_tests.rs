//! Integration tests for the presentation and flow layer.
//!
//! Drives the list and detail screens end to end against a real
//! provider: loading, placeholder presentation, edit/save, and the
//! delete and abandon-edit confirmation flows.

mod common;

use common::TestEnv;
use std::cell::RefCell;
use std::rc::Rc;
use tasklist::{
    BackAction, ConfirmationResponse, DetailEvent, DisplayRow, FlowOutcome, ListScreen, Navigation,
    PaneLayout, QueryLoader, QueryRequest, Task, TaskListAdapter,
};

fn list_screen(env: &TestEnv, layout: PaneLayout) -> ListScreen {
    ListScreen::new(env.provider.clone(), layout)
}

fn loaded_screen(env: &TestEnv, layout: PaneLayout) -> ListScreen {
    let mut screen = list_screen(env, layout);
    screen.load();
    screen.wait_for_load().expect("Failed to load task list");
    screen
}

// =============================================================================
// Presentation Tests
// =============================================================================

#[test]
fn test_empty_list_presents_exactly_one_placeholder() {
    let env = TestEnv::new();
    let screen = loaded_screen(&env, PaneLayout::SinglePane);

    assert_eq!(screen.adapter().item_count(), 1);
    match screen.adapter().bind(0).unwrap() {
        DisplayRow::Instructions(text) => assert!(text.contains("add")),
        DisplayRow::Task(task) => panic!("placeholder expected, got task {task:?}"),
    }
    assert!(screen.adapter().bind(1).is_err());
}

#[test]
fn test_n_tasks_present_n_rows() {
    let env = TestEnv::new();
    for i in 0..4 {
        env.insert_task(&format!("Task {i}"), None, i);
    }

    let screen = loaded_screen(&env, PaneLayout::SinglePane);
    assert_eq!(screen.adapter().item_count(), 4);
    for position in 0..4 {
        assert!(matches!(screen.adapter().bind(position).unwrap(), DisplayRow::Task(_)));
    }
}

#[test]
fn test_rows_follow_display_ordering() {
    let env = TestEnv::new();
    env.insert_task("Zebra", None, 0);
    env.insert_task("Apple", None, 1);
    env.insert_task("Mango", None, 0);

    let screen = loaded_screen(&env, PaneLayout::SinglePane);
    let names: Vec<String> = (0..screen.adapter().item_count())
        .map(|position| screen.adapter().task_at(position).unwrap().name)
        .collect();
    assert_eq!(names, ["Mango", "Zebra", "Apple"]);
}

#[test]
fn test_adapter_callbacks_fire_with_row_snapshots() {
    let env = TestEnv::new();
    env.insert_task("Clickable", Some("Has actions"), 1);

    let mut screen = loaded_screen(&env, PaneLayout::SinglePane);

    let deleted: Rc<RefCell<Option<Task>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&deleted);
    screen
        .adapter_mut()
        .set_delete_listener(move |task| *sink.borrow_mut() = Some(task));

    screen.adapter_mut().click_delete(0).unwrap();
    let task = deleted.borrow().clone().expect("delete listener not called");
    assert_eq!(task.name, "Clickable");
    assert_eq!(task.description, Some("Has actions".to_string()));
}

#[test]
fn test_reload_notifies_observers() {
    let env = TestEnv::new();
    env.insert_task("One", None, 0);

    let mut screen = loaded_screen(&env, PaneLayout::SinglePane);
    let notified = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&notified);
    screen.adapter_mut().register_observer(move || *counter.borrow_mut() += 1);

    env.insert_task("Two", None, 0);
    screen.load();
    screen.wait_for_load().unwrap();

    assert_eq!(*notified.borrow(), 1);
    assert_eq!(screen.adapter().item_count(), 2);
}

// =============================================================================
// Edit Flow Tests
// =============================================================================

#[test]
fn test_single_pane_edit_flow_saves_and_reloads() {
    let env = TestEnv::new();
    let id = env.insert_task("Before", None, 0);

    let mut screen = loaded_screen(&env, PaneLayout::SinglePane);
    let task = screen.adapter().task_at(0).unwrap();

    let mut detail = match screen.edit_request(Some(task)) {
        Navigation::Detached(detail) => detail,
        Navigation::InPane => panic!("single-pane must detach the detail screen"),
    };

    detail.set_name("After");
    assert_eq!(detail.save(&env.provider).unwrap(), DetailEvent::Saved);

    screen.load();
    screen.wait_for_load().unwrap();
    assert_eq!(screen.adapter().task_at(0).unwrap().name, "After");
    assert_eq!(env.query_task(id).unwrap().name, "After");
}

#[test]
fn test_two_pane_save_then_close_detail() {
    let env = TestEnv::new();
    env.insert_task("Original", None, 0);

    let mut screen = loaded_screen(&env, PaneLayout::TwoPane);
    let task = screen.adapter().task_at(0).unwrap();

    assert!(matches!(screen.edit_request(Some(task)), Navigation::InPane));
    let detail = screen.detail_mut().expect("detail pane not hosted");
    detail.set_description("Now described");
    assert_eq!(detail.save(&env.provider).unwrap(), DetailEvent::Saved);

    // the host removes the pane once it sees the save event
    screen.close_detail();
    assert!(screen.detail().is_none());

    assert_eq!(env.query_task(1).unwrap().description, Some("Now described".to_string()));
}

#[test]
fn test_abandon_edit_flow() {
    let env = TestEnv::new();
    let id = env.insert_task("Keep me", None, 0);

    let mut screen = loaded_screen(&env, PaneLayout::TwoPane);
    let task = screen.adapter().task_at(0).unwrap();
    screen.edit_request(Some(task));
    screen.detail_mut().unwrap().set_name("Discarded change");

    assert_eq!(screen.back_pressed().unwrap(), BackAction::ConfirmationShown);
    let outcome = screen.resolve_confirmation(ConfirmationResponse::Confirmed).unwrap();
    assert_eq!(outcome, FlowOutcome::EditAbandoned(DetailEvent::Cancelled));

    // nothing was written
    assert_eq!(env.query_task(id).unwrap().name, "Keep me");
}

// =============================================================================
// Delete Flow Tests
// =============================================================================

#[test]
fn test_confirmed_delete_removes_task() {
    let env = TestEnv::new();
    let id = env.insert_task("Condemned", None, 0);

    let mut screen = loaded_screen(&env, PaneLayout::SinglePane);
    let task = screen.adapter().task_at(0).unwrap();

    let request = screen.delete_request(&task).unwrap();
    assert!(request.message.contains("Condemned"));

    let outcome = screen.resolve_confirmation(ConfirmationResponse::Confirmed).unwrap();
    assert_eq!(outcome, FlowOutcome::Deleted(1));
    assert!(env.query_task(id).is_none());
}

#[test]
fn test_declined_delete_keeps_task() {
    let env = TestEnv::new();
    let id = env.insert_task("Spared", None, 0);

    let mut screen = loaded_screen(&env, PaneLayout::SinglePane);
    let task = screen.adapter().task_at(0).unwrap();
    screen.delete_request(&task).unwrap();

    let outcome = screen.resolve_confirmation(ConfirmationResponse::Declined).unwrap();
    assert_eq!(outcome, FlowOutcome::Unchanged);
    assert!(env.query_task(id).is_some());
}

#[test]
fn test_delete_confirmed_after_row_already_gone() {
    // the prompt names a snapshot; if the row vanished in the meantime
    // the confirmed delete simply affects zero rows
    let env = TestEnv::new();
    let id = env.insert_task("Racy", None, 0);

    let mut screen = loaded_screen(&env, PaneLayout::SinglePane);
    let task = screen.adapter().task_at(0).unwrap();
    screen.delete_request(&task).unwrap();

    env.delete_task(id);

    let outcome = screen.resolve_confirmation(ConfirmationResponse::Confirmed).unwrap();
    assert_eq!(outcome, FlowOutcome::Deleted(0));
}

// =============================================================================
// Loader Tests
// =============================================================================

#[test]
fn test_loader_results_can_be_discarded() {
    let env = TestEnv::new();
    env.insert_task("Unseen", None, 0);

    // screen torn down while the load is outstanding: dropping the
    // handle discards the result instead of applying it
    let loader = QueryLoader::spawn(env.provider.clone(), QueryRequest::task_list());
    drop(loader);

    // a fresh adapter is untouched by the discarded load
    let adapter = TaskListAdapter::new();
    assert_eq!(adapter.item_count(), 1);
    assert!(matches!(adapter.bind(0).unwrap(), DisplayRow::Instructions(_)));
}

#[test]
fn test_replacing_inflight_load_uses_latest_result() {
    let env = TestEnv::new();
    env.insert_task("Only", None, 0);

    let mut screen = list_screen(&env, PaneLayout::SinglePane);
    screen.load();
    screen.load(); // first load's handle is dropped, its result discarded
    screen.wait_for_load().unwrap();

    assert_eq!(screen.adapter().item_count(), 1);
    assert_eq!(screen.adapter().task_at(0).unwrap().name, "Only");
}

#[test]
fn test_apply_loaded_polls_without_blocking() {
    let env = TestEnv::new();
    env.insert_task("Polled", None, 0);

    let mut screen = list_screen(&env, PaneLayout::SinglePane);
    assert!(!screen.apply_loaded().unwrap());

    screen.load();
    let mut applied = false;
    for _ in 0..100 {
        if screen.apply_loaded().unwrap() {
            applied = true;
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    assert!(applied, "load never delivered");
    assert_eq!(screen.adapter().task_at(0).unwrap().name, "Polled");
}

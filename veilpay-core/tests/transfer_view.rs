//! Integration tests for the transfer view, driven against the
//! in-memory directory doubles.

use std::sync::Arc;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use veilpay_core::testing::{
    MockCommitmentDirectory, MockUserDirectory, RecordingNotifier, RecordingRouter,
};
use veilpay_core::{
    ClientStorage, Route, TokenDisplay, TransferError, TransferView, ViewEvent,
};

struct Harness {
    view: TransferView,
    events: UnboundedReceiver<ViewEvent>,
    commitment_dir: MockCommitmentDirectory,
    user_dir: MockUserDirectory,
    notifier: RecordingNotifier,
    router: RecordingRouter,
}

fn build(values: &[u128], names: &[&str]) -> Harness {
    let commitment_dir = MockCommitmentDirectory::with_values(values);
    let user_dir = MockUserDirectory::with_names(names);
    let notifier = RecordingNotifier::new();
    let router = RecordingRouter::new();

    let (view, events) = TransferView::new(
        Arc::new(commitment_dir.clone()),
        Arc::new(user_dir.clone()),
        Arc::new(notifier.clone()),
        Arc::new(router.clone()),
    );

    Harness {
        view,
        events,
        commitment_dir,
        user_dir,
        notifier,
        router,
    }
}

/// Load the list and fill the form with a valid two-commitment split.
async fn loaded_for_transfer(values: &[u128], amount: u128, receiver: &str) -> Harness {
    let mut harness = build(values, &["alice", "bob"]);
    harness.view.load_commitments().await;
    harness.view.select(0);
    harness.view.select(1);
    harness.view.transfer_value = Some(amount);
    harness.view.receiver_name = Some(receiver.to_string());
    harness
}

#[tokio::test]
async fn load_annotates_records_with_position_ids() {
    let mut harness = build(&[5, 7, 9], &[]);
    harness.view.load_commitments().await;

    let commitments = harness.view.commitments();
    assert_eq!(commitments.len(), 3);
    for (index, commitment) in commitments.iter().enumerate() {
        assert_eq!(commitment.id, index);
        assert!(!commitment.selected);
    }
    assert!(!harness.view.is_requesting());
}

#[tokio::test]
async fn empty_listing_leaves_local_list_untouched() {
    let mut harness = build(&[5, 7], &[]);
    harness.view.load_commitments().await;
    assert_eq!(harness.view.commitments().len(), 2);

    harness.commitment_dir.set_commitments(Vec::new());
    harness.view.load_commitments().await;
    assert_eq!(harness.view.commitments().len(), 2);
}

#[tokio::test]
async fn listing_failure_reports_through_notifier() {
    let mut harness = build(&[5], &[]);
    harness.commitment_dir.set_fail_listing(true);
    harness.view.load_commitments().await;

    assert_eq!(harness.notifier.errors(), vec!["Please try again."]);
    assert!(harness.view.commitments().is_empty());
    assert!(!harness.view.is_requesting());
}

#[tokio::test]
async fn user_listing_failure_reports_through_notifier() {
    let mut harness = build(&[], &["alice"]);
    harness.user_dir.set_fail_listing(true);
    harness.view.load_users().await;

    assert_eq!(harness.notifier.errors(), vec!["Please try again."]);
    assert!(harness.view.users().is_empty());
}

#[tokio::test(start_paused = true)]
async fn initialize_loads_both_directories_and_token_display() {
    let dir = tempfile::tempdir().unwrap();
    let storage = ClientStorage::new(dir.path());
    storage
        .set_token_display(TokenDisplay {
            name: Some("Example Token".to_string()),
            symbol: Some("EXT".to_string()),
        })
        .unwrap();

    let mut harness = build(&[5, 7], &["alice", "bob"]);
    harness.view.initialize(&storage).await;

    assert_eq!(harness.view.token_name.as_deref(), Some("Example Token"));
    assert_eq!(harness.view.token_symbol.as_deref(), Some("EXT"));
    assert_eq!(harness.view.commitments().len(), 2);
    assert_eq!(harness.view.users().len(), 2);

    // the deferred focus event arrives once the 500ms delay elapses
    assert_eq!(harness.events.recv().await, Some(ViewEvent::FocusSearch));
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_focus() {
    let dir = tempfile::tempdir().unwrap();
    let storage = ClientStorage::new(dir.path());

    let mut harness = build(&[5], &[]);
    harness.view.initialize(&storage).await;
    harness.view.teardown();

    tokio::time::advance(std::time::Duration::from_secs(2)).await;
    tokio::task::yield_now().await;

    assert!(matches!(harness.events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn transfer_rejects_wrong_selection_counts() {
    for selected in [0usize, 1, 3] {
        let mut harness = build(&[5, 7, 9, 11], &["bob"]);
        harness.view.load_commitments().await;
        for id in 0..selected {
            assert!(harness.view.select(id));
        }
        harness.view.transfer_value = Some(1);
        harness.view.receiver_name = Some("bob".to_string());

        let result = harness.view.initiate_transfer().await;
        assert!(matches!(
            result,
            Err(TransferError::InvalidSelection { count }) if count == selected
        ));
        assert_eq!(
            harness.notifier.warnings(),
            vec!["Invalid commitment Selection."]
        );
        assert_eq!(harness.commitment_dir.transfer_count(), 0);
    }
}

#[tokio::test]
async fn transfer_rejects_missing_fields() {
    // recipient missing
    let mut harness = loaded_for_transfer(&[20, 5], 10, "bob").await;
    harness.view.receiver_name = None;
    let result = harness.view.initiate_transfer().await;
    assert!(matches!(result, Err(TransferError::MissingFields)));
    assert_eq!(harness.notifier.warnings(), vec!["All fields are mandatory."]);
    assert_eq!(harness.commitment_dir.transfer_count(), 0);

    // amount missing
    let mut harness = loaded_for_transfer(&[20, 5], 10, "bob").await;
    harness.view.transfer_value = None;
    assert!(matches!(
        harness.view.initiate_transfer().await,
        Err(TransferError::MissingFields)
    ));
    assert_eq!(harness.commitment_dir.transfer_count(), 0);

    // a zero amount counts as unset
    let mut harness = loaded_for_transfer(&[20, 5], 0, "bob").await;
    assert!(matches!(
        harness.view.initiate_transfer().await,
        Err(TransferError::MissingFields)
    ));
    assert_eq!(harness.commitment_dir.transfer_count(), 0);
}

#[tokio::test]
async fn transfer_rejects_amount_above_selected_total() {
    let mut harness = loaded_for_transfer(&[20, 5], 26, "bob").await;

    let result = harness.view.initiate_transfer().await;
    assert!(matches!(
        result,
        Err(TransferError::AmountExceedsTotal {
            amount: 26,
            available: 25
        })
    ));
    assert_eq!(
        harness.notifier.warnings(),
        vec!["Transfer amount exceeds selected commitment value."]
    );
    assert_eq!(harness.commitment_dir.transfer_count(), 0);
}

#[tokio::test]
async fn successful_transfer_splits_and_conserves_value() {
    let mut harness = loaded_for_transfer(&[20, 5, 9], 17, "bob").await;

    let outcome = harness.view.initiate_transfer().await.unwrap();

    let log = harness.commitment_dir.transfer_log();
    assert_eq!(log.len(), 1);
    let request = &log[0];
    assert_eq!(request.receiver_name, "bob");
    assert_eq!(request.output_commitments[0].value.decode(), Some(17));
    assert_eq!(request.output_commitments[1].value.decode(), Some(8));

    let inputs: u128 = request
        .input_commitments
        .iter()
        .map(|c| c.numeric_value().unwrap())
        .sum();
    let outputs: u128 = request
        .output_commitments
        .iter()
        .map(|o| o.value.decode().unwrap())
        .sum();
    assert_eq!(inputs, outputs);

    assert_eq!(harness.notifier.infos(), vec!["Transferring to bob."]);

    // consumed commitments left the local list, the form reset
    assert_eq!(harness.view.commitments().len(), 1);
    assert_eq!(harness.view.commitments()[0].numeric_value(), Some(9));
    assert!(harness.view.selection().is_empty());
    assert!(harness.view.transfer_value.is_none());
    assert!(harness.view.receiver_name.is_none());

    // commitments remain, so no navigation
    assert!(!outcome.navigated);
    assert!(harness.router.navigations().is_empty());
}

#[tokio::test]
async fn emptying_the_list_navigates_to_overview_once() {
    let mut harness = loaded_for_transfer(&[20, 5], 17, "bob").await;

    let outcome = harness.view.initiate_transfer().await.unwrap();

    assert!(outcome.navigated);
    assert!(harness.view.commitments().is_empty());
    assert_eq!(
        harness.router.navigations(),
        vec![Route::Overview {
            selected_tab: "ft-commitment".to_string()
        }]
    );
    assert_eq!(
        harness.router.navigations()[0].to_uri(),
        "/overview?selectedTab=ft-commitment"
    );
}

#[tokio::test]
async fn failed_transfer_keeps_state_and_reports() {
    let mut harness = loaded_for_transfer(&[20, 5], 17, "bob").await;
    harness.commitment_dir.set_fail_transfer(true);

    let result = harness.view.initiate_transfer().await;
    assert!(matches!(result, Err(TransferError::Directory(_))));
    assert_eq!(harness.notifier.errors(), vec!["Please try again."]);

    // nothing consumed, nothing reset, flag cleared
    assert_eq!(harness.view.commitments().len(), 2);
    assert_eq!(harness.view.selection().len(), 2);
    assert!(harness.router.navigations().is_empty());
    assert!(!harness.view.is_requesting());
}

#[tokio::test]
async fn on_remove_drops_a_single_selection_entry() {
    let mut harness = build(&[5, 7], &[]);
    harness.view.load_commitments().await;
    harness.view.select(0);
    harness.view.select(1);
    assert_eq!(harness.view.selection().len(), 2);

    harness.view.on_remove(0);

    assert_eq!(harness.view.selection().len(), 1);
    assert_eq!(harness.view.selection()[0].id, 1);
    assert!(!harness.view.commitments()[0].selected);
    assert!(harness.view.commitments()[1].selected);
}

#[tokio::test]
async fn select_ignores_unknown_and_duplicate_ids() {
    let mut harness = build(&[5], &[]);
    harness.view.load_commitments().await;

    assert!(harness.view.select(0));
    assert!(!harness.view.select(0));
    assert!(!harness.view.select(42));
    assert_eq!(harness.view.selection().len(), 1);
}

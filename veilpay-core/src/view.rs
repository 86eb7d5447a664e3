//! The token-commitment transfer view.
//!
//! [`TransferView`] owns the form state for the transfer screen: the
//! commitment list, the current selection, the transfer amount and the
//! recipient. It orchestrates the directory calls and reports outcomes
//! through injected [`Notifier`] and [`Router`] collaborators so the same
//! flow drives a terminal front-end and the in-memory test doubles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::directory::{CommitmentDirectory, UserDirectory};
use crate::errors::{DirectoryError, TransferError};
use crate::models::{Commitment, Envelope, TransferRequest, User};
use crate::storage::ClientStorage;

/// Delay before the search input receives focus after the view renders.
pub const FOCUS_DELAY: Duration = Duration::from_millis(500);

/// Surfaces non-blocking notifications to the user.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// A page the router can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The overview page, opened on a specific tab.
    Overview {
        /// Tab preselected via query parameter
        selected_tab: String,
    },
}

impl Route {
    /// The overview page with the ft-commitment tab preselected.
    pub fn commitment_overview() -> Self {
        Self::Overview {
            selected_tab: "ft-commitment".to_string(),
        }
    }

    /// Render the route as a URI, query parameters included.
    pub fn to_uri(&self) -> String {
        match self {
            Self::Overview { selected_tab } => {
                format!("/overview?selectedTab={}", selected_tab)
            }
        }
    }
}

/// Performs page navigation on behalf of the view.
pub trait Router: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Events the view pushes to whatever is rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search input should receive focus.
    FocusSearch,
}

/// Result of a successfully submitted transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The request that was submitted to the gateway
    pub request: TransferRequest,
    /// Whether the view navigated to the overview because no
    /// commitments remain
    pub navigated: bool,
}

/// View state and orchestration for the commitment transfer screen.
pub struct TransferView {
    commitment_dir: Arc<dyn CommitmentDirectory>,
    user_dir: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    router: Arc<dyn Router>,
    events: UnboundedSender<ViewEvent>,

    /// Token name, read from cached display state
    pub token_name: Option<String>,
    /// Token symbol, read from cached display state
    pub token_symbol: Option<String>,
    /// Transfer amount entered by the user
    pub transfer_value: Option<u128>,
    /// Registered name of the recipient
    pub receiver_name: Option<String>,

    commitments: Vec<Commitment>,
    selection: Vec<Commitment>,
    users: Vec<User>,
    is_requesting: bool,
    focus_task: Option<JoinHandle<()>>,
}

impl TransferView {
    /// Create a view wired to its collaborators.
    ///
    /// Returns the view and the event receiver the rendering side should
    /// listen on.
    pub fn new(
        commitment_dir: Arc<dyn CommitmentDirectory>,
        user_dir: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
        router: Arc<dyn Router>,
    ) -> (Self, UnboundedReceiver<ViewEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let view = Self {
            commitment_dir,
            user_dir,
            notifier,
            router,
            events,
            token_name: None,
            token_symbol: None,
            transfer_value: None,
            receiver_name: None,
            commitments: Vec::new(),
            selection: Vec::new(),
            users: Vec::new(),
            is_requesting: false,
            focus_task: None,
        };
        (view, receiver)
    }

    /// Initialize the view: read the cached token display strings, fetch
    /// users and commitments concurrently, and schedule the one-time
    /// focus event.
    ///
    /// The two fetches are independent requests with no ordering
    /// guarantee; each writes to its own field.
    pub async fn initialize(&mut self, storage: &ClientStorage) {
        match storage.token_display() {
            Ok(display) => {
                self.token_name = display.name;
                self.token_symbol = display.symbol;
            }
            Err(err) => {
                tracing::warn!("Failed to read cached token display: {:#}", err);
            }
        }

        self.is_requesting = true;
        let user_dir = Arc::clone(&self.user_dir);
        let commitment_dir = Arc::clone(&self.commitment_dir);
        let (users, commitments) = tokio::join!(
            user_dir.get_registered_names(),
            commitment_dir.get_commitments(),
        );
        self.apply_users(users);
        self.apply_commitments(commitments);
        self.is_requesting = false;

        self.schedule_focus();
    }

    /// Fetch the commitment list and replace the local one.
    pub async fn load_commitments(&mut self) {
        self.is_requesting = true;
        let result = self.commitment_dir.get_commitments().await;
        self.apply_commitments(result);
        self.is_requesting = false;
    }

    /// Fetch the registered-name list.
    pub async fn load_users(&mut self) {
        self.is_requesting = true;
        let result = self.user_dir.get_registered_names().await;
        self.apply_users(result);
        self.is_requesting = false;
    }

    fn apply_commitments(&mut self, result: Result<Envelope<Vec<Commitment>>, DirectoryError>) {
        match result {
            // An empty payload leaves the current list untouched.
            Ok(envelope) if !envelope.data.is_empty() => {
                self.commitments = envelope
                    .data
                    .into_iter()
                    .enumerate()
                    .map(|(index, mut commitment)| {
                        commitment.selected = false;
                        commitment.id = index;
                        commitment
                    })
                    .collect();
            }
            Ok(_) => {}
            Err(err) => {
                tracing::error!("Error in listing commitments: {}", err);
                self.notifier.error("Please try again.");
            }
        }
    }

    fn apply_users(&mut self, result: Result<Envelope<Vec<User>>, DirectoryError>) {
        match result {
            Ok(envelope) => {
                self.users = envelope.data;
            }
            Err(err) => {
                tracing::error!("Error in listing registered names: {}", err);
                self.notifier.error("Please try again.");
            }
        }
    }

    /// Add the commitment with the given id to the selection.
    ///
    /// Returns false when the id is unknown or the commitment is already
    /// selected. Selection size is not capped here; the transfer
    /// validates it.
    pub fn select(&mut self, id: usize) -> bool {
        if self.selection.iter().any(|c| c.id == id) {
            return false;
        }
        let Some(commitment) = self.commitments.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        commitment.selected = true;
        let commitment = commitment.clone();
        self.selection.push(commitment);
        true
    }

    /// Remove one entry from the selection by identity, producing a new
    /// list instance.
    pub fn on_remove(&mut self, id: usize) {
        self.selection = self
            .selection
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        if let Some(commitment) = self.commitments.iter_mut().find(|c| c.id == id) {
            commitment.selected = false;
        }
    }

    /// Validate the form, split the selected pair, and submit the
    /// transfer.
    ///
    /// Validation failures warn through the notifier and abort before
    /// any network call. On success the consumed commitments leave the
    /// local list, the form resets, and the view navigates to the
    /// overview when nothing remains.
    pub async fn initiate_transfer(&mut self) -> Result<TransferOutcome, TransferError> {
        let count = self.selection.len();
        if count != 2 {
            self.notifier.warning("Invalid commitment Selection.");
            return Err(TransferError::InvalidSelection { count });
        }
        let first = self.selection[0].clone();
        let second = self.selection[1].clone();

        let (transfer_value, receiver_name) = match (self.transfer_value, &self.receiver_name) {
            (Some(value), Some(name)) if value > 0 && !name.is_empty() => (value, name.clone()),
            _ => {
                self.notifier.warning("All fields are mandatory.");
                return Err(TransferError::MissingFields);
            }
        };

        let v1 = first.numeric_value().ok_or_else(|| {
            self.notifier.warning("Invalid commitment Selection.");
            TransferError::InvalidValue {
                value: first.value.clone(),
            }
        })?;
        let v2 = second.numeric_value().ok_or_else(|| {
            self.notifier.warning("Invalid commitment Selection.");
            TransferError::InvalidValue {
                value: second.value.clone(),
            }
        })?;
        let available = v1.checked_add(v2).ok_or_else(|| {
            self.notifier.warning("Invalid commitment Selection.");
            TransferError::InvalidValue {
                value: format!("{} + {}", first.value, second.value),
            }
        })?;

        if transfer_value > available {
            self.notifier
                .warning("Transfer amount exceeds selected commitment value.");
            return Err(TransferError::AmountExceedsTotal {
                amount: transfer_value,
                available,
            });
        }
        let change = available - transfer_value;

        self.is_requesting = true;
        let request = TransferRequest::new(
            [first.clone(), second.clone()],
            transfer_value,
            change,
            receiver_name.clone(),
        );
        let result = self.commitment_dir.transfer(&request).await;
        self.is_requesting = false;

        match result {
            Ok(()) => {
                self.notifier
                    .info(&format!("Transferring to {}.", receiver_name));

                // delete used commitments from the local list
                self.remove_commitment(first.id);
                self.remove_commitment(second.id);

                // reset the form
                self.selection = Vec::new();
                self.transfer_value = None;
                self.receiver_name = None;

                // navigate to the overview page if no commitment is left
                let navigated = self.commitments.is_empty();
                if navigated {
                    self.router.navigate(Route::commitment_overview());
                }

                Ok(TransferOutcome { request, navigated })
            }
            Err(err) => {
                self.notifier.error("Please try again.");
                Err(err.into())
            }
        }
    }

    /// Remove the first commitment matching the id from the local list.
    fn remove_commitment(&mut self, id: usize) {
        if let Some(position) = self.commitments.iter().position(|c| c.id == id) {
            self.commitments.remove(position);
        }
    }

    /// Cancel any pending deferred work. Also runs on drop.
    pub fn teardown(&mut self) {
        if let Some(task) = self.focus_task.take() {
            task.abort();
        }
    }

    pub fn commitments(&self) -> &[Commitment] {
        &self.commitments
    }

    pub fn selection(&self) -> &[Commitment] {
        &self.selection
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Advisory flag showing a request is in flight. Display state only;
    /// it does not lock out re-entrant callers.
    pub fn is_requesting(&self) -> bool {
        self.is_requesting
    }

    fn schedule_focus(&mut self) {
        self.teardown();
        let events = self.events.clone();
        self.focus_task = Some(tokio::spawn(async move {
            tokio::time::sleep(FOCUS_DELAY).await;
            let _ = events.send(ViewEvent::FocusSearch);
        }));
    }
}

impl Drop for TransferView {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Case-insensitive substring match of a search term against the numeric
/// rendering of a commitment's value.
///
/// Absent or unreadable items never match.
pub fn matches_search(term: &str, item: Option<&Commitment>) -> bool {
    let Some(item) = item else {
        return false;
    };
    let Some(value) = item.numeric_value() else {
        return false;
    };
    value
        .to_string()
        .to_lowercase()
        .contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Commitment;

    #[test]
    fn test_matches_search() {
        let commitment = Commitment::new("105", "0xaa", "0x01", "alice");
        assert!(matches_search("5", Some(&commitment)));
        assert!(matches_search("105", Some(&commitment)));
        assert!(!matches_search("9", Some(&commitment)));
        assert!(!matches_search("5", None));
    }

    #[test]
    fn test_matches_search_hex_value() {
        // 0x69 == 105, matched by its numeric rendering
        let commitment = Commitment::new("0x69", "0xaa", "0x01", "alice");
        assert!(matches_search("105", Some(&commitment)));
        assert!(!matches_search("69", Some(&commitment)));
    }

    #[test]
    fn test_route_uri() {
        assert_eq!(
            Route::commitment_overview().to_uri(),
            "/overview?selectedTab=ft-commitment"
        );
    }
}

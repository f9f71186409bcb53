use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{Instrument, debug, debug_span, error};
use tusklist_common::{Account, AccountId, Relationship};

use super::merge::{PageMerge, merge_page};
use super::{
    BlockActions, BlockVerb, CallGroup, FetchOutcome, FetchPhase, ListEntry, ListError,
    ListOptions, LoadMoreTrigger, PageSource, RelationshipKind, RelationshipSource, SkipReason,
    Viewport,
};
use crate::client::MastodonClient;

/// Paginated list of accounts related to the user.
///
/// Holds the displayed entries and the pagination phase for one follows,
/// followers, blocks or mutes list, and reacts to the presentation layer's
/// gestures. Every method takes `&self`, so the list can be shared between
/// the event handlers that drive it. At most one page fetch is outstanding
/// at a time; overlapping requests are skipped, not queued.
///
/// The presentation layer observes the list through
/// [`subscribe_entries`](Self::subscribe_entries) and
/// [`subscribe_phase`](Self::subscribe_phase).
///
/// Dropping the list, or calling [`close`](Self::close), cancels all of its
/// outstanding network calls.
pub struct RelationshipList<S, A> {
    kind: RelationshipKind,
    source: S,
    actions: A,
    state: Mutex<ListState>,
    phase: watch::Sender<FetchPhase>,
    entries: watch::Sender<Arc<[ListEntry]>>,
    calls: CallGroup,
}

#[derive(Debug)]
struct ListState {
    entries: Vec<ListEntry>,
    phase: FetchPhase,
    in_flight: bool,
    trigger: LoadMoreTrigger,
}

impl<C> RelationshipList<RelationshipSource<C>, Arc<MastodonClient<C>>> {
    /// List `kind` for `account` using the REST API, with default options
    pub fn from_client(
        client: Arc<MastodonClient<C>>,
        kind: RelationshipKind,
        account: Option<AccountId>,
    ) -> Result<Self, ListError> {
        let source = RelationshipSource::new(client.clone(), kind, account)?;
        Ok(Self::new(kind, source, client))
    }
}

impl<S, A> RelationshipList<S, A> {
    /// Create an empty list with default options
    pub fn new(kind: RelationshipKind, source: S, actions: A) -> Self {
        Self::with_options(kind, source, actions, ListOptions::default())
    }

    /// Create an empty list
    pub fn with_options(kind: RelationshipKind, source: S, actions: A, options: ListOptions) -> Self {
        let (phase, _) = watch::channel(FetchPhase::Idle);
        let (entries, _) = watch::channel(Arc::<[ListEntry]>::from(Vec::new()));
        Self {
            kind,
            source,
            actions,
            state: Mutex::new(ListState {
                entries: Vec::new(),
                phase: FetchPhase::Idle,
                in_flight: false,
                trigger: LoadMoreTrigger::new(options.visible_threshold),
            }),
            phase,
            entries,
            calls: CallGroup::new(),
        }
    }

    /// Which list this is
    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Current pagination phase
    pub fn phase(&self) -> FetchPhase {
        *self.phase.borrow()
    }

    /// Currently displayed entries, in display order
    pub fn entries(&self) -> Arc<[ListEntry]> {
        self.entries.borrow().clone()
    }

    /// Watch the pagination phase, for the list footer
    pub fn subscribe_phase(&self) -> watch::Receiver<FetchPhase> {
        self.phase.subscribe()
    }

    /// Watch the displayed entries
    pub fn subscribe_entries(&self) -> watch::Receiver<Arc<[ListEntry]>> {
        self.entries.subscribe()
    }

    /// The account behind a tapped row, for navigating to its profile
    pub fn view_account(&self, position: usize) -> Result<Option<AccountId>, ListError> {
        if self.is_closed() {
            return Err(ListError::Closed);
        }
        let id = self
            .entries
            .borrow()
            .get(position)
            .map(|entry| entry.account.id.clone());
        debug!(kind = %self.kind, position, account = ?id.as_deref(), "view account");
        Ok(id)
    }

    /// Scroll back to the top after a tab reselection.
    ///
    /// Resets the load-more trigger so the jump itself does not request a
    /// page. Returns `false`, doing nothing, for lists that do not support
    /// jumping; otherwise the caller scrolls its viewport to offset 0.
    pub async fn jump_to_top(&self) -> Result<bool, ListError> {
        if self.is_closed() {
            return Err(ListError::Closed);
        }
        if !self.kind.allows_jump_to_top() {
            return Ok(false);
        }
        self.state.lock().await.trigger.reset();
        Ok(true)
    }

    /// Tear the list down, cancelling every outstanding call
    pub fn close(&self) {
        debug!(kind = %self.kind, "closing relationship list");
        self.calls.cancel();
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.calls.is_cancelled()
    }

    fn set_phase(&self, state: &mut ListState, phase: FetchPhase) {
        if state.phase != phase {
            debug!(from = ?state.phase, to = ?phase, "fetch phase changed");
        }
        state.phase = phase;
        self.phase.send_replace(phase);
    }

    fn publish_entries(&self, state: &ListState) {
        self.entries.send_replace(Arc::from(state.entries.clone()));
    }

    fn entry(&self, account: Account) -> ListEntry {
        ListEntry {
            account,
            blocked: self.kind == RelationshipKind::Blocks,
        }
    }

    fn apply_page(
        &self,
        state: &mut ListState,
        cursor: Option<&AccountId>,
        page: Vec<Account>,
    ) -> FetchOutcome {
        let received = page.len();
        match merge_page(cursor, page, &state.entries) {
            PageMerge::Replace(page) => {
                let count = page.len();
                state.entries = page.into_iter().map(|a| self.entry(a)).collect();
                state.trigger.reset();
                self.publish_entries(state);
                self.set_phase(state, FetchPhase::Loading);
                debug!(received, count, "replaced list");
                FetchOutcome::Replaced(count)
            }
            PageMerge::Append(page) => {
                let count = page.len();
                state.entries.extend(page.into_iter().map(|a| self.entry(a)));
                self.publish_entries(state);
                self.set_phase(state, FetchPhase::Loading);
                debug!(received, count, total = state.entries.len(), "appended page");
                FetchOutcome::Appended(count)
            }
            PageMerge::EndOfData => {
                self.set_phase(state, FetchPhase::EndOfData);
                debug!(received, "reached end of list");
                FetchOutcome::EndOfData
            }
        }
    }
}

impl<S: PageSource, A> RelationshipList<S, A> {
    /// Fetch the page after `cursor`, or the first page when `cursor` is
    /// `None`.
    ///
    /// A first page replaces the displayed entries; a continuation page is
    /// appended unless it is empty or repeats the cursor account, which ends
    /// the list. On failure the entries are left alone and the phase moves to
    /// [`FetchPhase::Retry`].
    ///
    /// Skipped while another fetch is outstanding, and for continuations
    /// once the list has ended.
    pub async fn fetch_next_page(
        &self,
        cursor: Option<AccountId>,
    ) -> Result<FetchOutcome, ListError> {
        let span = debug_span!("fetch_next_page", kind = %self.kind, cursor = ?cursor.as_deref());
        async move {
            {
                let mut state = self.state.lock().await;
                if self.calls.is_cancelled() {
                    return Err(ListError::Closed);
                }
                if state.in_flight {
                    debug!("fetch already in flight");
                    return Ok(FetchOutcome::Skipped(SkipReason::InFlight));
                }
                if cursor.is_some() && state.phase == FetchPhase::EndOfData {
                    return Ok(FetchOutcome::Skipped(SkipReason::EndOfData));
                }
                state.in_flight = true;
                self.set_phase(&mut state, FetchPhase::Loading);
            }

            let result = self.calls.run(self.source.fetch_page(cursor.as_ref())).await;

            let mut state = self.state.lock().await;
            state.in_flight = false;
            let Some(result) = result.filter(|_| !self.calls.is_cancelled()) else {
                debug!("discarding result of cancelled fetch");
                return Err(ListError::Closed);
            };

            match result {
                Ok(page) => Ok(self.apply_page(&mut state, cursor.as_ref(), page)),
                Err(e) => {
                    error!("Fetch failure: {}", e);
                    state.trigger.release();
                    self.set_phase(&mut state, FetchPhase::Retry);
                    Err(ListError::Fetch(e))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Reload the list from the top
    pub async fn refresh(&self) -> Result<FetchOutcome, ListError> {
        self.fetch_next_page(None).await
    }

    /// Load the page after the last displayed entry, or the first page if
    /// nothing is displayed yet
    pub async fn load_more(&self) -> Result<FetchOutcome, ListError> {
        let cursor = {
            let state = self.state.lock().await;
            if state.in_flight {
                return Ok(FetchOutcome::Skipped(SkipReason::InFlight));
            }
            state.entries.last().map(|entry| entry.account.id.clone())
        };
        self.fetch_next_page(cursor).await
    }

    /// Retry after a failed fetch
    pub async fn retry(&self) -> Result<FetchOutcome, ListError> {
        self.load_more().await
    }

    /// Report a scroll, loading the next page when close to the end
    pub async fn on_scrolled(&self, viewport: Viewport) -> Result<FetchOutcome, ListError> {
        let fire = {
            let mut state = self.state.lock().await;
            let fire = state.trigger.on_scrolled(viewport);
            if fire {
                debug!(
                    page = state.trigger.current_page(),
                    total = viewport.total,
                    "scrolled near end"
                );
            }
            fire
        };
        if fire {
            self.load_more().await
        } else {
            Ok(FetchOutcome::Skipped(SkipReason::BelowThreshold))
        }
    }
}

impl<S, A: BlockActions> RelationshipList<S, A> {
    /// Block or unblock the account shown at `position`.
    ///
    /// The entry only changes once the server confirms. If the list changed
    /// while the call was pending, the entry is found by id instead; if it is
    /// gone nothing is updated.
    pub async fn toggle_block(
        &self,
        target: AccountId,
        blocked: bool,
        position: usize,
    ) -> Result<Relationship, ListError> {
        let verb = BlockVerb::for_state(blocked);
        let span = debug_span!("toggle_block", account = %target, %verb, position);
        async move {
            let result = self
                .calls
                .run(self.actions.set_blocked(&target, blocked))
                .await
                .ok_or(ListError::Closed)?;

            let relationship = match result {
                Ok(relationship) => relationship,
                Err(e) => {
                    error!(account = %target, %verb, error = %e, "Failed to {} account id {}", verb, target);
                    return Err(ListError::Action {
                        account: target,
                        verb,
                        source: e,
                    });
                }
            };

            let mut state = self.state.lock().await;
            if self.calls.is_cancelled() {
                return Err(ListError::Closed);
            }
            let slot = match state.entries.get(position) {
                Some(entry) if entry.account.id == target => Some(position),
                _ => state.entries.iter().position(|e| e.account.id == target),
            };
            match slot {
                Some(index) => {
                    state.entries[index].blocked = blocked;
                    self.publish_entries(&state);
                }
                None => debug!("account is no longer displayed"),
            }
            Ok(relationship)
        }
        .instrument(span)
        .await
    }
}

impl<S, A> std::fmt::Debug for RelationshipList<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipList")
            .field("kind", &self.kind)
            .field("phase", &self.phase())
            .field("entries", &self.entries.borrow().len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

//! Saved-location list model.
//!
//! Owns the on-screen order and is only touched from the UI thread. Network
//! work is handed to `services::location_service`, and results come back
//! through `poll_channel`, which the host calls from its event loop.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use skyline_core::{AppError, LocationError as CoreLocationError};
use skyline_services::{LocationRecord, LocationStore};
use tokio::runtime::Handle;

use super::drag_session::{DragError, DragSession};
use super::location_list::OrderedLocationList;
use super::reorder::{self, MoveIntent, ReorderError};
use crate::services::{
    request_add, request_delete, request_fetch, request_health_check, request_replace_order,
    LocationError, LocationServiceMessage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A load that would predate a local reorder waits for that reorder's commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredReload {
    None,
    AfterDrag,
    AfterCommit(u64),
}

type SequenceObserver = Box<dyn FnMut(&[String])>;
type NoticeObserver = Box<dyn FnMut(&Notice)>;

pub struct LocationListModel {
    user_id: String,
    list: OrderedLocationList,
    drag: DragSession,
    store: Arc<dyn LocationStore>,
    runtime: Handle,
    tx: Sender<LocationServiceMessage>,
    rx: Receiver<LocationServiceMessage>,
    loading: bool,
    error_message: String,
    connected: Option<bool>,
    load_generation: u64,
    next_commit_id: u64,
    pending_commits: usize,
    deferred_reload: DeferredReload,
    sequence_observers: Vec<SequenceObserver>,
    notice_observers: Vec<NoticeObserver>,
}

impl LocationListModel {
    pub fn new(store: Arc<dyn LocationStore>, runtime: Handle, user_id: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            user_id: user_id.into(),
            list: OrderedLocationList::new(),
            drag: DragSession::new(),
            store,
            runtime,
            tx,
            rx,
            loading: false,
            error_message: String::new(),
            connected: None,
            load_generation: 0,
            next_commit_id: 0,
            pending_commits: 0,
            deferred_reload: DeferredReload::None,
            sequence_observers: Vec::new(),
            notice_observers: Vec::new(),
        }
    }

    /// Called with the full sequence of names after every change.
    pub fn on_sequence_changed(&mut self, observer: impl FnMut(&[String]) + 'static) {
        self.sequence_observers.push(Box::new(observer));
    }

    pub fn on_notice(&mut self, observer: impl FnMut(&Notice) + 'static) {
        self.notice_observers.push(Box::new(observer));
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn current_sequence(&self) -> Vec<String> {
        self.list.names()
    }

    pub fn records(&self) -> &[LocationRecord] {
        self.list.records()
    }

    pub fn row_count(&self) -> usize {
        self.list.len()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Result of the last connection check, if one has completed.
    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    /// Order commits sent but not yet answered.
    pub fn pending_commits(&self) -> usize {
        self.pending_commits
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn swipe_dismiss_enabled(&self) -> bool {
        self.drag.swipe_dismiss_enabled()
    }

    /// Menu commands for the row at `index`.
    pub fn available_moves(&self, index: usize) -> Result<&'static [MoveIntent], ReorderError> {
        reorder::available_moves(index, self.list.len())
    }

    /// Switch to `user_id` and fetch their list.
    pub fn load(&mut self, user_id: impl Into<String>) {
        self.user_id = user_id.into();
        self.reload();
    }

    /// Fetch the current user's list again. Supersedes any load in flight.
    pub fn reload(&mut self) {
        self.load_generation += 1;
        self.loading = true;
        self.error_message.clear();

        tracing::info!(
            "Loading locations for user {} (generation {})",
            self.user_id,
            self.load_generation
        );
        request_fetch(
            &self.tx,
            &self.runtime,
            self.store.clone(),
            self.user_id.clone(),
            self.load_generation,
        );
    }

    /// Apply a menu command and persist the resulting order.
    ///
    /// Returns false if nothing changed. Invalid positions are logged, never shown.
    pub fn request_move(&mut self, index: usize, intent: MoveIntent) -> bool {
        if self.drag.is_active() {
            tracing::warn!("Ignoring {:?} on row {} during a drag", intent, index);
            return false;
        }

        match self.list.apply_move(index, intent) {
            Ok(new_index) => {
                tracing::debug!("{} row {} -> {}", intent.label(), index, new_index);
                self.notify_sequence();
                let sequence = self.list.names();
                self.persist(sequence);
                true
            }
            Err(e) => {
                tracing::error!("Dropped {:?} on row {}: {}", intent, index, e);
                false
            }
        }
    }

    /// Pointer pressed on the drag handle of row `index`.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        match self.drag.press_handle(index, &self.list) {
            Ok(()) => true,
            Err(DragError::Reorder(e)) => {
                tracing::error!("Dropped drag start on row {}: {}", index, e);
                false
            }
            Err(e) => {
                tracing::warn!("Drag start on row {} refused: {}", index, e);
                false
            }
        }
    }

    /// The dragged row is over `target`. Reorders live; nothing is persisted.
    pub fn report_drag_over(&mut self, target: usize) -> bool {
        match self.drag.drag_over(&mut self.list, target) {
            Ok(true) => {
                self.notify_sequence();
                true
            }
            Ok(false) => false,
            Err(DragError::Reorder(e)) => {
                tracing::error!("Dropped drag over row {}: {}", target, e);
                false
            }
            Err(e) => {
                tracing::warn!("Drag over row {} ignored: {}", target, e);
                false
            }
        }
    }

    /// Pointer released. Persists the final order exactly once.
    pub fn end_drag(&mut self) -> bool {
        match self.drag.release(&self.list) {
            Some(commit) => {
                self.finish_drag(commit.sequence);
                true
            }
            None => false,
        }
    }

    /// Gesture abandoned. Relocations already applied are kept and persisted.
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.cancel(&self.list) {
            Some(commit) => {
                self.finish_drag(commit.sequence);
                true
            }
            None => false,
        }
    }

    fn finish_drag(&mut self, sequence: Vec<String>) {
        let commit_id = self.apply_drag_commit(sequence);
        if self.deferred_reload == DeferredReload::AfterDrag {
            self.deferred_reload = DeferredReload::AfterCommit(commit_id);
        }
    }

    /// Persist `sequence` as the full order. Returns the commit id.
    pub fn apply_drag_commit(&mut self, sequence: Vec<String>) -> u64 {
        self.persist(sequence)
    }

    fn persist(&mut self, sequence: Vec<String>) -> u64 {
        self.next_commit_id += 1;
        let commit_id = self.next_commit_id;
        self.pending_commits += 1;

        // A fetch already in flight was issued before this order existed.
        if self.loading {
            tracing::debug!(
                "Superseding load generation {} with a reload after order #{}",
                self.load_generation,
                commit_id
            );
            self.load_generation += 1;
            self.loading = false;
            self.deferred_reload = DeferredReload::AfterCommit(commit_id);
        } else if let DeferredReload::AfterCommit(_) = self.deferred_reload {
            self.deferred_reload = DeferredReload::AfterCommit(commit_id);
        }

        tracing::info!(
            "Committing order #{} for user {}: {:?}",
            commit_id,
            self.user_id,
            sequence
        );
        request_replace_order(
            &self.tx,
            &self.runtime,
            self.store.clone(),
            self.user_id.clone(),
            sequence,
            commit_id,
        );
        commit_id
    }

    /// Add a location to the end of the list, then reload.
    ///
    /// The name is trimmed. Empty or already listed names are rejected locally.
    pub fn add_location(&mut self, name: &str, coordinates: Option<(f64, f64)>) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.reject(LocationError::Validation(
                "Location name cannot be empty".into(),
            ));
            return false;
        }
        if self.list.contains(name) {
            self.reject(LocationError::Validation(format!(
                "{} is already in your locations",
                name
            )));
            return false;
        }

        tracing::info!("Adding location {:?} for user {}", name, self.user_id);
        request_add(
            &self.tx,
            &self.runtime,
            self.store.clone(),
            self.user_id.clone(),
            name.to_string(),
            coordinates,
        );
        true
    }

    /// Delete a location by name, then reload.
    pub fn delete_location(&mut self, name: &str) {
        tracing::info!("Deleting location {:?} for user {}", name, self.user_id);
        request_delete(
            &self.tx,
            &self.runtime,
            self.store.clone(),
            self.user_id.clone(),
            name.to_string(),
        );
    }

    pub fn check_connection(&mut self) {
        request_health_check(&self.tx, &self.runtime, self.store.clone());
    }

    /// Apply every result that has arrived. Returns how many were handled.
    pub fn poll_channel(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
            handled += 1;
        }
        handled
    }

    fn handle_message(&mut self, msg: LocationServiceMessage) {
        match msg {
            LocationServiceMessage::FetchDone { generation, result } => {
                self.on_fetch_done(generation, result);
            }
            LocationServiceMessage::CommitDone { commit_id, result } => {
                self.on_commit_done(commit_id, result);
            }
            LocationServiceMessage::AddDone { name, result } => match result {
                Ok(message) => {
                    tracing::info!("Added location {:?}", name);
                    self.emit_notice(Notice::info(message));
                    self.reload();
                }
                Err(e) => {
                    tracing::warn!("Failed to add location {:?}: {}", name, e);
                    self.reject(e);
                    self.reload();
                }
            },
            LocationServiceMessage::DeleteDone { name, result } => match result {
                Ok(message) => {
                    tracing::info!("Deleted location {:?}", name);
                    self.emit_notice(Notice::info(message));
                    self.reload();
                }
                Err(e) => {
                    tracing::warn!("Failed to delete location {:?}: {}", name, e);
                    self.reject(e);
                    self.reload();
                }
            },
            LocationServiceMessage::HealthDone(result) => {
                let reachable = matches!(result, Ok(true));
                self.connected = Some(reachable);
                if reachable {
                    self.emit_notice(Notice::info("Connected to location server"));
                } else {
                    if let Err(e) = result {
                        tracing::warn!("Health check failed: {}", e);
                    }
                    let message = AppError::from(CoreLocationError::ServiceUnavailable).user_message();
                    self.emit_notice(Notice::error(message));
                }
            }
        }
    }

    fn on_fetch_done(
        &mut self,
        generation: u64,
        result: Result<Vec<LocationRecord>, LocationError>,
    ) {
        if generation != self.load_generation {
            tracing::debug!(
                "Discarding load generation {} (current {})",
                generation,
                self.load_generation
            );
            return;
        }
        self.loading = false;

        if self.drag.is_active() {
            tracing::warn!("Load finished during a drag; reloading after the drop is saved");
            self.deferred_reload = DeferredReload::AfterDrag;
            return;
        }

        match result {
            Ok(records) => {
                tracing::info!("Loaded {} locations", records.len());
                self.list.replace(records);
                self.notify_sequence();
            }
            Err(e) => {
                tracing::error!("Failed to load locations: {}", e);
                let message = format!("Failed to load locations: {}", e.user_notice());
                self.error_message = message.clone();
                self.emit_notice(Notice::error(message));
            }
        }
    }

    fn on_commit_done(&mut self, commit_id: u64, result: Result<String, LocationError>) {
        self.pending_commits = self.pending_commits.saturating_sub(1);
        let reload_now = self.deferred_reload == DeferredReload::AfterCommit(commit_id);
        if reload_now {
            self.deferred_reload = DeferredReload::None;
        }

        match result {
            Ok(message) => {
                tracing::info!("Order #{} saved: {}", commit_id, message);
                self.emit_notice(Notice::info("Location order saved"));
                if reload_now {
                    self.reload();
                }
            }
            Err(e) => {
                // Local order stays as the user left it.
                tracing::error!("Failed to save order #{}: {}", commit_id, e);
                let message = format!("Failed to save location order: {}", e.user_notice());
                self.error_message = message.clone();
                self.emit_notice(Notice::error(message));
            }
        }
    }

    fn reject(&mut self, error: LocationError) {
        self.emit_notice(Notice::error(error.user_notice()));
    }

    fn notify_sequence(&mut self) {
        let sequence = self.list.names();
        for observer in &mut self.sequence_observers {
            observer(&sequence);
        }
    }

    fn emit_notice(&mut self, notice: Notice) {
        for observer in &mut self.notice_observers {
            observer(&notice);
        }
    }
}

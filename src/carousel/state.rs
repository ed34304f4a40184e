//! Cursor and lifecycle state of the carousel, free of any I/O.

use tracing::{debug, warn};

use super::view::{CarouselView, View};
use crate::domain::User;

/// Lifecycle of the list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Pending,
    Failed(String),
    Loaded,
}

/// Lifecycle of the create mutation. Success and failure both land back
/// on `Idle`; the failure message is kept separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStatus {
    Idle,
    Pending,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    fetch: FetchStatus,
    users: Vec<User>,
    cursor: usize,
    create: CreateStatus,
    create_error: Option<String>,
    refreshing: bool,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new()
    }
}

impl Carousel {
    pub fn new() -> Self {
        Self {
            fetch: FetchStatus::Pending,
            users: Vec::new(),
            cursor: 0,
            create: CreateStatus::Idle,
            create_error: None,
            refreshing: false,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_creating(&self) -> bool {
        self.create == CreateStatus::Pending
    }

    pub fn current(&self) -> Option<&User> {
        if self.can_navigate() {
            self.users.get(self.cursor)
        } else {
            None
        }
    }

    fn can_navigate(&self) -> bool {
        self.fetch == FetchStatus::Loaded && !self.users.is_empty()
    }

    // ---- navigation ----

    /// Moves to the next user; no-op on the last one.
    pub fn next(&mut self) -> bool {
        if self.can_navigate() && self.cursor + 1 < self.users.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous user; no-op on the first one.
    pub fn previous(&mut self) -> bool {
        if self.can_navigate() && self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps straight to `index`. Out-of-range indices are dropped.
    pub fn select_index(&mut self, index: usize) -> bool {
        if !self.can_navigate() {
            return false;
        }
        if index >= self.users.len() {
            warn!(index, len = self.users.len(), "Ignoring out-of-range selection");
            return false;
        }
        let changed = self.cursor != index;
        self.cursor = index;
        changed
    }

    // ---- list query ----

    /// Marks a fetch as started. With data already on screen the fetch runs
    /// in the background and the current state is kept.
    pub fn fetch_started(&mut self) {
        if self.fetch == FetchStatus::Loaded {
            self.refreshing = true;
        } else {
            self.fetch = FetchStatus::Pending;
        }
    }

    pub fn fetch_succeeded(&mut self, users: Vec<User>) {
        debug!(count = users.len(), "List loaded");
        self.users = users;
        self.fetch = FetchStatus::Loaded;
        self.refreshing = false;
        self.clamp_cursor();
    }

    pub fn fetch_failed(&mut self, message: String) {
        self.fetch = FetchStatus::Failed(message);
        self.refreshing = false;
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.users.len().saturating_sub(1));
    }

    // ---- create mutation ----

    /// Enters the pending state. Returns `false` when a create is already in
    /// flight or the list is not loaded, in which case nothing is sent.
    pub fn create_started(&mut self) -> bool {
        if self.create == CreateStatus::Pending || self.fetch != FetchStatus::Loaded {
            return false;
        }
        self.create = CreateStatus::Pending;
        self.create_error = None;
        true
    }

    /// Puts the new user first and shows it.
    pub fn create_succeeded(&mut self, user: User) {
        self.users.retain(|existing| existing.id != user.id);
        self.users.insert(0, user);
        self.cursor = 0;
        self.create = CreateStatus::Idle;
    }

    pub fn create_failed(&mut self, message: String) {
        self.create = CreateStatus::Idle;
        self.create_error = Some(message);
    }

    // ---- rendering ----

    pub fn view(&self) -> View {
        match &self.fetch {
            FetchStatus::Pending => View::Loading,
            FetchStatus::Failed(message) => View::Failed { message: message.clone() },
            FetchStatus::Loaded => match self.current() {
                None => View::Empty {
                    creating: self.is_creating(),
                    create_error: self.create_error.clone(),
                },
                Some(current) => View::Carousel(CarouselView {
                    current: current.clone(),
                    selected: self.cursor,
                    users: self.users.clone(),
                    can_previous: self.cursor > 0,
                    can_next: self.cursor + 1 < self.users.len(),
                    creating: self.is_creating(),
                    create_error: self.create_error.clone(),
                    refreshing: self.refreshing,
                }),
            },
        }
    }
}

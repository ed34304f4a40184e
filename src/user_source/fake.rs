use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::{SourceError, UserSource};
use crate::domain::{User, UserCreate};

/// Scriptable in-memory [`UserSource`] for controller tests.
///
/// Behaves like a tiny store (creates are prepended) unless a failure has
/// been queued with [`FakeSource::fail_next_list`] or
/// [`FakeSource::fail_next_create`]. With [`FakeSource::holding_creates`]
/// every create waits for a matching [`FakeSource::release_create`].
/// After [`FakeSource::hold_lists`] each list call snapshots the users
/// when it starts and answers once [`FakeSource::release_list`] lets it.
pub struct FakeSource {
    users: Mutex<Vec<User>>,
    list_failures: Mutex<VecDeque<SourceError>>,
    create_failures: Mutex<VecDeque<SourceError>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    hold_creates: bool,
    create_gate: Semaphore,
    hold_lists: AtomicBool,
    list_gate: Semaphore,
}

impl FakeSource {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            list_failures: Mutex::new(VecDeque::new()),
            create_failures: Mutex::new(VecDeque::new()),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            hold_creates: false,
            create_gate: Semaphore::new(0),
            hold_lists: AtomicBool::new(false),
            list_gate: Semaphore::new(0),
        }
    }

    pub fn holding_creates(mut self) -> Self {
        self.hold_creates = true;
        self
    }

    pub fn release_create(&self) {
        self.create_gate.add_permits(1);
    }

    pub fn hold_lists(&self) {
        self.hold_lists.store(true, Ordering::SeqCst);
    }

    /// Lets the oldest held list call answer.
    pub fn release_list(&self) {
        self.list_gate.add_permits(1);
    }

    pub fn fail_next_list(&self, err: SourceError) {
        self.list_failures.lock().unwrap().push_back(err);
    }

    pub fn fail_next_create(&self, err: SourceError) {
        self.create_failures.lock().unwrap().push_back(err);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserSource for FakeSource {
    async fn fetch_users(&self) -> Result<Vec<User>, SourceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.users();
        if self.hold_lists.load(Ordering::SeqCst) {
            self.list_gate.acquire().await.unwrap().forget();
        }
        let failure = self.list_failures.lock().unwrap().pop_front();
        if let Some(err) = failure {
            return Err(err);
        }
        Ok(snapshot)
    }

    async fn submit_user(&self, payload: UserCreate) -> Result<User, SourceError> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.hold_creates {
            self.create_gate.acquire().await.unwrap().forget();
        }
        let failure = self.create_failures.lock().unwrap().pop_front();
        if let Some(err) = failure {
            return Err(err);
        }
        let user = User::new(format!("fake_{n}"), payload.full_name, payload.email);
        self.users.lock().unwrap().insert(0, user.clone());
        Ok(user)
    }
}

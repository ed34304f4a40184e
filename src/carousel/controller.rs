//! Message-passing update loop around [`Carousel`].
//!
//! The controller owns the state and is the only task that mutates it.
//! Fetches and creates run as spawned tasks that post their outcome back
//! into the controller's mailbox; every transition publishes a fresh
//! [`View`] on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

use super::state::Carousel;
use super::view::View;
use crate::domain::{faker, User, UserCreate};
use crate::query_cache::{QueryCache, QueryKey};
use crate::user_source::{SourceError, UserSource};

/// User intents accepted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Select(usize),
    Create(UserCreate),
    Refresh,
}

#[derive(Debug)]
enum Outcome {
    Fetched {
        generation: u64,
        result: Result<Vec<User>, SourceError>,
    },
    Created(Result<User, SourceError>),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControllerError {
    #[error("Carousel controller stopped")]
    Stopped,
}

/// Backoff applied to failed list fetches before the failure is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    #[cfg(test)]
    pub fn none() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

pub struct CarouselController {
    state: Carousel,
    source: Arc<dyn UserSource>,
    cache: Arc<dyn QueryCache<Vec<User>>>,
    retry: RetryPolicy,
    commands: mpsc::Receiver<Command>,
    outcomes_tx: mpsc::UnboundedSender<Outcome>,
    outcomes: mpsc::UnboundedReceiver<Outcome>,
    view: watch::Sender<View>,
    issued: u64,
}

impl CarouselController {
    pub fn new(
        buffer_size: usize,
        source: Arc<dyn UserSource>,
        cache: Arc<dyn QueryCache<Vec<User>>>,
        retry: RetryPolicy,
    ) -> (Self, CarouselHandle) {
        let (sender, commands) = mpsc::channel(buffer_size);
        let (outcomes_tx, outcomes) = mpsc::unbounded_channel();
        let state = Carousel::new();
        let (view, view_rx) = watch::channel(state.view());
        let controller = Self {
            state,
            source,
            cache,
            retry,
            commands,
            outcomes_tx,
            outcomes,
            view,
            issued: 0,
        };
        (controller, CarouselHandle { sender, view: view_rx })
    }

    /// Runs until every [`CarouselHandle`] is dropped. Results of requests
    /// still in flight at that point are discarded.
    #[instrument(name = "carousel_controller", skip(self))]
    pub async fn run(mut self) {
        info!("Carousel controller starting");
        self.start();

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(outcome) = self.outcomes.recv() => self.handle_outcome(outcome),
            }
            self.publish();
        }

        info!("Carousel controller stopped");
    }

    /// Shows cached data if there is any; fetches unless it is fresh.
    fn start(&mut self) {
        match self.cache.get(QueryKey::Users) {
            Some(users) if !self.cache.is_stale(QueryKey::Users) => {
                debug!(count = users.len(), "Using cached list");
                self.state.fetch_succeeded(users);
            }
            Some(users) => {
                debug!(count = users.len(), "Cached list is stale, refetching");
                self.state.fetch_succeeded(users);
                self.spawn_fetch();
            }
            None => self.spawn_fetch(),
        }
        self.publish();
    }

    fn handle_command(&mut self, command: Command) {
        debug!(?command, cursor = self.state.cursor(), "Handling command");
        match command {
            Command::Next => {
                self.state.next();
            }
            Command::Previous => {
                self.state.previous();
            }
            Command::Select(index) => {
                self.state.select_index(index);
            }
            Command::Refresh => self.spawn_fetch(),
            Command::Create(payload) => {
                if self.state.create_started() {
                    self.spawn_create(payload);
                } else {
                    debug!("Create ignored: another create is pending or the list is not loaded");
                }
            }
        }
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Fetched { generation, result } => {
                if generation != self.issued {
                    debug!(generation, latest = self.issued, "Dropping superseded fetch result");
                    return;
                }
                match result {
                    Ok(users) => {
                        self.cache.set(QueryKey::Users, users.clone());
                        self.state.fetch_succeeded(users);
                    }
                    Err(err) => {
                        warn!(error = %err, "Fetching users failed");
                        self.state.fetch_failed(err.to_string());
                    }
                }
            }
            Outcome::Created(Ok(user)) => {
                info!(user_id = %user.id, "User created");
                self.state.create_succeeded(user);
                self.cache.set(QueryKey::Users, self.state.users().to_vec());

                self.cache.invalidate(QueryKey::Users);
                self.spawn_fetch();
            }
            Outcome::Created(Err(err)) => {
                warn!(error = %err, "Creating user failed");
                self.state.create_failed(err.to_string());
            }
        }
    }

    fn spawn_fetch(&mut self) {
        self.issued += 1;
        let generation = self.issued;
        self.state.fetch_started();

        let source = Arc::clone(&self.source);
        let retry = self.retry;
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = fetch_with_retry(source.as_ref(), retry).await;
            let _ = outcomes.send(Outcome::Fetched { generation, result });
        });
    }

    fn spawn_create(&self, payload: UserCreate) {
        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = source.submit_user(payload).await;
            let _ = outcomes.send(Outcome::Created(result));
        });
    }

    fn publish(&self) {
        let view = self.state.view();
        self.view.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}

async fn fetch_with_retry(source: &dyn UserSource, retry: RetryPolicy) -> Result<Vec<User>, SourceError> {
    let mut attempt = 0;
    loop {
        match source.fetch_users().await {
            Ok(users) => return Ok(users),
            Err(err) if attempt < retry.max_retries => {
                let delay = retry.delay_for(attempt);
                warn!(error = %err, attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "Fetch failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Cloneable handle for sending intents to a running controller and
/// observing its views.
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    sender: mpsc::Sender<Command>,
    view: watch::Receiver<View>,
}

impl CarouselHandle {
    pub async fn send(&self, command: Command) -> Result<(), ControllerError> {
        self.sender.send(command).await.map_err(|_| ControllerError::Stopped)
    }

    pub async fn next(&self) -> Result<(), ControllerError> {
        self.send(Command::Next).await
    }

    pub async fn previous(&self) -> Result<(), ControllerError> {
        self.send(Command::Previous).await
    }

    pub async fn select_index(&self, index: usize) -> Result<(), ControllerError> {
        self.send(Command::Select(index)).await
    }

    pub async fn request_create(&self, full_name: impl Into<String>, email: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Command::Create(UserCreate::new(full_name, email))).await
    }

    /// Creates a user with a generated name and email.
    pub async fn create_random(&self) -> Result<(), ControllerError> {
        self.send(Command::Create(faker::random_user())).await
    }

    pub async fn refresh(&self) -> Result<(), ControllerError> {
        self.send(Command::Refresh).await
    }

    /// Latest published view.
    pub fn view(&self) -> View {
        self.view.borrow().clone()
    }

    /// Receiver that wakes on every published view.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.view.clone()
    }

    /// Waits until a published view satisfies `predicate` and returns it.
    #[cfg(test)]
    pub async fn wait_for(&self, predicate: impl FnMut(&View) -> bool) -> Result<View, ControllerError> {
        let mut receiver = self.view.clone();
        let view = receiver.wait_for(predicate).await.map_err(|_| ControllerError::Stopped)?.clone();
        Ok(view)
    }
}

use std::sync::Arc;

use discovery_core::{
    update, Activity, Category, DiscoveryParams, DiscoveryState, DiscoveryView, Effect,
    FetchFailed, Msg, Project, SamplerCard, User,
};
use discovery_logging::{discovery_debug, discovery_trace, discovery_warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::{AbortHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{AnalyticsSink, ApiClient, DiscoveryOutputs, IntPreference, SessionProvider};

/// Collaborators the view-model talks to.
#[derive(Clone)]
pub struct Environment {
    pub api: Arc<dyn ApiClient>,
    pub current_user: Arc<dyn SessionProvider>,
    pub activity_sample_preference: Arc<dyn IntPreference>,
    pub analytics: Arc<dyn AnalyticsSink>,
}

enum Command {
    Dispatch(Msg),
    Flush(oneshot::Sender<()>),
    Snapshot(oneshot::Sender<DiscoveryView>),
}

/// Handle to one Discover screen's view-model.
///
/// Inputs never block; they are queued for the dispatcher task, which applies
/// them one at a time. Dropping the handle stops the dispatcher and abandons
/// fetches in flight.
pub struct DiscoveryViewModel {
    cmd_tx: mpsc::UnboundedSender<Command>,
    outputs: DiscoveryOutputs,
    shutdown: CancellationToken,
}

impl DiscoveryViewModel {
    /// Starts the dispatcher. Must be called from within a Tokio runtime.
    pub fn new(env: Environment) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let outputs = DiscoveryOutputs::new();
        let shutdown = CancellationToken::new();

        // Subscribe before reading so a concurrent login is never missed.
        let session_rx = env.current_user.subscribe();
        let initial_session = env.current_user.current();

        let dispatcher = Dispatcher {
            env,
            state: DiscoveryState::new(),
            outputs: outputs.clone(),
            fetches: JoinSet::new(),
            projects_fetch: None,
            activities_fetch: None,
            waiters: Vec::new(),
        };
        tokio::spawn(dispatcher.run(cmd_rx, session_rx, initial_session, shutdown.clone()));

        Self {
            cmd_tx,
            outputs,
            shutdown,
        }
    }

    pub fn outputs(&self) -> &DiscoveryOutputs {
        &self.outputs
    }

    /// New feed selection from navigation or a filter/sort control.
    pub fn select_params(&self, params: DiscoveryParams) {
        self.send(Msg::ParamsSelected(params));
    }

    pub fn root_categories(&self, categories: Vec<Category>) {
        self.send(Msg::RootCategoriesLoaded(categories));
    }

    pub fn clear_page(&self) {
        self.send(Msg::ClearPage);
    }

    pub fn see_activity_clicked(&self, card: SamplerCard) {
        self.send(Msg::SeeActivityClicked(card));
    }

    pub fn activity_update_clicked(&self, activity: Activity) {
        self.send(Msg::ActivityUpdateClicked(activity));
    }

    pub fn login_tout_clicked(&self) {
        self.send(Msg::LoginToutClicked);
    }

    pub fn project_card_clicked(&self, project: Project) {
        self.send(Msg::ProjectCardClicked(project));
    }

    /// Resolves once every input sent so far has been applied and no fetch is
    /// in flight.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.cmd_tx.send(Command::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Snapshot of the current screen state, `None` if the dispatcher stopped.
    pub async fn view(&self) -> Option<DiscoveryView> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx.send(Command::Snapshot(tx)).ok()?;
        rx.await.ok()
    }

    fn send(&self, msg: Msg) {
        if self.cmd_tx.send(Command::Dispatch(msg)).is_err() {
            discovery_debug!("Dropped input: dispatcher is not running");
        }
    }
}

impl Drop for DiscoveryViewModel {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct Dispatcher {
    env: Environment,
    state: DiscoveryState,
    outputs: DiscoveryOutputs,
    /// Fetches yield their completion message; preference writes yield none.
    fetches: JoinSet<Option<Msg>>,
    projects_fetch: Option<AbortHandle>,
    activities_fetch: Option<AbortHandle>,
    waiters: Vec<oneshot::Sender<()>>,
}

impl Dispatcher {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<Command>,
        session_rx: broadcast::Receiver<Option<User>>,
        initial_session: Option<User>,
        shutdown: CancellationToken,
    ) {
        // A login racing construction shows up both as the initial value and
        // as the first notification; the copy is not a transition.
        let mut echo = Some(initial_session.clone());
        self.dispatch(Msg::SessionChanged(initial_session));
        let mut session_rx = Some(session_rx);

        loop {
            // Session notifications first: a login that happened before an
            // input was queued is applied before that input.
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                notification = next_session(&mut session_rx) => match notification {
                    Ok(user) => {
                        if echo.take().is_some_and(|initial| initial == user) {
                            discovery_trace!("Skipping session echo of the initial value");
                        } else {
                            self.dispatch(Msg::SessionChanged(user));
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        echo = None;
                        discovery_warn!("Missed {} session notifications; resyncing", skipped);
                        let current = self.env.current_user.current();
                        self.dispatch(Msg::SessionChanged(current));
                    }
                    Err(RecvError::Closed) => session_rx = None,
                },
                command = cmd_rx.recv() => match command {
                    Some(Command::Dispatch(msg)) => self.dispatch(msg),
                    Some(Command::Flush(done)) => self.waiters.push(done),
                    Some(Command::Snapshot(reply)) => {
                        let _ = reply.send(self.state.view());
                    }
                    None => break,
                },
                Some(joined) = self.fetches.join_next() => match joined {
                    Ok(Some(msg)) => self.dispatch(msg),
                    Ok(None) => {}
                    Err(err) if err.is_cancelled() => {}
                    Err(err) => discovery_warn!("Fetch task failed: {}", err),
                },
            }

            if self.fetches.is_empty() {
                for waiter in self.waiters.drain(..) {
                    let _ = waiter.send(());
                }
            }
        }

        // Dropping the join set aborts whatever is still in flight.
        discovery_debug!("Dispatcher stopped with {} fetches in flight", self.fetches.len());
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchProjects { request_id, params } => {
                discovery_debug!(
                    "FetchProjects request_id={} query={:?}",
                    request_id,
                    params.query_params()
                );
                if let Some(previous) = self.projects_fetch.take() {
                    previous.abort();
                }
                let api = self.env.api.clone();
                let handle = self.fetches.spawn(async move {
                    let result = match api.fetch_projects(&params).await {
                        Ok(envelope) => Ok(envelope.projects),
                        Err(err) => {
                            discovery_warn!("Project fetch {} failed: {}", request_id, err);
                            Err(FetchFailed)
                        }
                    };
                    Some(Msg::ProjectsLoaded { request_id, result })
                });
                self.projects_fetch = Some(handle);
            }
            Effect::FetchActivities { request_id } => {
                discovery_debug!("FetchActivities request_id={}", request_id);
                if let Some(previous) = self.activities_fetch.take() {
                    previous.abort();
                }
                let api = self.env.api.clone();
                let preference = self.env.activity_sample_preference.clone();
                let handle = self.fetches.spawn(async move {
                    let result = match api.fetch_activities().await {
                        Ok(envelope) => Ok(envelope.activities),
                        Err(err) => {
                            discovery_warn!("Activity fetch {} failed: {}", request_id, err);
                            Err(FetchFailed)
                        }
                    };
                    let read = tokio::task::spawn_blocking(move || preference.get()).await;
                    let threshold = match read {
                        Ok(threshold) => threshold,
                        Err(err) => {
                            discovery_warn!("Reading the activity threshold failed: {}", err);
                            0
                        }
                    };
                    Some(Msg::ActivitiesLoaded {
                        request_id,
                        result,
                        threshold,
                    })
                });
                self.activities_fetch = Some(handle);
            }
            Effect::SaveActivitySampleCursor(cursor) => {
                discovery_debug!("SaveActivitySampleCursor cursor={}", cursor);
                let preference = self.env.activity_sample_preference.clone();
                self.fetches.spawn(async move {
                    let write = tokio::task::spawn_blocking(move || preference.set(cursor)).await;
                    match write {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => {
                            discovery_warn!("Saving activity threshold {} failed: {}", cursor, err);
                        }
                        Err(err) => {
                            discovery_warn!("Saving activity threshold {} failed: {}", cursor, err);
                        }
                    }
                    None
                });
            }
            Effect::Track(event) => self.env.analytics.track(event),
            Effect::Emit(output) => {
                discovery_trace!("Emit {:?}", output);
                self.outputs.publish(output);
            }
        }
    }
}

async fn next_session(
    rx: &mut Option<broadcast::Receiver<Option<User>>>,
) -> Result<Option<User>, RecvError> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

// src/view_model.rs
use crate::errors::FetchError;
use crate::podcast::Podcast;
use crate::podcast_repository::PodcastRepository;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed(String),
}

/// What the list screen observes. The list only ever changes on a successful fetch.
#[derive(Debug, Clone)]
pub struct PodcastListState {
    podcasts: Vec<Podcast>,
    status: LoadStatus,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for PodcastListState {
    fn default() -> Self {
        Self { podcasts: Vec::new(), status: LoadStatus::Loading, last_updated: None }
    }
}

impl PodcastListState {
    pub fn podcasts(&self) -> &[Podcast] {
        &self.podcasts
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

/// Owns the published podcast list and the single background fetch that refreshes it.
pub struct PodcastListViewModel {
    repository: Arc<dyn PodcastRepository>,
    state_tx: Arc<watch::Sender<PodcastListState>>,
    fetch_timeout: Duration,
    /// Cleared in the same write that publishes the result.
    fetching: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl PodcastListViewModel {
    pub fn new(repository: Arc<dyn PodcastRepository>, fetch_timeout: Duration) -> Self {
        let (state_tx, _) = watch::channel(PodcastListState::default());
        Self {
            repository,
            state_tx: Arc::new(state_tx),
            fetch_timeout,
            fetching: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PodcastListState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> PodcastListState {
        self.state_tx.borrow().clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    /// Starts a background fetch. Returns `false` without touching the repository
    /// when a previous fetch is still running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch(&mut self) -> bool {
        if self.fetching.swap(true, Ordering::SeqCst) {
            debug!("fetch already in flight, ignoring request");
            return false;
        }

        self.state_tx.send_if_modified(|state| {
            if state.status == LoadStatus::Loading {
                return false;
            }
            state.status = LoadStatus::Loading;
            true
        });

        let repository = Arc::clone(&self.repository);
        let state_tx = Arc::clone(&self.state_tx);
        let fetching = Arc::clone(&self.fetching);
        let fetch_timeout = self.fetch_timeout;
        let mut guard = FetchGuard {
            fetching: Arc::clone(&fetching),
            state_tx: Arc::clone(&state_tx),
            armed: true,
        };

        self.task = Some(tokio::spawn(async move {
            let result = match tokio::time::timeout(fetch_timeout, repository.get_podcasts()).await
            {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(fetch_timeout)),
            };
            // From here on the result itself clears the flag.
            guard.armed = false;

            match result {
                Ok(podcasts) => {
                    info!("Fetched {} podcasts", podcasts.len());
                    state_tx.send_modify(|state| {
                        fetching.store(false, Ordering::SeqCst);
                        state.podcasts = podcasts;
                        state.status = LoadStatus::Loaded;
                        state.last_updated = Some(Utc::now());
                    });
                }
                Err(e) => {
                    error!("Failed to fetch podcasts: {}", e);
                    state_tx.send_modify(|state| {
                        fetching.store(false, Ordering::SeqCst);
                        state.status = LoadStatus::Failed(e.to_string());
                    });
                }
            }
        }));

        true
    }
}

/// Releases the in-flight flag when the fetch task ends without publishing,
/// i.e. when it is aborted or the repository panics.
struct FetchGuard {
    fetching: Arc<AtomicBool>,
    state_tx: Arc<watch::Sender<PodcastListState>>,
    armed: bool,
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if std::thread::panicking() {
            error!("Fetch task panicked");
            self.state_tx.send_modify(|state| {
                self.fetching.store(false, Ordering::SeqCst);
                state.status = LoadStatus::Failed("fetch task panicked".to_string());
            });
        } else {
            self.fetching.store(false, Ordering::SeqCst);
        }
    }
}

impl Drop for PodcastListViewModel {
    fn drop(&mut self) {
        if let Some(handle) = self.task.take() {
            if self.is_fetching() {
                debug!("view model dropped, aborting in-flight fetch");
            }
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::PodcastId;
    use crate::podcast_repository::{FakeRepository, FakeResponse};

    fn podcast(id: &str, title: &str) -> Podcast {
        Podcast::new(
            PodcastId::new(id),
            title.to_string(),
            format!("Publisher {}", id),
            String::new(),
            String::new(),
        )
    }

    async fn wait_until_settled(rx: &mut watch::Receiver<PodcastListState>) -> PodcastListState {
        rx.wait_for(|state| !state.is_loading()).await.unwrap().clone()
    }

    #[tokio::test]
    async fn test_starts_empty_and_loading() {
        let repository = Arc::new(FakeRepository::with_podcasts(vec![]));
        let view_model = PodcastListViewModel::new(repository, DEFAULT_FETCH_TIMEOUT);

        let state = view_model.state();
        assert!(state.podcasts().is_empty());
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert!(state.last_updated().is_none());
    }

    #[tokio::test]
    async fn test_successful_fetch_publishes_in_server_order() {
        // Duplicate ids are passed through untouched.
        let fetched = vec![podcast("3", "C"), podcast("1", "A"), podcast("2", "B"), podcast("1", "A")];
        let repository = Arc::new(FakeRepository::with_podcasts(fetched.clone()));
        let mut view_model = PodcastListViewModel::new(repository.clone(), DEFAULT_FETCH_TIMEOUT);
        let mut rx = view_model.subscribe();

        assert!(view_model.fetch());
        let state = wait_until_settled(&mut rx).await;

        assert_eq!(state.status(), &LoadStatus::Loaded);
        assert_eq!(state.podcasts().len(), fetched.len());
        for (published, expected) in state.podcasts().iter().zip(&fetched) {
            assert!(published.same_fields(expected));
        }
        assert!(state.last_updated().is_some());
        assert_eq!(repository.calls(), 1);
    }

    #[tokio::test]
    async fn test_each_fetch_replaces_the_list() {
        let repository = Arc::new(FakeRepository::with_responses(vec![
            FakeResponse::Podcasts(vec![podcast("1", "A"), podcast("2", "B")]),
            FakeResponse::Podcasts(vec![podcast("3", "C"), podcast("1", "A renamed")]),
        ]));
        let mut view_model = PodcastListViewModel::new(repository.clone(), DEFAULT_FETCH_TIMEOUT);
        let mut rx = view_model.subscribe();

        view_model.fetch();
        wait_until_settled(&mut rx).await;

        assert!(view_model.fetch());
        let state = wait_until_settled(&mut rx).await;

        let titles: Vec<&str> = state.podcasts().iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["C", "A renamed"]);
        assert_eq!(repository.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_published_list_unchanged() {
        let repository = Arc::new(FakeRepository::with_podcasts(vec![podcast("1", "A"), podcast("2", "B")]));
        let mut view_model = PodcastListViewModel::new(repository, DEFAULT_FETCH_TIMEOUT);
        let mut rx = view_model.subscribe();
        view_model.fetch();
        wait_until_settled(&mut rx).await;

        // Swap in a failing repository, keeping the published state.
        let failing: Arc<dyn PodcastRepository> = Arc::new(FakeRepository::failing(500));
        view_model.repository = failing;
        assert!(view_model.fetch());
        let state = wait_until_settled(&mut rx).await;

        assert!(matches!(state.status(), LoadStatus::Failed(msg) if msg.contains("500")));
        let ids: Vec<&str> = state.podcasts().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_failed_first_fetch_stays_empty() {
        let repository = Arc::new(FakeRepository::new(FakeResponse::Body("not json".to_string())));
        let mut view_model = PodcastListViewModel::new(repository, DEFAULT_FETCH_TIMEOUT);
        let mut rx = view_model.subscribe();

        view_model.fetch();
        let state = wait_until_settled(&mut rx).await;

        assert!(state.podcasts().is_empty());
        assert!(matches!(state.status(), LoadStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_overlapping_fetch_is_ignored() {
        let repository = Arc::new(
            FakeRepository::with_podcasts(vec![podcast("1", "A")])
                .with_delay(Duration::from_millis(200)),
        );
        let mut view_model = PodcastListViewModel::new(repository.clone(), DEFAULT_FETCH_TIMEOUT);
        let mut rx = view_model.subscribe();

        assert!(view_model.fetch());
        assert!(view_model.is_fetching());
        assert!(!view_model.fetch());

        wait_until_settled(&mut rx).await;
        assert_eq!(repository.calls(), 1);
    }

    struct PanickingRepository;

    #[async_trait::async_trait]
    impl PodcastRepository for PanickingRepository {
        async fn get_podcasts(&self) -> Result<Vec<Podcast>, FetchError> {
            panic!("repository blew up");
        }
    }

    #[tokio::test]
    async fn test_panicking_repository_does_not_block_later_fetches() {
        let mut view_model =
            PodcastListViewModel::new(Arc::new(PanickingRepository), DEFAULT_FETCH_TIMEOUT);
        let mut rx = view_model.subscribe();

        assert!(view_model.fetch());
        let state = wait_until_settled(&mut rx).await;
        assert!(matches!(state.status(), LoadStatus::Failed(_)));
        assert!(!view_model.is_fetching());

        let working: Arc<dyn PodcastRepository> =
            Arc::new(FakeRepository::with_podcasts(vec![podcast("1", "A")]));
        view_model.repository = working;
        assert!(view_model.fetch());
        let state = wait_until_settled(&mut rx).await;
        assert_eq!(state.podcasts().len(), 1);
    }

    #[tokio::test]
    async fn test_slow_repository_times_out() {
        let repository = Arc::new(
            FakeRepository::with_podcasts(vec![podcast("1", "A")])
                .with_delay(Duration::from_secs(5)),
        );
        let mut view_model = PodcastListViewModel::new(repository, Duration::from_millis(20));
        let mut rx = view_model.subscribe();

        view_model.fetch();
        let state = wait_until_settled(&mut rx).await;

        assert!(matches!(state.status(), LoadStatus::Failed(msg) if msg.contains("timed out")));
        assert!(state.podcasts().is_empty());
    }

    #[tokio::test]
    async fn test_dropping_view_model_discards_in_flight_result() {
        let repository = Arc::new(
            FakeRepository::with_podcasts(vec![podcast("1", "A")])
                .with_delay(Duration::from_millis(50)),
        );
        let mut view_model = PodcastListViewModel::new(repository.clone(), DEFAULT_FETCH_TIMEOUT);
        let rx = view_model.subscribe();

        view_model.fetch();
        tokio::task::yield_now().await;
        drop(view_model);
        tokio::time::sleep(Duration::from_millis(150)).await;

        let state = rx.borrow().clone();
        assert!(state.podcasts().is_empty());
        assert_eq!(state.status(), &LoadStatus::Loading);
    }
}

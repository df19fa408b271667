//! Asynchronous list-screen flows.
//!
//! Each flow runs as its own tokio task and reports back to the UI task over
//! an unbounded channel. Nothing sequences concurrent flows: reloads are
//! applied in completion order and the last one wins.

use crate::api::{ApiError, MovieApi};
use crate::movie::Movie;
use crate::popover::SaveKind;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

/// Which popover a save belongs to. Row popovers are addressed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Add,
    Row(usize),
}

/// Outcome of a flow, delivered to the UI task.
#[derive(Debug)]
pub enum Message {
    Loaded(Result<Vec<Movie>, ApiError>),
    Saved {
        slot: Slot,
        generation: u64,
        result: Result<(), ApiError>,
    },
    DeleteFailed(ApiError),
}

/// Work requested by the UI in response to input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    Save {
        slot: Slot,
        generation: u64,
        kind: SaveKind,
        movie: Movie,
    },
    Delete(String),
}

fn deliver(tx: &UnboundedSender<Message>, message: Message) {
    if tx.send(message).is_err() {
        debug!("UI closed before a flow finished");
    }
}

/// Fetch the collection and hand it to the UI.
pub async fn load_movies(api: &dyn MovieApi, tx: &UnboundedSender<Message>) {
    let result = api.list().await;
    match &result {
        Ok(movies) => info!(count = movies.len(), "movies loaded"),
        Err(err) => error!(error = %err, "failed to load movies"),
    }
    deliver(tx, Message::Loaded(result));
}

/// Create, then reload. Resolves once the reload has been delivered.
pub async fn add_movie(
    api: &dyn MovieApi,
    tx: &UnboundedSender<Message>,
    movie: &Movie,
) -> Result<(), ApiError> {
    api.create(movie).await?;
    info!(id = %movie.id_text(), "movie created");
    load_movies(api, tx).await;
    Ok(())
}

/// Update, then reload. The returned representation is not used.
pub async fn update_movie(
    api: &dyn MovieApi,
    tx: &UnboundedSender<Message>,
    movie: &Movie,
) -> Result<(), ApiError> {
    api.update(movie).await?;
    info!(id = %movie.id_text(), "movie updated");
    load_movies(api, tx).await;
    Ok(())
}

/// Delete, then reload on success. A failure is reported to the UI and
/// logged, never returned.
pub async fn delete_movie(api: &dyn MovieApi, tx: &UnboundedSender<Message>, id: &str) {
    match api.remove(id).await {
        Ok(()) => {
            info!(%id, "movie deleted");
            load_movies(api, tx).await;
        }
        Err(err) => {
            error!(%id, error = ?err, "failed to delete movie");
            deliver(tx, Message::DeleteFailed(err));
        }
    }
}

/// Spawns flows for [`Command`]s.
pub struct Dispatcher {
    api: Arc<dyn MovieApi>,
    tx: UnboundedSender<Message>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn MovieApi>, tx: UnboundedSender<Message>) -> Self {
        Self { api, tx }
    }

    pub fn run(&self, command: Command) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match command {
                Command::Reload => load_movies(api.as_ref(), &tx).await,
                Command::Save {
                    slot,
                    generation,
                    kind,
                    movie,
                } => {
                    let result = match kind {
                        SaveKind::Add => add_movie(api.as_ref(), &tx, &movie).await,
                        SaveKind::Update => update_movie(api.as_ref(), &tx, &movie).await,
                    };
                    deliver(
                        &tx,
                        Message::Saved {
                            slot,
                            generation,
                            result,
                        },
                    );
                }
                Command::Delete(id) => delete_movie(api.as_ref(), &tx, &id).await,
            }
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    /// In-memory service double that counts list calls.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub movies: Mutex<Vec<Movie>>,
        pub list_calls: AtomicUsize,
        pub fail_list: bool,
        pub fail_create: Option<String>,
        pub fail_remove: bool,
    }

    impl FakeApi {
        pub fn with_movies(movies: Vec<Movie>) -> Self {
            Self {
                movies: Mutex::new(movies),
                ..Default::default()
            }
        }

        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    fn rejected(status: u16, message: &str) -> ApiError {
        ApiError::Status {
            status,
            body: serde_json::to_string(message).unwrap(),
        }
    }

    #[async_trait]
    impl MovieApi for FakeApi {
        async fn list(&self) -> Result<Vec<Movie>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list {
                return Err(rejected(500, "internal server error"));
            }
            Ok(self.movies.lock().unwrap().clone())
        }

        async fn create(&self, movie: &Movie) -> Result<(), ApiError> {
            if let Some(message) = &self.fail_create {
                return Err(rejected(409, message));
            }
            self.movies.lock().unwrap().push(movie.clone());
            Ok(())
        }

        async fn update(&self, movie: &Movie) -> Result<Option<Movie>, ApiError> {
            let mut movies = self.movies.lock().unwrap();
            match movies.iter_mut().find(|m| m.id == movie.id) {
                Some(slot) => {
                    *slot = movie.clone();
                    Ok(Some(movie.clone()))
                }
                None => Err(rejected(404, "movie not found")),
            }
        }

        async fn remove(&self, id: &str) -> Result<(), ApiError> {
            if self.fail_remove {
                return Err(rejected(404, "movie not found"));
            }
            self.movies
                .lock()
                .unwrap()
                .retain(|m| m.id_text() != id);
            Ok(())
        }

        async fn fetch(&self, id: &str) -> Result<Movie, ApiError> {
            self.movies
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id_text() == id)
                .cloned()
                .ok_or_else(|| rejected(404, "movie not found"))
        }
    }

    pub(crate) fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id: Some(id),
            title: title.to_string(),
            director: "Someone".to_string(),
            imdb: Some(7),
            hollywood: "yes".to_string(),
            bollywood: "no".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_delivers_collection() {
        let api = FakeApi::with_movies(vec![movie(1, "Heat"), movie(2, "Sholay")]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        load_movies(&api, &tx).await;

        match rx.try_recv().unwrap() {
            Message::Loaded(Ok(movies)) => {
                assert_eq!(movies, vec![movie(1, "Heat"), movie(2, "Sholay")])
            }
            other => panic!("Expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_reloads_exactly_once() {
        let api = FakeApi::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        add_movie(&api, &tx, &movie(3, "Lagaan")).await.unwrap();

        assert_eq!(api.list_calls(), 1);
        assert!(matches!(rx.try_recv().unwrap(), Message::Loaded(Ok(ref m)) if m.len() == 1));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_failure_propagates_without_reload() {
        let api = FakeApi {
            fail_create: Some("movie already exist".to_string()),
            ..Default::default()
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        let err = add_movie(&api, &tx, &movie(3, "Lagaan")).await.unwrap_err();

        assert_eq!(err.response_message().as_deref(), Some("movie already exist"));
        assert_eq!(api.list_calls(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_reloads() {
        let api = FakeApi::with_movies(vec![movie(1, "Heat")]);
        let (tx, _rx) = mpsc::unbounded_channel();
        update_movie(&api, &tx, &movie(1, "Heat 2")).await.unwrap();

        assert_eq!(api.list_calls(), 1);
        assert_eq!(api.movies.lock().unwrap()[0].title, "Heat 2");
    }

    #[tokio::test]
    async fn test_delete_success_reloads() {
        let api = FakeApi::with_movies(vec![movie(1, "Heat"), movie(2, "Sholay")]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        delete_movie(&api, &tx, "1").await;

        assert_eq!(api.list_calls(), 1);
        match rx.try_recv().unwrap() {
            Message::Loaded(Ok(movies)) => assert_eq!(movies, vec![movie(2, "Sholay")]),
            other => panic!("Expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_failure_reports_without_reload() {
        let api = FakeApi {
            fail_remove: true,
            ..FakeApi::with_movies(vec![movie(1, "Heat")])
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        delete_movie(&api, &tx, "1").await;

        assert_eq!(api.list_calls(), 0);
        assert!(matches!(rx.try_recv().unwrap(), Message::DeleteFailed(_)));
    }

    #[tokio::test]
    async fn test_dispatcher_reports_save_after_reload() {
        let api = Arc::new(FakeApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(api.clone(), tx);

        dispatcher.run(Command::Save {
            slot: Slot::Add,
            generation: 4,
            kind: SaveKind::Add,
            movie: movie(9, "Dil Se"),
        });

        assert!(matches!(rx.recv().await, Some(Message::Loaded(Ok(_)))));
        match rx.recv().await {
            Some(Message::Saved {
                slot,
                generation,
                result,
            }) => {
                assert_eq!(slot, Slot::Add);
                assert_eq!(generation, 4);
                assert!(result.is_ok());
            }
            other => panic!("Expected Saved, got {other:?}"),
        }
        assert_eq!(api.list_calls(), 1);
    }
}

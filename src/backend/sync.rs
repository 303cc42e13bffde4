//! Best-effort write-through of completion events
//!
//! Callers hand a command to [`ProgressSynchronizer`] and move on. A
//! background task spawns one request per command; failures are logged and
//! never reach the caller. There is no retry, no deduplication and no
//! ordering guarantee between requests.

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use super::client::BackendClient;
use super::models::{FinalScoreRequest, SaveProgressRequest, UserRef};

/// A write queued for the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    /// `POST progress/save`
    SaveProgress(SaveProgressRequest),
    /// `POST progress/final-quiz`; `token` is None when no credential is stored
    SubmitFinalScore {
        request: FinalScoreRequest,
        token: Option<String>,
    },
}

/// Fire-and-forget handle for progress writes
#[derive(Debug, Clone)]
pub struct ProgressSynchronizer {
    tx: mpsc::UnboundedSender<SyncCommand>,
    username: String,
    token: Option<String>,
}

impl ProgressSynchronizer {
    /// Create a synchronizer and the receiving end of its command channel
    pub fn channel(
        username: impl Into<String>,
        token: Option<String>,
    ) -> (Self, mpsc::UnboundedReceiver<SyncCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, username: username.into(), token }, rx)
    }

    /// Create a synchronizer whose commands are sent by `client`
    ///
    /// Must be called inside a tokio runtime. The returned handle completes
    /// once every synchronizer clone is dropped and all requests finished.
    pub fn spawn(
        client: BackendClient,
        username: impl Into<String>,
        token: Option<String>,
    ) -> (Self, JoinHandle<()>) {
        let (sync, rx) = Self::channel(username, token);
        let handle = tokio::spawn(run(client, rx));
        (sync, handle)
    }

    /// Learner the writes are made for
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Queue a progress save
    pub fn save(&self, module_name: &str, section_name: &str, completed: bool, percentage: u8) {
        let request = SaveProgressRequest {
            user: UserRef { username: self.username.clone() },
            module_name: module_name.to_string(),
            section_name: section_name.to_string(),
            completed,
            progress_percentage: percentage,
        };
        self.send(SyncCommand::SaveProgress(request));
    }

    /// Queue a final quiz score submission
    pub fn submit_final_score(&self, username: &str, score: u8) {
        let request = FinalScoreRequest { username: username.to_string(), score, completed: true };
        self.send(SyncCommand::SubmitFinalScore { request, token: self.token.clone() });
    }

    fn send(&self, command: SyncCommand) {
        if self.tx.send(command).is_err() {
            tracing::error!("Progress synchronizer stopped; write dropped");
        }
    }
}

/// Drain the command channel, spawning one request per command
pub async fn run(client: BackendClient, mut rx: mpsc::UnboundedReceiver<SyncCommand>) {
    let mut in_flight = JoinSet::new();

    while let Some(command) = rx.recv().await {
        let client = client.clone();
        in_flight.spawn(async move { dispatch(&client, command).await });
    }

    while in_flight.join_next().await.is_some() {}
}

async fn dispatch(client: &BackendClient, command: SyncCommand) {
    match command {
        SyncCommand::SaveProgress(request) => match client.save_progress(&request).await {
            Ok(()) => tracing::info!(
                "Progress saved: {} ({}%)",
                request.section_name,
                request.progress_percentage
            ),
            Err(e) => tracing::error!("Error saving progress for {}: {}", request.section_name, e),
        },
        SyncCommand::SubmitFinalScore { request, token } => {
            let Some(token) = token else {
                tracing::error!("Final quiz score not saved: no access token for {}", request.username);
                return;
            };
            match client.submit_final_score(&token, &request).await {
                Ok(()) => tracing::info!("Final quiz result saved ({}%)", request.score),
                Err(e) => tracing::error!("Error saving final quiz result: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[tokio::test]
    async fn save_queues_a_request() {
        let (sync, mut rx) = ProgressSynchronizer::channel("ana", None);
        sync.save("MODULE_1", "Section 1: What is IPv4?", true, 3);

        let command = rx.recv().await.unwrap();
        assert_eq!(
            command,
            SyncCommand::SaveProgress(SaveProgressRequest {
                user: UserRef { username: "ana".into() },
                module_name: "MODULE_1".into(),
                section_name: "Section 1: What is IPv4?".into(),
                completed: true,
                progress_percentage: 3,
            })
        );
    }

    #[tokio::test]
    async fn duplicate_saves_are_not_deduplicated() {
        let (sync, mut rx) = ProgressSynchronizer::channel("ana", None);
        sync.save("MODULE_1", "s", true, 3);
        sync.save("MODULE_1", "s", true, 3);
        drop(sync);

        let mut count = 0;
        while rx.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn final_score_carries_the_token() {
        let (sync, mut rx) = ProgressSynchronizer::channel("ana", Some("tok".into()));
        sync.submit_final_score("ana", 80);

        match rx.recv().await.unwrap() {
            SyncCommand::SubmitFinalScore { request, token } => {
                assert_eq!(request.score, 80);
                assert!(request.completed);
                assert_eq!(token.as_deref(), Some("tok"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_after_worker_stops_does_not_panic() {
        let (sync, rx) = ProgressSynchronizer::channel("ana", None);
        drop(rx);
        sync.save("MODULE_1", "s", true, 3);
    }

    #[tokio::test]
    async fn failed_writes_are_swallowed() {
        // Nothing listens on port 9; every request fails and is only logged.
        let client = BackendClient::new("http://127.0.0.1:9/api", Duration::from_millis(200)).unwrap();
        let (sync, handle) = ProgressSynchronizer::spawn(client, "ana", None);
        sync.save("MODULE_1", "s", true, 3);
        sync.submit_final_score("ana", 90);
        drop(sync);

        handle.await.unwrap();
    }
}

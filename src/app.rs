//! Pipeline controller for the two-stage meme generation cycle.
//!
//! Owns the lifecycle state machine (Idle -> GeneratingText ->
//! GeneratingImage -> Complete, with Error reachable from either generating
//! stage) and broadcasts state snapshots over a watch channel for the view.

use crate::ai::{GeminiImageClient, GeminiTextClient, ImageGenerationService, TextGenerationService};
use crate::models::{Config, GeneratedMeme, Stage};
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Shown when the text step fails, whatever the underlying cause.
pub const TEXT_FAILURE_MESSAGE: &str =
    "Failed to come up with a joke. I guess I'm not funny today.";
/// Shown when the image step fails, whatever the underlying cause.
pub const IMAGE_FAILURE_MESSAGE: &str = "Failed to paint the picture. Use your imagination.";

/// Read-only view of the controller state, published on every transition.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stage: Stage,
    pub meme: Option<GeneratedMeme>,
    pub error: Option<String>,
    pub input: String,
}

impl Snapshot {
    fn idle() -> Self {
        Self {
            stage: Stage::Idle,
            meme: None,
            error: None,
            input: String::new(),
        }
    }
}

struct AppState {
    stage: Stage,
    meme: Option<GeneratedMeme>,
    error: Option<String>,
    input: String,
    /// Incremented at the start of every cycle and by `reset`. Responses
    /// carrying an older cycle number are stale and must be discarded.
    cycle: u64,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub text: Box<dyn TextGenerationService>,
    pub image: Box<dyn ImageGenerationService>,
}

/// Coordinates the text and image generation steps for one submission at a
/// time. All mutation happens under one mutex, never held across an await.
pub struct App {
    text: Box<dyn TextGenerationService>,
    image: Box<dyn ImageGenerationService>,
    state: Mutex<AppState>,
    watch_tx: watch::Sender<Snapshot>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: AppServices) -> Self {
        let (watch_tx, _) = watch::channel(Snapshot::idle());
        Self {
            text: services.text,
            image: services.image,
            state: Mutex::new(AppState {
                stage: Stage::Idle,
                meme: None,
                error: None,
                input: String::new(),
                cycle: 0,
            }),
            watch_tx,
        }
    }

    /// Construct an app backed by Gemini, sharing one HTTP connection pool
    /// across both adapters.
    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Self {
        info!(
            "Text model: {}, image model: {}",
            config.text_model, config.image_model
        );

        Self::with_services(AppServices {
            text: Box::new(GeminiTextClient::new_with_client(
                config.gemini_api_key.clone(),
                config.text_model.clone(),
                http_client.clone(),
            )),
            image: Box::new(GeminiImageClient::new_with_client(
                config.gemini_api_key.clone(),
                config.image_model.clone(),
                http_client,
            )),
        })
    }

    /// Subscribe to state transitions. The receiver always holds the latest
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.watch_tx.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        let st = self.state.lock().unwrap();
        Self::snapshot_of(&st)
    }

    pub fn stage(&self) -> Stage {
        self.state.lock().unwrap().stage
    }

    pub fn current_meme(&self) -> Option<GeneratedMeme> {
        self.state.lock().unwrap().meme.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    /// Run one generation cycle for `topic`.
    ///
    /// Empty (after trimming) submissions are silently ignored. Submissions
    /// are refused while a cycle is outstanding or a result is still shown;
    /// from `Error`, submitting again starts a fresh cycle. Failures land in
    /// `Error` with a fixed per-stage message; the cause is only logged.
    pub async fn submit(&self, topic: &str) {
        let topic = topic.trim();
        if topic.is_empty() {
            debug!("Ignoring empty submission");
            return;
        }

        let token = {
            let mut st = self.state.lock().unwrap();
            match st.stage {
                Stage::GeneratingText | Stage::GeneratingImage => {
                    warn!("Submission ignored: a generation cycle is already running");
                    return;
                }
                Stage::Complete => {
                    warn!("Submission ignored: reset before generating another meme");
                    return;
                }
                Stage::Idle | Stage::Error => {}
            }

            st.cycle += 1;
            st.error = None;
            st.meme = None;
            st.input = topic.to_string();
            st.stage = Stage::GeneratingText;
            self.publish(&st);
            st.cycle
        };

        info!("Generating meme text for topic: {}", topic);
        let content = match self.text.generate_meme_text(topic).await {
            Ok(content) => content,
            Err(e) => {
                error!("Text generation failed: {}", e);
                self.fail(token, TEXT_FAILURE_MESSAGE);
                return;
            }
        };

        {
            let mut st = self.state.lock().unwrap();
            if st.cycle != token {
                debug!("Discarding stale text response");
                return;
            }
            st.stage = Stage::GeneratingImage;
            self.publish(&st);
        }

        info!("Generating meme image");
        let image_url = match self.image.generate_image(&content.image_prompt).await {
            Ok(url) => url,
            Err(e) => {
                error!("Image generation failed: {}", e);
                self.fail(token, IMAGE_FAILURE_MESSAGE);
                return;
            }
        };

        let mut st = self.state.lock().unwrap();
        if st.cycle != token {
            debug!("Discarding stale image response");
            return;
        }
        let meme = GeneratedMeme::new(content, image_url);
        info!("Meme {} complete", meme.id);
        st.meme = Some(meme);
        st.stage = Stage::Complete;
        self.publish(&st);
    }

    /// Clear everything and return to `Idle`. Callable from any stage;
    /// idempotent. Also invalidates any in-flight cycle so its eventual
    /// response is discarded.
    pub fn reset(&self) {
        let mut st = self.state.lock().unwrap();
        st.cycle += 1;
        st.stage = Stage::Idle;
        st.meme = None;
        st.error = None;
        st.input.clear();
        self.publish(&st);
    }

    /// Re-submit the kept input buffer, the retry affordance of the error
    /// view. A no-op when the buffer is empty.
    pub async fn retry(&self) {
        let input = self.state.lock().unwrap().input.clone();
        self.submit(&input).await;
    }

    fn fail(&self, token: u64, message: &str) {
        let mut st = self.state.lock().unwrap();
        if st.cycle != token {
            debug!("Discarding stale failure");
            return;
        }
        st.stage = Stage::Error;
        st.error = Some(message.to_string());
        self.publish(&st);
    }

    fn snapshot_of(st: &AppState) -> Snapshot {
        Snapshot {
            stage: st.stage,
            meme: st.meme.clone(),
            error: st.error.clone(),
            input: st.input.clone(),
        }
    }

    fn publish(&self, st: &AppState) {
        self.watch_tx.send_replace(Self::snapshot_of(st));
    }
}

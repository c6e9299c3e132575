use crate::{
    config::PlannerConfig,
    core::responder::{CompletionBackend, LiveResponder, OfflineResponder, Responder},
    services::chat_client::ChatClient,
    types::{AgentResult, Credential, GenerationOptions, RequestKind, TripRequest},
};
use tracing::{info, warn};

/// Where a single invocation ends up. Nothing carries over between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    /// No key configured; the offline templates answer
    NoCredential,
    /// A key is configured; the live model is asked first
    Ready,
    /// The live call failed; the offline templates answered instead
    Degraded,
}

/// Travel-planning agent: live model first, offline templates as the fallback
#[derive(Debug)]
pub struct Agent {
    backend: Box<dyn CompletionBackend>,
    options: GenerationOptions,
    offline: OfflineResponder,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(ChatClient::new())
    }
}

impl Agent {
    pub fn new(client: ChatClient) -> Self {
        Self::with_backend(client)
    }

    /// Use any completion backend in place of the HTTP client
    pub fn with_backend(backend: impl CompletionBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            options: GenerationOptions::default(),
            offline: OfflineResponder,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        let client = ChatClient::new()
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout);
        Self::new(client).with_options(config.options.clone())
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.options.temperature = temperature;
        self
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// State an invocation starts in for the given credential
    pub fn initial_state(credential: Option<&Credential>) -> AgentState {
        match credential {
            Some(_) => AgentState::Ready,
            None => AgentState::NoCredential,
        }
    }

    pub async fn run(
        &self,
        kind: RequestKind,
        trip: &TripRequest,
        credential: Option<&Credential>,
    ) -> AgentResult {
        self.run_with_research(kind, trip, credential, None).await
    }

    /// Like [`Agent::run`], passing caller-held research notes into itinerary prompts
    pub async fn run_with_research(
        &self,
        kind: RequestKind,
        trip: &TripRequest,
        credential: Option<&Credential>,
        research_notes: Option<&str>,
    ) -> AgentResult {
        let credential = match credential {
            Some(credential) => credential,
            None => {
                info!(
                    kind = %kind,
                    state = ?AgentState::NoCredential,
                    destination = trip.destination(),
                    "no API key configured, answering from offline template"
                );
                return AgentResult::offline(kind, self.offline.respond(kind, trip));
            }
        };

        info!(
            kind = %kind,
            state = ?AgentState::Ready,
            model = %self.options.model,
            destination = trip.destination(),
            "requesting live completion"
        );

        let live = LiveResponder::new(self.backend.as_ref(), &self.options, credential)
            .with_research_notes(research_notes);

        match live.produce(kind, trip).await {
            Ok(text) => {
                info!(kind = %kind, chars = text.len(), "live completion succeeded");
                AgentResult::live(kind, text)
            }
            Err(err) => {
                warn!(
                    kind = %kind,
                    state = ?AgentState::Degraded,
                    error_code = err.error_code(),
                    error = %err,
                    "live completion failed, falling back to offline template"
                );
                AgentResult::degraded(kind, self.offline.respond(kind, trip), &err)
            }
        }
    }
}

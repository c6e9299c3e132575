use async_trait::async_trait;

use crate::{
    error::ChatError,
    offline::build_offline_response,
    prompts::build_prompt_with_research,
    types::{Credential, GenerationOptions, RequestKind, TripRequest},
};

/// Remote text-generation boundary.
///
/// [`crate::ChatClient`] is the HTTP implementation; tests substitute stubs.
#[async_trait]
pub trait CompletionBackend: Send + Sync + std::fmt::Debug {
    /// Perform one completion call for `prompt`, without retrying
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        credential: &Credential,
    ) -> Result<String, ChatError>;
}

/// Something that can answer a planner request with text
#[async_trait]
pub trait Responder: Send + Sync {
    async fn produce(&self, kind: RequestKind, trip: &TripRequest) -> Result<String, ChatError>;
}

/// Answers from the fixed offline templates
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineResponder;

impl OfflineResponder {
    pub fn respond(&self, kind: RequestKind, trip: &TripRequest) -> String {
        build_offline_response(kind, trip)
    }
}

#[async_trait]
impl Responder for OfflineResponder {
    async fn produce(&self, kind: RequestKind, trip: &TripRequest) -> Result<String, ChatError> {
        Ok(self.respond(kind, trip))
    }
}

/// Answers by prompting the remote model once
#[derive(Debug, Clone, Copy)]
pub struct LiveResponder<'a> {
    backend: &'a dyn CompletionBackend,
    options: &'a GenerationOptions,
    credential: &'a Credential,
    research_notes: Option<&'a str>,
}

impl<'a> LiveResponder<'a> {
    pub fn new(
        backend: &'a dyn CompletionBackend,
        options: &'a GenerationOptions,
        credential: &'a Credential,
    ) -> Self {
        Self {
            backend,
            options,
            credential,
            research_notes: None,
        }
    }

    pub fn with_research_notes(mut self, research_notes: Option<&'a str>) -> Self {
        self.research_notes = research_notes;
        self
    }
}

#[async_trait]
impl<'a> Responder for LiveResponder<'a> {
    async fn produce(&self, kind: RequestKind, trip: &TripRequest) -> Result<String, ChatError> {
        let prompt = build_prompt_with_research(kind, trip, self.research_notes);
        self.backend
            .complete(&prompt, self.options, self.credential)
            .await
    }
}

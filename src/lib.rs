//! trip-planner-agent: a small travel-planning agent over a hosted chat-completion API
//!
//! The agent turns a validated [`TripRequest`] into a research, itinerary, or tips
//! prompt, asks the remote model once, and falls back to deterministic offline
//! templates when no API key is configured or the call fails.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use trip_planner::{Agent, ChatClient, Credential, RequestKind, TravelStyle, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let trip = TripRequest::builder(
//!         "Tokyo, Japan",
//!         NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
//!     )
//!     .with_style(TravelStyle::Cultural)
//!     .build()?;
//!
//!     let agent = Agent::new(ChatClient::new());
//!     let credential = Credential::new(std::env::var("HF_API_KEY").unwrap_or_default());
//!
//!     let result = agent.run(RequestKind::Itinerary, &trip, credential.as_ref()).await;
//!     println!("{}", result.render());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod offline;
pub mod prompts;
pub(crate) mod services;
pub mod types;

pub use config::PlannerConfig;
pub use core::{
    Agent, AgentState, CompletionBackend, LiveResponder, OfflineResponder, Responder,
};
pub use error::{ChatError, ErrorKind, PlannerError, Result};
pub use offline::build_offline_response;
pub use prompts::{build_prompt, build_prompt_with_research};
pub use services::chat_client::{ChatClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use types::{
    Accommodation, AgentResult, BudgetTier, Credential, GenerationOptions, Interest, Provenance,
    RequestKind, Transportation, TravelStyle, TripRequest, TripRequestBuilder,
};

#[cfg(feature = "cli")]
pub mod cli;

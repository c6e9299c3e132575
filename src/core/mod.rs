pub mod agent;
pub mod responder;

pub use agent::{Agent, AgentState};
pub use responder::{CompletionBackend, LiveResponder, OfflineResponder, Responder};

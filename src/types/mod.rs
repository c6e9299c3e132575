pub mod options;
pub mod result;
pub mod trip;

pub use options::{Credential, GenerationOptions};
pub use result::{AgentResult, Provenance, RequestKind};
pub use trip::{
    Accommodation, BudgetTier, Interest, Transportation, TravelStyle, TripRequest,
    TripRequestBuilder,
};

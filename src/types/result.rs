use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three actions a user can ask the planner for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Research,
    Itinerary,
    Tips,
}

impl RequestKind {
    pub const ALL: [RequestKind; 3] = [
        RequestKind::Research,
        RequestKind::Itinerary,
        RequestKind::Tips,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Research => "Research",
            RequestKind::Itinerary => "Itinerary",
            RequestKind::Tips => "Tips",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RequestKind {
    type Err = crate::error::PlannerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "research" => Ok(RequestKind::Research),
            "itinerary" | "plan" => Ok(RequestKind::Itinerary),
            "tips" => Ok(RequestKind::Tips),
            _ => Err(crate::error::PlannerError::UnknownOption {
                field: "request kind",
                value: value.to_string(),
            }),
        }
    }
}

/// Where the text of a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Live,
    Offline,
}

/// Outcome of a single agent invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub kind: RequestKind,
    pub text: String,
    pub provenance: Provenance,
    /// Set when a live call was attempted and failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    /// Human-readable failure detail accompanying `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl AgentResult {
    pub fn live(kind: RequestKind, text: String) -> Self {
        Self {
            kind,
            text,
            provenance: Provenance::Live,
            error: None,
            error_detail: None,
        }
    }

    pub fn offline(kind: RequestKind, text: String) -> Self {
        Self {
            kind,
            text,
            provenance: Provenance::Offline,
            error: None,
            error_detail: None,
        }
    }

    pub fn degraded(kind: RequestKind, text: String, error: &crate::error::ChatError) -> Self {
        Self {
            kind,
            text,
            provenance: Provenance::Offline,
            error: Some(error.kind()),
            error_detail: Some(format!("{} {}", error, error.hint())),
        }
    }

    pub fn is_live(&self) -> bool {
        self.provenance == Provenance::Live
    }

    /// True when a live call failed and the text is the offline template
    pub fn is_degraded(&self) -> bool {
        self.provenance == Provenance::Offline && self.error.is_some()
    }

    /// Text block for terminal display
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        let source = match self.provenance {
            Provenance::Live => "live model",
            Provenance::Offline => "offline template",
        };
        lines.push(format!("=== {} ({}) ===", self.kind, source));

        if let Some(kind) = self.error {
            lines.push(format!("Live request failed: {}", kind));
            if let Some(detail) = &self.error_detail {
                lines.push(detail.clone());
            }
        }

        lines.push(String::new());
        lines.push(self.text.clone());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;

    #[test]
    fn test_degraded_result_carries_error() {
        let err = ChatError::Unauthorized {
            message: "invalid token".to_string(),
        };
        let result = AgentResult::degraded(RequestKind::Tips, "template".to_string(), &err);

        assert!(result.is_degraded());
        assert!(!result.is_live());
        assert_eq!(result.error, Some(ErrorKind::Unauthorized));

        let rendered = result.render();
        assert!(rendered.contains("=== Tips (offline template) ==="));
        assert!(rendered.contains("Live request failed: Unauthorized"));
        assert!(rendered.ends_with("template"));
    }

    #[test]
    fn test_live_result_render_and_json() {
        let result = AgentResult::live(RequestKind::Itinerary, "Day 1".to_string());
        assert!(!result.is_degraded());
        assert!(result.render().starts_with("=== Itinerary (live model) ==="));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["provenance"], "live");
        assert_eq!(json["kind"], "itinerary");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_request_kind_parse() {
        assert_eq!("Research".parse::<RequestKind>().unwrap(), RequestKind::Research);
        assert_eq!("plan".parse::<RequestKind>().unwrap(), RequestKind::Itinerary);
        assert!("export".parse::<RequestKind>().is_err());
    }
}

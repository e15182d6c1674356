// crates/core/src/chat.rs
//! Rule-based chat responder used until an LLM backs /chat/completion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ESCALATION_KEYWORDS: &[&str] = &[
    "call", "visit", "buy", "sell", "deal", "negotiate", "complaint", "support",
];

const PROPERTY_KEYWORDS: &[&str] = &[
    "bhk", "apartment", "plot", "villa", "flat", "budget", "price", "under", "near", "metro",
];

/// One prior turn of the conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Request body for POST /chat/completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    pub message: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
    #[serde(default)]
    pub context: Option<Map<String, Value>>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCompletionResponse {
    pub response: String,
    pub requires_escalation: bool,
    pub confidence: f64,
}

/// Build a reply for `request`. The first matching rule wins.
pub fn respond(request: &ChatCompletionRequest) -> ChatCompletionResponse {
    let message = request.message.trim();
    if message.is_empty() {
        return reply("Please share your requirement, location, and budget.", false, 0.3);
    }

    let lower = message.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    if mentions(ESCALATION_KEYWORDS) {
        return reply(
            "I can connect you with Customer Support for further assistance. \
             Please share your preferred location, budget, and property type so I can brief the team.",
            true,
            0.5,
        );
    }

    if mentions(PROPERTY_KEYWORDS) {
        return reply(
            "Got it. Please confirm your city, budget range, and property type (plot/flat/villa). \
             I will suggest matching properties and share in-app links.",
            false,
            0.55,
        );
    }

    if mentions(&["requirement", "update"]) {
        return reply(
            "Sure. Share the updated budget, location, and property type so I can update your requirement.",
            false,
            0.5,
        );
    }

    reply(
        "Thanks for reaching out. Please share your requirement, location, and budget \
         so I can help with the next steps.",
        false,
        0.4,
    )
}

fn reply(text: &str, requires_escalation: bool, confidence: f64) -> ChatCompletionResponse {
    ChatCompletionResponse {
        response: text.to_string(),
        requires_escalation,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(message: &str) -> ChatCompletionResponse {
        respond(&ChatCompletionRequest {
            message: message.to_string(),
            language: Some("en".to_string()),
            conversation_history: Vec::new(),
            context: None,
            system_prompt: None,
        })
    }

    #[test]
    fn test_empty_message_asks_for_details() {
        let reply = ask("   ");
        assert_eq!(reply.response, "Please share your requirement, location, and budget.");
        assert!(!reply.requires_escalation);
        assert_eq!(reply.confidence, 0.3);
    }

    #[test]
    fn test_serious_intent_escalates() {
        let reply = ask("I want to BUY this villa");
        assert!(reply.requires_escalation);
        assert_eq!(reply.confidence, 0.5);
        assert!(reply.response.contains("Customer Support"));
    }

    #[test]
    fn test_property_search() {
        let reply = ask("2 bhk near the metro");
        assert!(!reply.requires_escalation);
        assert_eq!(reply.confidence, 0.55);
        assert!(reply.response.starts_with("Got it."));
    }

    #[test]
    fn test_requirement_update() {
        let reply = ask("please change my requirement");
        assert_eq!(reply.confidence, 0.5);
        assert!(reply.response.starts_with("Sure."));
    }

    #[test]
    fn test_generic_greeting() {
        let reply = ask("hello there");
        assert!(!reply.requires_escalation);
        assert_eq!(reply.confidence, 0.4);
        assert!(reply.response.starts_with("Thanks for reaching out."));
    }

    #[test]
    fn test_request_defaults() {
        let request: ChatCompletionRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(request.language.is_none());
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn test_response_is_camel_case() {
        let json = serde_json::to_string(&ask("hello")).unwrap();
        assert!(json.contains("\"requiresEscalation\":false"));
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_READY_TOKEN: &str = "PAGE_READY";

// What the loaded document posts to the host as JSON
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DocumentPayload {
    PageReady,
    Log { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMessage {
    PageReady,
    Log(String),
    Unknown(String),
}

impl DocumentMessage {
    /// Classifies a raw message from the document. JSON payloads are tried first,
    /// anything else is compared against `ready_token` as a bare token.
    pub fn parse(raw: &str, ready_token: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.starts_with('{') {
            if let Ok(payload) = serde_json::from_str::<DocumentPayload>(trimmed) {
                return match payload {
                    DocumentPayload::PageReady => DocumentMessage::PageReady,
                    DocumentPayload::Log { message } => DocumentMessage::Log(message),
                };
            }
        }

        if !ready_token.is_empty() && trimmed == ready_token {
            DocumentMessage::PageReady
        } else {
            DocumentMessage::Unknown(raw.to_owned())
        }
    }

    #[cfg(test)]
    fn is_page_ready(&self) -> bool {
        matches!(self, DocumentMessage::PageReady)
    }
}

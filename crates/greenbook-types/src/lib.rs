//! greenbook-types: domain types shared by the directory service and its store crate.
//!
//! `Business` and `Category` mirror the rows owned by the relational store.
//! `BusinessSummary`, `SearchResponse` and `ChatResponse` are the wire shapes
//! returned by the AI endpoints; `SearchResponse` is also the cached payload.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    /// Free-text opening hours, e.g. "Даваа-Ням 11:00-23:00"
    pub timetable: Option<String>,
    pub category: Category,
}

/// Business projection returned by the AI endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BusinessSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub website: Option<String>,
    pub timetable: Option<String>,
    /// Category name (not id)
    pub category: String,
}

impl From<&Business> for BusinessSummary {
    fn from(b: &Business) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            description: b.description.clone(),
            address: b.address.clone(),
            phone: b.phone.clone(),
            website: b.website.clone(),
            timetable: b.timetable.clone(),
            category: b.category.name.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of a conversation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One-shot search result. Serialized as-is into the response cache.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub query: String,
    pub answer: String,
    pub businesses: Vec<BusinessSummary>,
}

/// Multi-turn chat result. Never cached.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub message: String,
    pub businesses: Vec<BusinessSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_business() -> Business {
        Business {
            id: "b1".into(),
            name: "Millie's Espresso".into(),
            description: "Coffee and breakfast".into(),
            address: "Сөүлийн гудамж, Улаанбаатар".into(),
            phone: "+976-7711-0003".into(),
            email: "hello@millies.mn".into(),
            website: Some("https://millies.mn".into()),
            timetable: Some("Даваа-Ням 08:00-22:00".into()),
            category: Category {
                id: "c3".into(),
                name: "Кофе шоп".into(),
            },
        }
    }

    #[test]
    fn test_summary_uses_category_name() {
        let summary = BusinessSummary::from(&sample_business());
        assert_eq!(summary.category, "Кофе шоп");
        assert_eq!(summary.id, "b1");
        assert_eq!(summary.website.as_deref(), Some("https://millies.mn"));
    }

    #[test]
    fn test_summary_omits_email() {
        let summary = BusinessSummary::from(&sample_business());
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("email"));
        assert!(json.contains("\"timetable\""));
    }

    #[test]
    fn test_chat_role_wire_format() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(msg, ChatMessage::assistant("hi"));

        let json = serde_json::to_string(&ChatMessage::user("сайн уу")).unwrap();
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let parsed = serde_json::from_str::<ChatMessage>(r#"{"role":"system","content":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_search_response_roundtrip() {
        let response = SearchResponse {
            query: "ресторан".into(),
            answer: "Modern Nomads is a good choice.".into(),
            businesses: vec![BusinessSummary::from(&sample_business())],
        };

        let json = serde_json::to_string(&response).unwrap();
        let back: SearchResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}

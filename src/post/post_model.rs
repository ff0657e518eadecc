use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the server owns; a client sending them does not get to choose them
pub const RESERVED_FIELDS: [&str; 4] = ["id", "_id", "userId", "userEmail"];

/// A stored post, as returned to clients
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub timestamp: Value,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "userEmail", default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Any other client fields (tag, username, ...), stored and returned as sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body accepted by the create endpoint. Every field is optional at this
/// level so that a missing one can be reported by name.
#[derive(Debug, Deserialize, Default)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub timestamp: Option<Value>,
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreatePostRequest {
    /// Client fields beyond the known ones, minus anything the server assigns
    pub fn take_extra(&mut self) -> Map<String, Value> {
        let mut extra = std::mem::take(&mut self.extra);
        for key in RESERVED_FIELDS {
            extra.remove(key);
        }
        extra
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct DeletePostQuery {
    pub id: Option<String>,
}

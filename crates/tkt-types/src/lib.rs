//! Shared data types for the tkt client.
//!
//! These mirror the JSON documents served by the tracker API. Field names
//! are uneven on the wire (`created_date` but `fullName`) because the server
//! tags them that way; the serde attributes here are the source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ticket (issue) as served by `/api/v1/tickets/{key}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    pub id: i64,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    pub key: String,
    pub summary: String,
    pub description: String,
    pub labels: Vec<Label>,
    pub ticket_type: TicketType,
    pub reporter: User,
    pub assignee: User,
    pub status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    pub project: Project,
}

impl Ticket {
    /// Returns the display label for lists: `KEY summary`.
    pub fn list_label(&self) -> String {
        format!("{} {}", self.key, self.summary)
    }
}

/// The type of a ticket (Bug, Task, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketType {
    pub id: i64,
    pub name: String,
}

/// A ticket's current workflow status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    pub id: i64,
    pub name: String,
}

/// A label attached to tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub id: i64,
    pub name: String,
}

/// A comment on a ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: i64,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    pub ticket_key: String,
    pub body: String,
    pub author: User,
}

/// A project as served by `/api/v1/projects/{key}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub key: String,
    pub name: String,
    #[serde(rename = "createdDate")]
    pub created_date: Option<DateTime<Utc>>,
    pub lead: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(rename = "ticketTypes")]
    pub ticket_types: Vec<String>,
    pub public: bool,
}

/// Per-user preferences stored server side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "defaultProject", skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
    #[serde(rename = "defaultView", skip_serializing_if = "Option::is_none")]
    pub default_view: Option<String>,
}

/// A user of the tracker.
///
/// The server strips the password before responding; we never model it here
/// so it cannot leak into the session blob or logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "profilePicture")]
    pub profile_picture: String,
    #[serde(rename = "isAdmin", skip_serializing_if = "std::ops::Not::not")]
    pub is_admin: bool,
    #[serde(rename = "isActive", skip_serializing_if = "std::ops::Not::not")]
    pub is_active: bool,
    pub settings: Settings,
}

/// Payload for creating a ticket (POST /api/v1/tickets).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    pub summary: String,
    pub description: String,
    pub ticket_type: TicketType,
    pub project: Project,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
}

/// Payload for registering a user (POST /api/v1/users).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Response from login and registration endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: User,
}

/// General purpose error payload the server sends with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_names() {
        let json = r#"{
            "username": "foouser",
            "email": "foo@example.com",
            "fullName": "Foo McFooson",
            "profilePicture": "https://www.gravatar.com/avatar/deadbeef",
            "isAdmin": true,
            "settings": { "defaultProject": "TEST" }
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "Foo McFooson");
        assert!(user.is_admin);
        assert!(!user.is_active);
        assert_eq!(user.settings.default_project.as_deref(), Some("TEST"));

        // camelCase names must survive the round trip
        let out = serde_json::to_string(&user).unwrap();
        assert!(out.contains("\"fullName\""));
        assert!(out.contains("\"profilePicture\""));
        assert!(!out.contains("full_name"));
    }

    #[test]
    fn test_ticket_snake_case_dates() {
        let json = r#"{
            "id": 1,
            "key": "TEST-1",
            "summary": "This is a test ticket",
            "description": "No, really",
            "created_date": "2017-06-13T04:31:12Z",
            "ticket_type": { "id": 1, "name": "Bug" },
            "status": { "id": 2, "name": "In Progress" }
        }"#;

        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.key, "TEST-1");
        assert_eq!(ticket.ticket_type.name, "Bug");
        assert_eq!(ticket.status.name, "In Progress");
        assert!(ticket.created_date.is_some());
        assert!(ticket.comments.is_empty());
        assert_eq!(ticket.list_label(), "TEST-1 This is a test ticket");
    }

    #[test]
    fn test_project_camel_case() {
        let json = r#"{
            "key": "TEST",
            "name": "Test Project",
            "lead": "foouser",
            "createdDate": "2017-06-13T04:31:12Z",
            "ticketTypes": ["Bug", "Task"],
            "public": true
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.ticket_types, vec!["Bug", "Task"]);
        assert!(project.public);
        assert!(project.homepage.is_none());
    }

    #[test]
    fn test_api_message_optional_field() {
        let msg: ApiMessage = serde_json::from_str(r#"{"message":"not found"}"#).unwrap();
        assert_eq!(msg.message, "not found");
        assert!(msg.field.is_none());

        let msg: ApiMessage =
            serde_json::from_str(r#"{"field":"summary","message":"required"}"#).unwrap();
        assert_eq!(msg.field.as_deref(), Some("summary"));
    }

    #[test]
    fn test_token_response_shape() {
        let json = r#"{"token":"abc123","user":{"username":"foouser"}}"#;
        let resp: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "abc123");
        assert_eq!(resp.user.username, "foouser");
    }
}

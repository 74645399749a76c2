//! Request bodies for the platform's internal write API.
//!
//! Field names and nesting are fixed by the platform; the serde attributes below
//! are the wire format.
use serde::Serialize;

use crate::{ScoutError, Urn};

/// Longest note the platform accepts on an invitation.
pub const INVITE_NOTE_MAX_CHARS: usize = 300;

pub const MESSAGE_CREATE_KEY: &str = "com.linkedin.voyager.messaging.create.MessageCreate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePayload {
    invitee: Invitee,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Invitee {
    invitee_union: InviteeUnion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteeUnion {
    member_profile: Urn,
}

impl InvitePayload {
    /// A blank note is the same as no note.
    pub fn new(invitee: Urn, note: Option<&str>) -> Result<Self, ScoutError> {
        let custom_message = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if let Some(note) = &custom_message {
            let len = note.chars().count();
            if len > INVITE_NOTE_MAX_CHARS {
                return Err(ScoutError::invalid_parameter(
                    "message",
                    format!("invitation note is {len} characters, limit is {INVITE_NOTE_MAX_CHARS}"),
                ));
            }
        }
        Ok(Self {
            invitee: Invitee {
                invitee_union: InviteeUnion {
                    member_profile: invitee,
                },
            },
            custom_message,
        })
    }

    pub fn invitee(&self) -> &Urn {
        &self.invitee.invitee_union.member_profile
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    key_version: &'static str,
    conversation_create: ConversationCreate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConversationCreate {
    event_create: EventCreate,
    recipients: Vec<Urn>,
    subtype: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct EventCreate {
    value: EventValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct EventValue {
    #[serde(rename = "com.linkedin.voyager.messaging.create.MessageCreate")]
    message_create: MessageCreate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageCreate {
    attributed_body: AttributedBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct AttributedBody {
    text: String,
}

impl MessagePayload {
    pub fn new(recipient: Urn, text: &str) -> Result<Self, ScoutError> {
        if text.trim().is_empty() {
            return Err(ScoutError::invalid_parameter(
                "message",
                "message text must not be empty",
            ));
        }
        Ok(Self {
            key_version: "LEGACY_INBOX",
            conversation_create: ConversationCreate {
                event_create: EventCreate {
                    value: EventValue {
                        message_create: MessageCreate {
                            attributed_body: AttributedBody {
                                text: text.to_string(),
                            },
                        },
                    },
                },
                recipients: vec![recipient],
                subtype: "MEMBER_TO_MEMBER",
            },
        })
    }

    pub fn recipient(&self) -> &Urn {
        &self.conversation_create.recipients[0]
    }
}

//! The client-facing JSON message envelope (spec §6): a `type`-tagged
//! union, mirroring the bus protocol other_examples' `protocol.rs` shows
//! for this same "server ↔ client, JSON with a discriminant" shape.
//!
//! `ClientMessage` is what the engine receives; `ServerMessage` is what it
//! sends back. Both round-trip through `serde_json` at the transport
//! boundary the application owns — this crate only defines the shapes.

use serde::{Deserialize, Serialize};

use tactics_action::Action;
use tactics_core::ids::{EntityId, PlayerId};
use tactics_core::using::UsingRef;

/// A message sent by a client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "CONNECTION")]
    Connection {
        client_id: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        desired_name: Option<String>,
    },
    #[serde(rename = "CAST")]
    Cast {
        caster_type: CasterType,
        client_id: String,
        caster_id: EntityId,
        ability_name: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        using: Option<UsingRef>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        granted_by: Option<EntityId>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target: Option<EntityId>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        params: Option<serde_json::Value>,
    },
}

/// `CAST.caster_type` — spec §6 only names `"entity"`, kept as an enum
/// rather than a bare string so an unrecognized value is a deserialize
/// error rather than a silently-ignored request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterType {
    Entity,
}

/// A message sent by the server to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "CONNECTION_RESPONSE")]
    ConnectionResponse {
        ok: bool,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        player_id: Option<PlayerId>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        error: Option<String>,
    },
    #[serde(rename = "ACTION")]
    Action { action: Box<Action> },
}

impl ServerMessage {
    pub fn action(action: Action) -> Self {
        ServerMessage::Action { action: Box::new(action) }
    }
}

/// The outcome of validating a `CAST` message against live registry state
/// (spec §6: "Server validates client exists, entity exists, and the
/// player owns the entity; otherwise returns a human-readable reason").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastRejection {
    UnknownClient,
    UnknownCaster,
    NotOwner,
    UnknownAbility,
}

impl CastRejection {
    pub fn message(&self) -> &'static str {
        match self {
            CastRejection::UnknownClient => "unknown client",
            CastRejection::UnknownCaster => "caster entity does not exist",
            CastRejection::NotOwner => "client does not own the casting entity",
            CastRejection::UnknownAbility => "no ability registered under that name",
        }
    }
}

impl<T> crate::game::Game<T> {
    /// Validate and (if accepted) execute a `CAST` client message (spec
    /// §6). Returns `Ok(())` on acceptance or `Err(rejection)` with the
    /// human-readable reason the message envelope calls for.
    ///
    /// `owner` is the calling player, already resolved from `client_id` by
    /// the transport layer (connection bookkeeping itself is out of scope,
    /// spec §1).
    pub fn handle_cast(
        &mut self,
        owner: PlayerId,
        caster_id: EntityId,
        ability_name: &str,
        using: Option<UsingRef>,
        granted_by: Option<EntityId>,
        target: Option<EntityId>,
        params: Option<serde_json::Value>,
    ) -> Result<(), CastRejection> {
        let Some(player) = self.players.get(&owner) else {
            return Err(CastRejection::UnknownClient);
        };
        if self.entities.get(&caster_id).is_none() {
            return Err(CastRejection::UnknownCaster);
        }
        if !player.owns(caster_id) {
            return Err(CastRejection::NotOwner);
        }
        let args = crate::ability::CastArgs { using, granted_by, target, params };
        if self.cast(ability_name, caster_id, args) {
            Ok(())
        } else {
            Err(CastRejection::UnknownAbility)
        }
    }
}

//! Media-room token signing
//!
//! The video transport is an external SDK; this service only vouches for who
//! may enter which room, as what. Signing is a pure function of
//! (room code, role, participant id) plus the configured expiry - no state
//! is kept, and the token can be verified by anyone holding the shared
//! secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Header, Validation};
use live_core::{RoomCode, Snowflake};
use serde::{Deserialize, Serialize};

use super::JwtService;
use crate::error::AppError;

/// Role a participant holds inside the media room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomRole {
    /// The hosting influencer: may publish audio/video
    Host,
    /// Audience: may subscribe only
    Viewer,
}

impl RoomRole {
    /// String representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Viewer => "viewer",
        }
    }
}

/// Claims carried inside a signed room token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTokenClaims {
    /// Participant id (viewer id, or user id for the host)
    pub sub: String,
    /// Room code of the session's media room
    pub room: String,
    /// Role granted inside the room
    pub role: RoomRole,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RoomTokenClaims {
    /// Get the participant ID as a Snowflake
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed as a Snowflake
    pub fn participant_id(&self) -> Result<Snowflake, AppError> {
        self.sub
            .parse::<i64>()
            .map(Snowflake::new)
            .map_err(|_| AppError::InvalidToken)
    }
}

/// A signed room token plus its lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomToken {
    pub token: String,
    pub room: String,
    pub role: RoomRole,
    pub expires_in: i64,
}

impl JwtService {
    /// Sign a room token for a participant
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign_room_token(
        &self,
        room: &RoomCode,
        role: RoomRole,
        participant_id: Snowflake,
    ) -> Result<RoomToken, AppError> {
        let now = Utc::now();
        let claims = RoomTokenClaims {
            sub: participant_id.to_string(),
            room: room.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.room_token_expiry)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode room token")))?;

        Ok(RoomToken {
            token,
            room: claims.room,
            role,
            expires_in: self.room_token_expiry,
        })
    }

    /// Decode and validate a room token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_room_token(&self, token: &str) -> Result<RoomTokenClaims, AppError> {
        let token_data = decode::<RoomTokenClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900, 604800, 3600)
    }

    #[test]
    fn test_sign_and_decode_room_token() {
        let service = service();
        let room = RoomCode::generate();
        let viewer_id = Snowflake::new(777);

        let signed = service
            .sign_room_token(&room, RoomRole::Viewer, viewer_id)
            .unwrap();
        assert_eq!(signed.room, room.to_string());
        assert_eq!(signed.expires_in, 3600);

        let claims = service.decode_room_token(&signed.token).unwrap();
        assert_eq!(claims.room, room.to_string());
        assert_eq!(claims.role, RoomRole::Viewer);
        assert_eq!(claims.participant_id().unwrap(), viewer_id);
    }

    #[test]
    fn test_host_role_preserved() {
        let service = service();
        let room = RoomCode::generate();

        let signed = service
            .sign_room_token(&room, RoomRole::Host, Snowflake::new(1))
            .unwrap();
        let claims = service.decode_room_token(&signed.token).unwrap();
        assert_eq!(claims.role, RoomRole::Host);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let other = JwtService::new("a-completely-different-secret-key", 900, 604800, 3600);
        let room = RoomCode::generate();

        let signed = other
            .sign_room_token(&room, RoomRole::Viewer, Snowflake::new(1))
            .unwrap();
        assert!(matches!(
            service.decode_room_token(&signed.token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_access_token_is_not_a_room_token() {
        let service = service();
        let pair = service.generate_token_pair(Snowflake::new(1)).unwrap();

        // Missing room/role claims fails deserialization
        assert!(service.decode_room_token(&pair.access_token).is_err());
    }
}

//! Authentication utilities

mod jwt;
mod password;
mod room_token;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{hash_password, validate_password_strength, verify_password, PasswordService};
pub use room_token::{RoomRole, RoomToken, RoomTokenClaims};

//! Value objects - immutable types that represent domain concepts

mod room_code;
mod snowflake;

pub use room_code::{RoomCode, RoomCodeParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};

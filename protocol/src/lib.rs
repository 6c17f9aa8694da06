//! Wire protocol parsing for the Pokemon Showdown websocket API.
//!
//! The server speaks a line-oriented text protocol: each websocket frame is a
//! chunk of `\n`-separated lines, optionally scoped to a room by a leading
//! `>roomid` line, with `|`-separated fields per line. This crate turns raw
//! chunks into [`RoomEvent`] values and provides the field types
//! ([`Player`], [`PokemonIdent`], [`PokemonDetails`], [`Condition`]) that
//! higher layers use to interpret event arguments, plus the serde model of
//! the `|request|` JSON payload and outgoing command formatting.

use thiserror::Error;

pub mod command;
pub mod event;
pub mod fields;
pub mod request;

pub use command::{ClientCommand, ClientMessage};
pub use event::{parse_chunk, RoomEvent, HALT};
pub use fields::{Condition, Player, PokemonDetails, PokemonIdent, Stat};
pub use request::{ActiveSlot, MoveSlot, Request, RequestPokemon, RequestSide};

/// A protocol field that could not be parsed.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid protocol field: {0:?}")]
    InvalidFormat(String),
}

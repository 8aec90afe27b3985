use serde::{Deserialize, Serialize};

use super::{PacketReader, rules::read_short_string};
use crate::errors::MalformedResponse;

/// One player on the server.
///
/// `id` and `ping` are both present when the record came from a detail
/// query and both absent when it came from a summary query; the two shapes
/// are never mixed within one roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<u8>,
    pub nick: String,
    pub score: u32,
    pub ping: Option<u32>,
}

/// Decodes a `c` roster body: count × (nick, score).
pub(crate) fn decode_summary(body: &[u8]) -> Result<Vec<Player>, MalformedResponse> {
    let mut reader = PacketReader::new(body);

    let count = reader.read_u16()?;
    let mut players = Vec::new();
    for _ in 0..count {
        let nick = read_short_string(&mut reader)?;
        let score = reader.read_u32()?;
        players.push(Player {
            id: None,
            nick,
            score,
            ping: None,
        });
    }
    Ok(players)
}

/// Decodes a `d` roster body: count × (id, nick, score, ping).
pub(crate) fn decode_detail(body: &[u8]) -> Result<Vec<Player>, MalformedResponse> {
    let mut reader = PacketReader::new(body);

    let count = reader.read_u16()?;
    let mut players = Vec::new();
    for _ in 0..count {
        let id = reader.read_u8()?;
        let nick = read_short_string(&mut reader)?;
        let score = reader.read_u32()?;
        let ping = reader.read_u32()?;
        players.push(Player {
            id: Some(id),
            nick,
            score,
            ping: Some(ping),
        });
    }
    Ok(players)
}

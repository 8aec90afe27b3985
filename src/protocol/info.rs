use serde::{Deserialize, Serialize};

use super::PacketReader;
use crate::{errors::MalformedResponse, text::TextCodePage};

/// Common information about a server, replaced wholesale on every
/// successful info query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub has_password: bool,
    pub players_online: u16,
    pub max_players: u16,
    pub hostname: String,
    pub gamemode: String,
    pub language: String,
}

pub(crate) fn decode(
    body: &[u8],
    code_page: TextCodePage,
) -> Result<ServerInfo, MalformedResponse> {
    let mut reader = PacketReader::new(body);

    let has_password = reader.read_bool()?;
    let players_online = reader.read_u16()?;
    let max_players = reader.read_u16()?;
    let hostname = read_long_string(&mut reader, code_page)?;
    let gamemode = read_long_string(&mut reader, code_page)?;
    let language = read_long_string(&mut reader, code_page)?;

    Ok(ServerInfo {
        has_password,
        players_online,
        max_players,
        hostname,
        gamemode,
        language,
    })
}

// unlike everything else in the protocol, the info strings carry a 4-byte
// length prefix
fn read_long_string(
    reader: &mut PacketReader<'_>,
    code_page: TextCodePage,
) -> Result<String, MalformedResponse> {
    let len = reader.read_u32()? as usize;
    Ok(code_page.decode(reader.read_bytes(len)?))
}

#[cfg(test)]
mod test {
    use super::*;

    fn push_string(body: &mut Vec<u8>, bytes: &[u8]) {
        body.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        body.extend_from_slice(bytes);
    }

    fn sample_body() -> Vec<u8> {
        let mut body = vec![1];
        body.extend_from_slice(&32u16.to_le_bytes());
        body.extend_from_slice(&100u16.to_le_bytes());
        push_string(&mut body, b"Grand Larceny");
        push_string(&mut body, b"freeroam");
        // "Русский" in windows-1251
        push_string(&mut body, &[0xD0, 0xF3, 0xF1, 0xF1, 0xEA, 0xE8, 0xE9]);
        body
    }

    #[test]
    fn test_decode() {
        let info = decode(&sample_body(), TextCodePage::default()).unwrap();
        assert_eq!(
            info,
            ServerInfo {
                has_password: true,
                players_online: 32,
                max_players: 100,
                hostname: "Grand Larceny".to_string(),
                gamemode: "freeroam".to_string(),
                language: "Русский".to_string(),
            }
        );
    }

    #[test]
    fn test_lying_string_length() {
        let mut body = vec![0];
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(&0u16.to_le_bytes());
        // claims 200 bytes of hostname but carries 2
        body.extend_from_slice(&200u32.to_le_bytes());
        body.extend_from_slice(b"hi");

        assert_eq!(
            decode(&body, TextCodePage::default()),
            Err(MalformedResponse::UnexpectedEof {
                needed: 200,
                remaining: 2,
            })
        );
    }

    #[test]
    fn test_truncated_header() {
        assert!(decode(&[1, 5], TextCodePage::default()).is_err());
    }
}

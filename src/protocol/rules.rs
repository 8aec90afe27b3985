use std::collections::HashMap;

use super::PacketReader;
use crate::errors::MalformedResponse;

/// Decodes a rule-list body into a name → value map. A rule name appearing
/// twice in one response is a protocol violation.
pub(crate) fn decode(body: &[u8]) -> Result<HashMap<String, String>, MalformedResponse> {
    let mut reader = PacketReader::new(body);

    let count = reader.read_u16()?;
    let mut rules = HashMap::new();
    for _ in 0..count {
        let name = read_short_string(&mut reader)?;
        let value = read_short_string(&mut reader)?;
        if rules.insert(name.clone(), value).is_some() {
            return Err(MalformedResponse::DuplicateRule(name));
        }
    }
    Ok(rules)
}

/// A string with a 1-byte length prefix, as used for rules and nicks.
pub(super) fn read_short_string(
    reader: &mut PacketReader<'_>,
) -> Result<String, MalformedResponse> {
    let len = reader.read_u8()? as usize;
    Ok(String::from_utf8_lossy(reader.read_bytes(len)?).into_owned())
}

#[cfg(test)]
mod test {
    use super::*;

    fn push_rule(body: &mut Vec<u8>, name: &str, value: &str) {
        body.push(name.len() as u8);
        body.extend_from_slice(name.as_bytes());
        body.push(value.len() as u8);
        body.extend_from_slice(value.as_bytes());
    }

    #[test]
    fn test_decode() {
        let mut body = 3u16.to_le_bytes().to_vec();
        push_rule(&mut body, "weather", "10");
        push_rule(&mut body, "worldtime", "12:00");
        push_rule(&mut body, "version", "0.3.7");

        let rules = decode(&body).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules["weather"], "10");
        assert_eq!(rules["worldtime"], "12:00");
        assert_eq!(rules["version"], "0.3.7");
    }

    #[test]
    fn test_empty() {
        let body = 0u16.to_le_bytes().to_vec();
        assert!(decode(&body).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_rule() {
        let mut body = 2u16.to_le_bytes().to_vec();
        push_rule(&mut body, "weather", "10");
        push_rule(&mut body, "weather", "20");

        assert_eq!(
            decode(&body),
            Err(MalformedResponse::DuplicateRule("weather".to_string()))
        );
    }

    #[test]
    fn test_count_exceeds_buffer() {
        // claims 500 rules but the body ends immediately
        let body = 500u16.to_le_bytes().to_vec();
        assert!(matches!(
            decode(&body),
            Err(MalformedResponse::UnexpectedEof { .. })
        ));
    }
}

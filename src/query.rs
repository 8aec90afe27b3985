use std::{
    collections::HashMap,
    net::{Ipv4Addr, SocketAddrV4},
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{
    errors::QueryError,
    net::udp::UdpTransport,
    protocol::{self, MAX_RESPONSE_LEN, QueryType, info, info::ServerInfo, players, players::Player, rules},
    text::TextCodePage,
};

/// Default send/receive timeout, same as the reference client.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// One server the client is talking to.
///
/// The session owns the socket and the last state decoded from the server;
/// each successful query replaces the matching result field wholesale. It is
/// strictly single-threaded: every query blocks until the server answers or
/// the receive timeout elapses. Run separate sessions for separate servers,
/// they share nothing.
#[derive(Debug)]
pub struct QuerySession {
    endpoint: SocketAddrV4,
    // None once the session is closed
    transport: Option<UdpTransport>,
    code_page: TextCodePage,

    info: Option<ServerInfo>,
    rules: HashMap<String, String>,
    players: Vec<Player>,
    ping: Option<Duration>,
}

impl QuerySession {
    /// Parses `addr` as an IPv4 literal and opens a connected UDP socket to
    /// it. Timeouts are in milliseconds, 0 meaning no timeout at all.
    pub fn connect(
        addr: &str,
        port: u16,
        send_timeout_ms: u64,
        recv_timeout_ms: u64,
    ) -> Result<Self, QueryError> {
        let ip: Ipv4Addr = addr
            .parse()
            .map_err(|_| QueryError::AddressParse(addr.to_string()))?;
        let endpoint = SocketAddrV4::new(ip, port);

        let transport = UdpTransport::connect(
            endpoint,
            Duration::from_millis(send_timeout_ms),
            Duration::from_millis(recv_timeout_ms),
        )?;
        debug!("opened query session to {endpoint}");

        Ok(QuerySession {
            endpoint,
            transport: Some(transport),
            code_page: TextCodePage::default(),
            info: None,
            rules: HashMap::new(),
            players: Vec::new(),
            ping: None,
        })
    }

    /// Overrides the code page used for the info text fields.
    pub fn with_code_page(mut self, code_page: TextCodePage) -> Self {
        self.code_page = code_page;
        self
    }

    pub fn endpoint(&self) -> SocketAddrV4 {
        self.endpoint
    }

    /// Info from the last successful [`QueryType::Info`] query.
    pub fn info(&self) -> Option<&ServerInfo> {
        self.info.as_ref()
    }

    /// Rules from the last successful [`QueryType::Rules`] query.
    pub fn rules(&self) -> &HashMap<String, String> {
        &self.rules
    }

    /// Roster from the last successful roster query, in server order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Round-trip time of the last successful query.
    pub fn ping(&self) -> Option<Duration> {
        self.ping
    }

    /// Runs one query and replaces the matching result field and the
    /// round-trip time. If the transport or the decode fails nothing is
    /// committed and the prior state stays visible.
    pub fn query(&mut self, query: QueryType) -> Result<(), QueryError> {
        let transport = self.transport.as_ref().ok_or(QueryError::SessionClosed)?;

        let request = protocol::encode_request(self.endpoint, query);
        transport.send(&request)?;

        let started = Instant::now();
        let mut buf = [0u8; MAX_RESPONSE_LEN];
        let received = transport.recv(&mut buf)?;
        let elapsed = started.elapsed();

        let body = protocol::strip_envelope(&buf[..received])?;
        match query {
            QueryType::Info => self.info = Some(info::decode(body, self.code_page)?),
            QueryType::Rules => self.rules = rules::decode(body)?,
            QueryType::PlayerSummary => self.players = players::decode_summary(body)?,
            QueryType::PlayerDetail => self.players = players::decode_detail(body)?,
        }
        self.ping = Some(elapsed);

        debug!("{query:?} query to {} took {elapsed:?}", self.endpoint);
        Ok(())
    }

    /// Refreshes info, rules and the player roster, strictly in that order.
    /// A failing step aborts the remaining ones.
    ///
    /// The roster shape is picked from the players-online count fetched by
    /// this same call, see [`roster_query_for`].
    pub fn refresh_all(&mut self) -> Result<(), QueryError> {
        self.query(QueryType::Info)?;
        self.query(QueryType::Rules)?;

        let players_online = self.info.as_ref().map_or(0, |info| info.players_online);
        self.query(roster_query_for(players_online))
    }

    /// Closes the socket. Further queries fail with
    /// [`QueryError::SessionClosed`]; calling this more than once is fine.
    /// Dropping the session without calling it releases the socket too.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!("closed query session to {}", self.endpoint);
        }
    }
}

/// Roster shape to use for a given player count. The detail shape carries an
/// 8-bit player id, and the reference server simply stops answering `d`
/// queries once 255 or more players are online, so past that point only the
/// summary shape works.
pub fn roster_query_for(players_online: u16) -> QueryType {
    if players_online >= u16::from(u8::MAX) {
        QueryType::PlayerSummary
    } else {
        QueryType::PlayerDetail
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_roster_policy_boundary() {
        assert_eq!(roster_query_for(0), QueryType::PlayerDetail);
        assert_eq!(roster_query_for(254), QueryType::PlayerDetail);
        assert_eq!(roster_query_for(255), QueryType::PlayerSummary);
        assert_eq!(roster_query_for(1000), QueryType::PlayerSummary);
    }

    #[test]
    fn test_address_parse_rejected() {
        let err = QuerySession::connect("not-an-ip", 7777, 0, 0).unwrap_err();
        assert!(matches!(err, QueryError::AddressParse(_)));

        // IPv6 is not part of the protocol
        let err = QuerySession::connect("::1", 7777, 0, 0).unwrap_err();
        assert!(matches!(err, QueryError::AddressParse(_)));
    }

    #[test]
    fn test_query_after_close() {
        let mut session = QuerySession::connect("127.0.0.1", 7777, 100, 100).unwrap();
        session.close();
        session.close();

        let err = session.query(QueryType::Info).unwrap_err();
        assert!(matches!(err, QueryError::SessionClosed));
        let err = session.refresh_all().unwrap_err();
        assert!(matches!(err, QueryError::SessionClosed));
    }
}

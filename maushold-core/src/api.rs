//! Data-fetch facade over the four backend collaborators.
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::availability::Availability;
use crate::config::ApiConfig;
use crate::endpoints::{CollaboratorPolicy, Endpoint};
use crate::error::ApiError;
use crate::model::{
    Battle, BattleId, LeaderboardEntry, Monster, MonsterId, NewBattle, NewPlayer, NewRosterEntry,
    Player, PlayerId, PlayerMonster, PlayerRanking, Validate,
};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// One method per backend operation.
///
/// Required collaborators surface failures as [`ApiError`]; optional ones
/// (rankings, battle history) report them through [`Availability`].
#[async_trait(?Send)]
pub trait MausholdApi {
    /// # Errors
    ///
    /// Fails when the player service is unreachable or answers badly.
    async fn list_players(&self) -> Result<Vec<Player>, ApiError>;

    /// # Errors
    ///
    /// Fails when the player does not exist or the service is unreachable.
    async fn get_player(&self, id: PlayerId) -> Result<Player, ApiError>;

    /// # Errors
    ///
    /// Fails when the service rejects the username.
    async fn create_player(&self, player: &NewPlayer) -> Result<Player, ApiError>;

    /// # Errors
    ///
    /// Fails when the service answers with a non-success status.
    async fn delete_player(&self, id: PlayerId) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Fails when the catalog is unreachable or answers badly.
    async fn list_monsters(&self) -> Result<Vec<Monster>, ApiError>;

    /// # Errors
    ///
    /// Fails when the species does not exist.
    async fn get_monster(&self, id: MonsterId) -> Result<Monster, ApiError>;

    /// # Errors
    ///
    /// Fails when the player service is unreachable or answers badly.
    async fn list_roster(&self, player: PlayerId) -> Result<Vec<PlayerMonster>, ApiError>;

    /// # Errors
    ///
    /// Fails when the service rejects the new entry.
    async fn add_roster_entry(
        &self,
        player: PlayerId,
        entry: &NewRosterEntry,
    ) -> Result<PlayerMonster, ApiError>;

    /// # Errors
    ///
    /// Fails when the battle service rejects or cannot resolve the battle.
    async fn create_battle(&self, battle: &NewBattle) -> Result<Battle, ApiError>;

    /// # Errors
    ///
    /// Fails when the battle does not exist.
    async fn get_battle(&self, id: BattleId) -> Result<Battle, ApiError>;

    async fn list_battles(&self) -> Availability<Vec<Battle>>;

    async fn list_player_battles(&self, player: PlayerId) -> Availability<Vec<Battle>>;

    async fn leaderboard(&self) -> Availability<Vec<LeaderboardEntry>>;

    async fn player_ranking(&self, player: PlayerId) -> Availability<PlayerRanking>;
}

/// Parse a response body and run boundary validation on it.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] for malformed JSON and [`ApiError::Schema`]
/// when the JSON parses but breaks the schema.
pub fn decode<R>(body: &str) -> Result<R, ApiError>
where
    R: DeserializeOwned + Validate,
{
    let parsed: R = serde_json::from_str(body)?;
    parsed.validate()?;
    Ok(parsed)
}

/// [`MausholdApi`] over any [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpApi<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> HttpApi<T> {
    pub const fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status,
                body: response.body,
            })
        }
    }

    async fn get<R>(&self, endpoint: Endpoint) -> Result<R, ApiError>
    where
        R: DeserializeOwned + Validate,
    {
        let response = self
            .execute(HttpRequest::get(self.config.url(endpoint)))
            .await?;
        decode(&response.body)
    }

    async fn post<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Validate,
    {
        let payload = serde_json::to_string(body)?;
        let response = self
            .execute(HttpRequest::post_json(self.config.url(endpoint), payload))
            .await?;
        decode(&response.body)
    }

    async fn read_optional<R>(&self, endpoint: Endpoint) -> Availability<R>
    where
        R: DeserializeOwned + Validate,
    {
        debug_assert_eq!(endpoint.read_policy(), CollaboratorPolicy::Optional);
        Availability::from_result(self.get(endpoint).await)
    }
}

#[async_trait(?Send)]
impl<T: Transport> MausholdApi for HttpApi<T> {
    async fn list_players(&self) -> Result<Vec<Player>, ApiError> {
        self.get(Endpoint::Players).await
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, ApiError> {
        self.get(Endpoint::Player(id)).await
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<Player, ApiError> {
        self.post(Endpoint::Players, player).await
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), ApiError> {
        self.execute(HttpRequest::delete(self.config.url(Endpoint::Player(id))))
            .await
            .map(|_| ())
    }

    async fn list_monsters(&self) -> Result<Vec<Monster>, ApiError> {
        self.get(Endpoint::Monsters).await
    }

    async fn get_monster(&self, id: MonsterId) -> Result<Monster, ApiError> {
        self.get(Endpoint::Monster(id)).await
    }

    async fn list_roster(&self, player: PlayerId) -> Result<Vec<PlayerMonster>, ApiError> {
        self.get(Endpoint::Roster(player)).await
    }

    async fn add_roster_entry(
        &self,
        player: PlayerId,
        entry: &NewRosterEntry,
    ) -> Result<PlayerMonster, ApiError> {
        self.post(Endpoint::Roster(player), entry).await
    }

    async fn create_battle(&self, battle: &NewBattle) -> Result<Battle, ApiError> {
        self.post(Endpoint::Battles, battle).await
    }

    async fn get_battle(&self, id: BattleId) -> Result<Battle, ApiError> {
        self.get(Endpoint::Battle(id)).await
    }

    async fn list_battles(&self) -> Availability<Vec<Battle>> {
        self.read_optional(Endpoint::Battles).await
    }

    async fn list_player_battles(&self, player: PlayerId) -> Availability<Vec<Battle>> {
        self.read_optional(Endpoint::PlayerBattles(player)).await
    }

    async fn leaderboard(&self) -> Availability<Vec<LeaderboardEntry>> {
        self.read_optional(Endpoint::Rankings).await
    }

    async fn player_ranking(&self, player: PlayerId) -> Availability<PlayerRanking> {
        self.read_optional(Endpoint::PlayerRanking(player)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::model::RosterEntryId;
    use crate::transport::HttpMethod;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        fn fail(self, message: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(TransportError(message.to_string())));
            self
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError(String::from("no scripted reply"))))
        }
    }

    fn api(transport: ScriptedTransport) -> HttpApi<ScriptedTransport> {
        HttpApi::new(transport, ApiConfig::gateway("http://gw"))
    }

    #[test]
    fn list_players_hits_gateway_path() {
        let api = api(ScriptedTransport::default().reply(
            200,
            r#"[{"id":1,"username":"Ash","points":0},{"id":2,"username":"Gary","points":1200}]"#,
        ));
        let players = block_on(api.list_players()).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].points, 1200);
        let sent = api.transport().sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].url, "http://gw/api/players");
    }

    #[test]
    fn create_player_posts_json_body() {
        let api = api(ScriptedTransport::default().reply(201, r#"{"id":5,"username":"Misty"}"#));
        let created = block_on(api.create_player(&NewPlayer::new("Misty").unwrap())).unwrap();
        assert_eq!(created.id, PlayerId(5));
        assert_eq!(created.points, 0);
        let sent = api.transport().sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"username":"Misty"}"#));
    }

    #[test]
    fn non_success_status_carries_body() {
        let api = api(ScriptedTransport::default().reply(400, "Invalid request body"));
        let err = block_on(api.create_battle(&NewBattle {
            player1_id: PlayerId(1),
            player2_id: PlayerId(2),
            monster1_id: RosterEntryId(10),
            monster2_id: RosterEntryId(20),
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, ref body } if body == "Invalid request body"));
    }

    #[test]
    fn schema_violations_are_distinct_from_decode_errors() {
        let api = api(
            ScriptedTransport::default()
                .reply(200, r#"[{"id":1,"username":""}]"#)
                .reply(200, "<html>oops</html>"),
        );
        assert!(matches!(block_on(api.list_players()), Err(ApiError::Schema(_))));
        assert!(matches!(block_on(api.list_players()), Err(ApiError::Decode(_))));
    }

    #[test]
    fn leaderboard_degrades_instead_of_failing() {
        let api = api(
            ScriptedTransport::default()
                .fail("connection refused")
                .reply(503, "down"),
        );
        let first = block_on(api.leaderboard());
        assert!(first.reason().unwrap().contains("connection refused"));
        let second = block_on(api.leaderboard());
        assert!(second.reason().unwrap().contains("503"));
        assert!(second.unwrap_or_default().is_empty());
    }

    #[test]
    fn delete_ignores_response_body() {
        let api = api(ScriptedTransport::default().reply(204, ""));
        block_on(api.delete_player(PlayerId(9))).unwrap();
        let sent = api.transport().sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Delete);
        assert_eq!(sent[0].url, "http://gw/api/players/9");
    }

    #[test]
    fn roster_requests_are_scoped_to_player() {
        let api = api(ScriptedTransport::default().reply(200, "[]"));
        let roster = block_on(api.list_roster(PlayerId(2))).unwrap();
        assert!(roster.is_empty());
        assert_eq!(
            api.transport().sent.borrow()[0].url,
            "http://gw/api/players/2/monster"
        );
    }

    #[test]
    fn battle_lists_keep_unresolved_rows() {
        let body = r#"[
            {"id": 1, "player1_id": 1, "player2_id": 2, "monster1_id": 10, "monster2_id": 20,
             "winner_id": 2, "status": "completed", "points_won": 70, "points_lost": 30},
            {"id": 2, "player1_id": 1, "player2_id": 2, "monster1_id": 10, "monster2_id": 20,
             "winner_id": 0, "status": "in_progress"}
        ]"#;
        let battles = decode::<Vec<crate::model::Battle>>(body).unwrap();
        assert_eq!(battles.len(), 2);
        assert_eq!(battles[1].status, "in_progress");

        let stray_winner = body.replace(r#""winner_id": 0"#, r#""winner_id": 9"#);
        assert!(matches!(
            decode::<Vec<crate::model::Battle>>(&stray_winner),
            Err(ApiError::Schema(_))
        ));
    }
}

//! Endpoint table for the four backend collaborators.
use serde::{Deserialize, Serialize};

use crate::model::{BattleId, MonsterId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    Players,
    Catalog,
    Battles,
    Rankings,
}

/// How a failed call to a collaborator reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorPolicy {
    /// Failures propagate as `ApiError`.
    Required,
    /// Failures become `Availability::Unavailable`.
    Optional,
}

impl Collaborator {
    pub const ALL: [Self; 4] = [Self::Players, Self::Catalog, Self::Battles, Self::Rankings];

    /// Resource root on the service, without any gateway prefix.
    #[must_use]
    pub const fn resource_root(self) -> &'static str {
        match self {
            Self::Players => "/players",
            Self::Catalog => "/monster",
            Self::Battles => "/battles",
            Self::Rankings => "/rankings",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Players => "player service",
            Self::Catalog => "monster catalog",
            Self::Battles => "battle service",
            Self::Rankings => "ranking service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Players,
    Player(PlayerId),
    Roster(PlayerId),
    Monsters,
    Monster(MonsterId),
    Battles,
    Battle(BattleId),
    PlayerBattles(PlayerId),
    Rankings,
    PlayerRanking(PlayerId),
}

impl Endpoint {
    #[must_use]
    pub const fn collaborator(self) -> Collaborator {
        match self {
            Self::Players | Self::Player(_) | Self::Roster(_) => Collaborator::Players,
            Self::Monsters | Self::Monster(_) => Collaborator::Catalog,
            Self::Battles | Self::Battle(_) | Self::PlayerBattles(_) => Collaborator::Battles,
            Self::Rankings | Self::PlayerRanking(_) => Collaborator::Rankings,
        }
    }

    /// Policy applied to `GET` on this endpoint. Writes are always required.
    ///
    /// Battle history reads share the ranking service's optional policy;
    /// battle lookup by id stays required.
    #[must_use]
    pub const fn read_policy(self) -> CollaboratorPolicy {
        match self {
            Self::Rankings | Self::PlayerRanking(_) | Self::Battles | Self::PlayerBattles(_) => {
                CollaboratorPolicy::Optional
            }
            _ => CollaboratorPolicy::Required,
        }
    }

    /// Path relative to the collaborator's root address.
    #[must_use]
    pub fn path(self) -> String {
        let root = self.collaborator().resource_root();
        match self {
            Self::Players | Self::Monsters | Self::Battles | Self::Rankings => root.to_string(),
            Self::Player(id) => format!("{root}/{id}"),
            Self::Roster(id) => format!("{root}/{id}/monster"),
            Self::Monster(id) => format!("{root}/{id}"),
            Self::Battle(id) => format!("{root}/{id}"),
            Self::PlayerBattles(id) | Self::PlayerRanking(id) => format!("{root}/player/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_service_routes() {
        assert_eq!(Endpoint::Players.path(), "/players");
        assert_eq!(Endpoint::Player(PlayerId(4)).path(), "/players/4");
        assert_eq!(Endpoint::Roster(PlayerId(4)).path(), "/players/4/monster");
        assert_eq!(Endpoint::Monsters.path(), "/monster");
        assert_eq!(Endpoint::Monster(MonsterId(25)).path(), "/monster/25");
        assert_eq!(Endpoint::Battle(BattleId(9)).path(), "/battles/9");
        assert_eq!(
            Endpoint::PlayerBattles(PlayerId(4)).path(),
            "/battles/player/4"
        );
        assert_eq!(
            Endpoint::PlayerRanking(PlayerId(4)).path(),
            "/rankings/player/4"
        );
    }

    #[test]
    fn only_history_and_ranking_reads_are_optional() {
        assert_eq!(Endpoint::Rankings.read_policy(), CollaboratorPolicy::Optional);
        assert_eq!(
            Endpoint::PlayerBattles(PlayerId(1)).read_policy(),
            CollaboratorPolicy::Optional
        );
        assert_eq!(Endpoint::Battles.read_policy(), CollaboratorPolicy::Optional);
        assert_eq!(
            Endpoint::Battle(BattleId(1)).read_policy(),
            CollaboratorPolicy::Required
        );
        assert_eq!(Endpoint::Players.read_policy(), CollaboratorPolicy::Required);
        assert_eq!(Endpoint::Monsters.read_policy(), CollaboratorPolicy::Required);
    }
}

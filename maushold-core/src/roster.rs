//! Roster seeding and species lookup.
use crate::model::{Monster, MonsterId, NewRosterEntry, PlayerMonster};

pub const UNKNOWN_SPECIES: &str = "Unknown";

/// New roster entry for `monster`: nickname is the species name, level 1,
/// stats copied from the base stats at this moment.
#[must_use]
pub fn seed_entry(monster: &Monster) -> NewRosterEntry {
    let stats = monster.base_stats();
    NewRosterEntry {
        monster_id: monster.id,
        nickname: monster.name.clone(),
        level: 1,
        hp: stats.hp,
        attack: stats.attack,
        defense: stats.defense,
        speed: stats.speed,
    }
}

#[must_use]
pub fn find_species(catalog: &[Monster], id: Option<MonsterId>) -> Option<&Monster> {
    let id = id?;
    catalog.iter().find(|monster| monster.id == id)
}

/// A roster entry joined with its catalog species for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterRow<'a> {
    pub entry: &'a PlayerMonster,
    pub species: Option<&'a Monster>,
}

impl<'a> RosterRow<'a> {
    #[must_use]
    pub fn resolve(entry: &'a PlayerMonster, catalog: &'a [Monster]) -> Self {
        Self {
            entry,
            species: find_species(catalog, entry.monster_id),
        }
    }

    #[must_use]
    pub fn species_name(&self) -> &'a str {
        self.species.map_or(UNKNOWN_SPECIES, |monster| monster.name.as_str())
    }

    #[must_use]
    pub fn primary_type(&self) -> &'a str {
        self.species.map_or(UNKNOWN_SPECIES, |monster| monster.type1.as_str())
    }

    /// Nickname, or the species name when the nickname is blank.
    #[must_use]
    pub fn display_name(&self) -> &'a str {
        let nickname = self.entry.nickname.trim();
        if nickname.is_empty() {
            self.species_name()
        } else {
            nickname
        }
    }
}

#[must_use]
pub fn resolve_roster<'a>(roster: &'a [PlayerMonster], catalog: &'a [Monster]) -> Vec<RosterRow<'a>> {
    roster
        .iter()
        .map(|entry| RosterRow::resolve(entry, catalog))
        .collect()
}

use super::report_failure;
use crate::dom::spawn;
use crate::app::state::AppState;
use crate::transport::browser_api;
use maushold_core::{MonsterId, add_catalog_monster};
use std::collections::BTreeMap;
use yew::prelude::*;

pub fn build_add_monster(state: &AppState) -> Callback<MonsterId> {
    let state = state.clone();
    Callback::from(move |id: MonsterId| {
        let Some(player) = state.active_player() else {
            return;
        };
        if *state.busy {
            return;
        }
        let Some(monster) = state.portal.monsters.iter().find(|m| m.id == id).cloned() else {
            log::warn!("monster {id} is not in the catalog");
            return;
        };
        let state = state.clone();
        state.busy.set(true);
        spawn(async move {
            match add_catalog_monster(&browser_api(), player, &monster).await {
                Ok(roster) => {
                    let mut vars = BTreeMap::new();
                    vars.insert("name", monster.name.as_str());
                    crate::a11y::set_status(&crate::i18n::tr("profile.added", Some(&vars)));
                    state.roster.set(roster);
                }
                Err(err) => report_failure(&state.alert, "adding a monster", &err),
            }
            state.busy.set(false);
        });
    })
}

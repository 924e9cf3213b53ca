use crate::components::ui::player_list::PlayerList;
use crate::components::ui::roster_grid::RosterGrid;
use crate::i18n::{t, tr};
use maushold_core::{
    BattleSetup, Monster, Player, PlayerId, PlayerMonster, RosterEntryId, RosterLoad,
};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Three-step battle selection: own monster, opponent, opponent's monster.
#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub roster: Vec<PlayerMonster>,
    pub catalog: Vec<Monster>,
    pub opponents: Vec<Player>,
    pub setup: BattleSetup,
    pub on_select_own: Callback<RosterEntryId>,
    pub on_select_opponent: Callback<PlayerId>,
    pub on_select_opponent_monster: Callback<RosterEntryId>,
    pub on_submit: Callback<()>,
}

fn render_opponent_roster(p: &Props) -> Html {
    let locked = p.setup.is_submitting();
    match p.setup.opponent_roster() {
        RosterLoad::Idle => html! {
            <p class="empty-message">{ t("battle.pick_opponent_first") }</p>
        },
        RosterLoad::Failed { reason, .. } => {
            let mut vars = BTreeMap::new();
            vars.insert("reason", reason.as_str());
            html! { <p class="empty-message error">{ tr("battle.opponent_roster_failed", Some(&vars)) }</p> }
        }
        RosterLoad::Loading { .. } | RosterLoad::Loaded { .. } => html! {
            <RosterGrid
                roster={p.setup.visible_opponent_roster().to_vec()}
                catalog={p.catalog.clone()}
                selected={p.setup.opponent_monster()}
                on_select={Some(p.on_select_opponent_monster.clone())}
                disabled={locked}
                loading={p.setup.opponent_roster().is_loading()}
                empty_message={AttrValue::from(t("battle.opponent_no_monsters"))}
            />
        },
    }
}

#[function_component(BattleSetupPanel)]
pub fn battle_setup_panel(p: &Props) -> Html {
    let locked = p.setup.is_submitting();
    let submit = {
        let cb = p.on_submit.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let submit_label = if locked {
        t("battle.submitting")
    } else {
        t("battle.submit")
    };

    html! {
        <section class="battle-setup" aria-busy={locked.to_string()}>
            <div class="card">
                <h3 class="card-title">{ t("battle.step_own") }</h3>
                <RosterGrid
                    roster={p.roster.clone()}
                    catalog={p.catalog.clone()}
                    selected={p.setup.own_monster()}
                    on_select={Some(p.on_select_own.clone())}
                    disabled={locked}
                    empty_message={AttrValue::from(t("battle.no_own_monsters"))}
                />
            </div>
            <div class="card">
                <h3 class="card-title">{ t("battle.step_opponent") }</h3>
                <PlayerList
                    players={p.opponents.clone()}
                    selected={p.setup.opponent()}
                    on_select={p.on_select_opponent.clone()}
                    disabled={locked}
                    empty_message={AttrValue::from(t("battle.no_opponents"))}
                />
            </div>
            <div class="card">
                <h3 class="card-title">{ t("battle.step_opponent_monster") }</h3>
                { render_opponent_roster(p) }
            </div>
            <button
                type="button"
                id="start-battle"
                class="btn-battle"
                disabled={!p.setup.can_submit()}
                onclick={submit}
            >
                { submit_label }
            </button>
        </section>
    }
}

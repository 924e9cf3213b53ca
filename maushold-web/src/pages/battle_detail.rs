use crate::components::ui::battle_log::BattleLogPanel;
use crate::i18n::{fmt_timestamp, t, tr};
use maushold_core::{Battle, BattleId, Player, ViewAction, history_label};
use std::collections::BTreeMap;
use yew::prelude::*;

/// A single battle looked up by id, framed for a spectator.
#[derive(Properties, PartialEq, Clone)]
pub struct BattleDetailPageProps {
    pub id: BattleId,
    /// `None` while loading or when the lookup failed.
    pub battle: Option<Battle>,
    #[prop_or_default]
    pub loading: bool,
    pub players: Vec<Player>,
    pub on_navigate: Callback<ViewAction>,
}

#[function_component(BattleDetailPage)]
pub fn battle_detail_page(p: &BattleDetailPageProps) -> Html {
    let back = {
        let cb = p.on_navigate.clone();
        Callback::from(move |_| cb.emit(ViewAction::OpenHistory))
    };
    let id = p.id.to_string();
    let mut vars = BTreeMap::new();
    vars.insert("id", id.as_str());

    let body = match (&p.battle, p.loading) {
        (Some(battle), _) => {
            let first = history_label(&p.players, battle.player1_id);
            let second = history_label(&p.players, battle.player2_id);
            let when = battle
                .created_at
                .map(|at| fmt_timestamp(&at))
                .unwrap_or_default();
            html! {
                <>
                    <p class="battle-matchup">{ format!("{first} vs {second}") }</p>
                    <p class="battle-date">{ when }</p>
                    <BattleLogPanel battle={battle.clone()} viewer={None} players={p.players.clone()} />
                </>
            }
        }
        (None, true) => html! { <p class="loading" aria-busy="true">{ t("history.detail_loading") }</p> },
        (None, false) => html! { <p class="empty-message">{ tr("history.detail_missing", Some(&vars)) }</p> },
    };

    html! {
        <section class="view battle-detail">
            <div class="header">
                <h2 class="title">{ tr("history.detail_title", Some(&vars)) }</h2>
            </div>
            { body }
            <div class="result-actions">
                <button type="button" class="btn-secondary" onclick={back}>{ t("history.back") }</button>
            </div>
        </section>
    }
}

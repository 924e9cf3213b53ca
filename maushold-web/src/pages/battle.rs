use crate::components::ui::battle_setup_panel::BattleSetupPanel;
use crate::i18n::t;
use maushold_core::{
    BattleSetup, Monster, Player, PlayerId, PlayerMonster, RosterEntryId, ViewAction,
};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BattlePageProps {
    pub roster: Vec<PlayerMonster>,
    pub catalog: Vec<Monster>,
    pub opponents: Vec<Player>,
    pub setup: BattleSetup,
    pub on_select_own: Callback<RosterEntryId>,
    pub on_select_opponent: Callback<PlayerId>,
    pub on_select_opponent_monster: Callback<RosterEntryId>,
    pub on_submit: Callback<()>,
    pub on_navigate: Callback<ViewAction>,
}

#[function_component(BattlePage)]
pub fn battle_page(p: &BattlePageProps) -> Html {
    if p.roster.is_empty() {
        let cb = p.on_navigate.clone();
        let to_profile = Callback::from(move |_| cb.emit(ViewAction::OpenProfile));
        return html! {
            <section class="view battle">
                <h2 class="title">{ t("battle.title") }</h2>
                <div class="card callout" role="note">
                    <p>{ t("battle.need_monster") }</p>
                    <button type="button" class="btn-primary" onclick={to_profile}>
                        { t("home.no_monsters.cta") }
                    </button>
                </div>
            </section>
        };
    }

    html! {
        <section class="view battle" aria-labelledby="battle-title">
            <div class="header">
                <h2 id="battle-title" class="title">{ t("battle.title") }</h2>
                <p class="subtitle">{ t("battle.subtitle") }</p>
            </div>
            <BattleSetupPanel
                roster={p.roster.clone()}
                catalog={p.catalog.clone()}
                opponents={p.opponents.clone()}
                setup={p.setup.clone()}
                on_select_own={p.on_select_own.clone()}
                on_select_opponent={p.on_select_opponent.clone()}
                on_select_opponent_monster={p.on_select_opponent_monster.clone()}
                on_submit={p.on_submit.clone()}
            />
        </section>
    }
}

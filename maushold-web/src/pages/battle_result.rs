use crate::components::ui::battle_log::BattleLogPanel;
use crate::i18n::t;
use maushold_core::{Battle, Player, PlayerId, ViewAction};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BattleResultPageProps {
    pub battle: Battle,
    pub viewer: Option<PlayerId>,
    pub players: Vec<Player>,
    pub on_navigate: Callback<ViewAction>,
}

#[function_component(BattleResultPage)]
pub fn battle_result_page(p: &BattleResultPageProps) -> Html {
    let action = |action: ViewAction| {
        let cb = p.on_navigate.clone();
        Callback::from(move |_| cb.emit(action))
    };
    html! {
        <section class="view">
            <BattleLogPanel battle={p.battle.clone()} viewer={p.viewer} players={p.players.clone()} />
            <div class="result-actions">
                <button type="button" class="btn-secondary" onclick={action(ViewAction::OpenBattle)}>
                    { t("result.battle_again") }
                </button>
                <button type="button" class="btn-primary" onclick={action(ViewAction::OpenProfile)}>
                    { t("result.back_to_profile") }
                </button>
            </div>
        </section>
    }
}

use crate::i18n::{t, tr};
use maushold_core::{Player, PlayerId};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub players: Vec<Player>,
    #[prop_or_default]
    pub selected: Option<PlayerId>,
    pub on_select: Callback<PlayerId>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub loading: bool,
    pub empty_message: AttrValue,
}

fn points_label(points: i32) -> String {
    let points = points.to_string();
    let mut vars = BTreeMap::new();
    vars.insert("points", points.as_str());
    vars.insert("count", points.as_str());
    tr("players.points", Some(&vars))
}

#[function_component(PlayerList)]
pub fn player_list(p: &Props) -> Html {
    if p.loading {
        return html! { <p class="loading" aria-busy="true">{ t("players.loading") }</p> };
    }
    if p.players.is_empty() {
        return html! { <p class="empty-message">{ p.empty_message.clone() }</p> };
    }

    html! {
        <ul class="player-grid" role="listbox" aria-label={t("players.label")}>
            { for p.players.iter().map(|player| {
                let id = player.id;
                let selected = p.selected == Some(id);
                let onclick = {
                    let cb = p.on_select.clone();
                    Callback::from(move |_| cb.emit(id))
                };
                html! {
                    <li role="option" aria-selected={selected.to_string()}>
                        <button
                            type="button"
                            class={classes!("player-card", selected.then_some("selected"))}
                            disabled={p.disabled}
                            data-player-id={id.to_string()}
                            {onclick}
                        >
                            <h4 class="player-name">{ player.username.clone() }</h4>
                            <p class="player-points">{ points_label(player.points) }</p>
                        </button>
                    </li>
                }
            }) }
        </ul>
    }
}

use crate::i18n::{fmt_timestamp, t};
use maushold_core::{Availability, Battle, BattleId, Player, history_label};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HistoryPageProps {
    pub battles: Availability<Vec<Battle>>,
    pub players: Vec<Player>,
    #[prop_or_default]
    pub loading: bool,
    pub on_open: Callback<BattleId>,
    pub on_refresh: Callback<()>,
}

fn render_row(battle: &Battle, players: &[Player], on_open: &Callback<BattleId>) -> Html {
    let id = battle.id;
    let onclick = {
        let cb = on_open.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let when = battle
        .created_at
        .map(|at| fmt_timestamp(&at))
        .unwrap_or_default();
    html! {
        <tr class="history-row" data-battle-id={id.to_string()}>
            <td>
                <span>{ history_label(players, battle.player1_id) }</span>
                <span class="versus">{ " vs " }</span>
                <span>{ history_label(players, battle.player2_id) }</span>
            </td>
            <td>
                <span>{ format!("ID: {}", battle.monster1_id) }</span>
                <span class="versus">{ " / " }</span>
                <span>{ format!("ID: {}", battle.monster2_id) }</span>
            </td>
            <td class="points-cell">
                <span class="tag winner">{ history_label(players, battle.winner_id) }</span>
            </td>
            <td>{ when }</td>
            <td>
                <button type="button" class="btn-link" {onclick}>{ t("history.open") }</button>
            </td>
        </tr>
    }
}

#[function_component(HistoryPage)]
pub fn history_page(p: &HistoryPageProps) -> Html {
    let refresh = {
        let cb = p.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let body = if p.loading {
        html! { <p class="loading" aria-busy="true">{ t("history.loading") }</p> }
    } else {
        match p.battles.value() {
            None => html! { <p class="empty-message unavailable" role="status">{ t("history.unavailable") }</p> },
            Some(battles) if battles.is_empty() => {
                html! { <p class="empty-message">{ t("history.empty") }</p> }
            }
            Some(battles) => html! {
                <table class="leaderboard-table history-table">
                    <thead>
                        <tr>
                            <th scope="col">{ t("history.columns.players") }</th>
                            <th scope="col">{ t("history.columns.monsters") }</th>
                            <th scope="col">{ t("history.columns.winner") }</th>
                            <th scope="col">{ t("history.columns.date") }</th>
                            <th scope="col"><span class="sr-only">{ t("history.open") }</span></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for battles.iter().map(|battle| render_row(battle, &p.players, &p.on_open)) }
                    </tbody>
                </table>
            },
        }
    };

    html! {
        <section class="view history" aria-labelledby="history-title">
            <div class="header">
                <h2 id="history-title" class="title">{ t("history.title") }</h2>
                <p class="subtitle">{ t("history.subtitle") }</p>
            </div>
            <div class="card">
                <div class="card-header">
                    <button type="button" class="btn-secondary" onclick={refresh} disabled={p.loading}>
                        { t("home.refresh") }
                    </button>
                </div>
                { body }
            </div>
        </section>
    }
}

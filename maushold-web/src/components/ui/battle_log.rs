use crate::i18n::{t, tr};
use maushold_core::{Battle, BattleOutcome, Player, PlayerId, winner_label};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Outcome header plus the server's battle log.
#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub battle: Battle,
    /// The player the outcome is framed for; `None` shows the spectator view.
    #[prop_or_default]
    pub viewer: Option<PlayerId>,
    pub players: Vec<Player>,
}

fn render_header(p: &Props, outcome: BattleOutcome) -> Html {
    let (title, points) = match outcome {
        BattleOutcome::Victory { .. } | BattleOutcome::Defeat { .. } => {
            let delta = outcome.points_label().unwrap_or_default();
            let mut vars = BTreeMap::new();
            vars.insert("delta", delta.as_str());
            let title = if outcome.is_victory() {
                t("result.victory")
            } else {
                t("result.defeat")
            };
            (title, tr("result.points", Some(&vars)))
        }
        BattleOutcome::Spectator => {
            let winner = winner_label(&p.battle, &p.players);
            let won = p.battle.points_won.to_string();
            let lost = p.battle.points_lost.to_string();
            let mut vars = BTreeMap::new();
            vars.insert("winner", winner.as_str());
            vars.insert("won", won.as_str());
            vars.insert("lost", lost.as_str());
            (
                tr("result.winner", Some(&vars)),
                tr("result.spectator_points", Some(&vars)),
            )
        }
    };
    html! {
        <div class={classes!("result-header", outcome.css_class())}>
            <h2 class="result-title">{ title }</h2>
            <p class="result-points">{ points }</p>
        </div>
    }
}

#[function_component(BattleLogPanel)]
pub fn battle_log_panel(p: &Props) -> Html {
    let outcome = BattleOutcome::for_viewer(&p.battle, p.viewer);
    html! {
        <section class="battle-result" aria-live="polite">
            { render_header(p, outcome) }
            <div class="card">
                <h3 class="card-title">{ t("result.log_title") }</h3>
                { if p.battle.battle_log.trim().is_empty() {
                    html! { <p class="empty-message">{ t("result.log_empty") }</p> }
                } else {
                    html! { <pre class="battle-log">{ p.battle.battle_log.clone() }</pre> }
                }}
            </div>
        </section>
    }
}

use crate::i18n::t;
use maushold_core::{Availability, LeaderboardEntry, PlayerId, RankSource, RankedRow, rank_rows};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub entries: Availability<Vec<LeaderboardEntry>>,
    #[prop_or_default]
    pub highlight: Option<PlayerId>,
    #[prop_or_default]
    pub rank_source: RankSource,
    /// Show only the first `n` rows (dashboard preview).
    #[prop_or_default]
    pub limit: Option<usize>,
}

fn render_row(row: &RankedRow<'_>, highlight: Option<PlayerId>) -> Html {
    let mine = highlight == Some(row.entry.player_id);
    html! {
        <tr class={classes!(row.medal.map(|medal| medal.css_class()), mine.then_some("current-player"))}>
            <td class="rank" aria-label={format!("#{}", row.rank)}>{ row.rank_label() }</td>
            <td class="username">{ row.entry.username.clone() }</td>
            <td class="points">{ row.entry.total_points }</td>
            <td class="wins">{ row.entry.wins }</td>
            <td class="losses">{ row.entry.losses }</td>
            <td class="win-rate">{ row.win_rate_label() }</td>
        </tr>
    }
}

#[function_component(LeaderboardTable)]
pub fn leaderboard_table(p: &Props) -> Html {
    let Some(entries) = p.entries.value() else {
        return html! {
            <p class="empty-message unavailable" role="status">{ t("leaderboard.unavailable") }</p>
        };
    };
    if entries.is_empty() {
        return html! { <p class="empty-message">{ t("leaderboard.empty") }</p> };
    }
    let shown = p.limit.map_or(entries.as_slice(), |n| &entries[..n.min(entries.len())]);
    let rows = rank_rows(shown, p.rank_source);

    html! {
        <table class="leaderboard-table">
            <thead>
                <tr>
                    <th scope="col">{ t("leaderboard.columns.rank") }</th>
                    <th scope="col">{ t("leaderboard.columns.player") }</th>
                    <th scope="col">{ t("leaderboard.columns.points") }</th>
                    <th scope="col">{ t("leaderboard.columns.wins") }</th>
                    <th scope="col">{ t("leaderboard.columns.losses") }</th>
                    <th scope="col">{ t("leaderboard.columns.win_rate") }</th>
                </tr>
            </thead>
            <tbody>
                { for rows.iter().map(|row| render_row(row, p.highlight)) }
            </tbody>
        </table>
    }
}

use crate::components::ui::leaderboard_table::LeaderboardTable;
use crate::i18n::t;
use maushold_core::{Availability, LeaderboardEntry, PlayerId, RankSource};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LeaderboardPageProps {
    pub entries: Availability<Vec<LeaderboardEntry>>,
    #[prop_or_default]
    pub highlight: Option<PlayerId>,
    #[prop_or_default]
    pub rank_source: RankSource,
    #[prop_or_default]
    pub loading: bool,
    pub on_refresh: Callback<()>,
}

#[function_component(LeaderboardPage)]
pub fn leaderboard_page(p: &LeaderboardPageProps) -> Html {
    let refresh = {
        let cb = p.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="view leaderboard" aria-labelledby="leaderboard-title">
            <div class="header">
                <h2 id="leaderboard-title" class="title">{ t("leaderboard.title") }</h2>
                <p class="subtitle">{ t("leaderboard.subtitle") }</p>
            </div>
            <div class="card">
                <div class="card-header">
                    <button type="button" class="btn-secondary" onclick={refresh} disabled={p.loading}>
                        { t("home.refresh") }
                    </button>
                </div>
                <LeaderboardTable
                    entries={p.entries.clone()}
                    highlight={p.highlight}
                    rank_source={p.rank_source}
                />
            </div>
        </section>
    }
}

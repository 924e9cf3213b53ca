use crate::components::ui::leaderboard_table::LeaderboardTable;
use crate::components::ui::player_list::PlayerList;
use crate::i18n::{fmt_points, t, tr};
use maushold_core::{
    Availability, Battle, LeaderboardEntry, Player, PlayerId, PlayerRanking, ViewAction,
};
use std::collections::BTreeMap;
use yew::prelude::*;

const LEADERBOARD_PREVIEW: usize = 5;

#[derive(Properties, PartialEq, Clone)]
pub struct HomePageProps {
    pub player: Option<Player>,
    pub players: Vec<Player>,
    pub roster_size: usize,
    pub battles: Availability<Vec<Battle>>,
    #[prop_or_default]
    pub ranking: Option<Availability<PlayerRanking>>,
    pub leaderboard: Availability<Vec<LeaderboardEntry>>,
    #[prop_or_default]
    pub loading: bool,
    pub on_navigate: Callback<ViewAction>,
    pub on_select_player: Callback<PlayerId>,
    pub on_refresh: Callback<()>,
}

fn nav_button(label_key: &str, class: &'static str, action: ViewAction, cb: &Callback<ViewAction>) -> Html {
    let cb = cb.clone();
    let onclick = Callback::from(move |_| cb.emit(action));
    html! {
        <button type="button" {class} {onclick}>{ t(label_key) }</button>
    }
}

fn stat_card(icon: &'static str, value: String, label_key: &str) -> Html {
    html! {
        <div class="card stat-card">
            <span class="stat-icon" aria-hidden="true">{ icon }</span>
            <p class="stat-value">{ value }</p>
            <p class="stat-label">{ t(label_key) }</p>
        </div>
    }
}

fn rank_value(ranking: Option<&Availability<PlayerRanking>>) -> String {
    ranking
        .and_then(Availability::value)
        .filter(|ranking| ranking.rank > 0)
        .map_or_else(|| String::from("—"), |ranking| format!("#{}", ranking.rank))
}

fn render_dashboard(p: &HomePageProps, player: &Player) -> Html {
    let mut vars = BTreeMap::new();
    vars.insert("name", player.username.as_str());
    let battle_count = p
        .battles
        .value()
        .map_or_else(|| String::from("—"), |battles| battles.len().to_string());

    html! {
        <section class="view dashboard" aria-labelledby="dashboard-title">
            <div class="header">
                <h2 id="dashboard-title" class="title">{ tr("home.welcome_back", Some(&vars)) }</h2>
                <p class="subtitle">{ t("home.dashboard_subtitle") }</p>
            </div>
            <div class="stat-grid">
                { stat_card("⭐", fmt_points(player.points), "home.stats.points") }
                { stat_card("🎮", p.roster_size.to_string(), "home.stats.monsters") }
                { stat_card("⚔️", battle_count, "home.stats.battles") }
                { stat_card("🏆", rank_value(p.ranking.as_ref()), "home.stats.rank") }
            </div>
            <div class="card">
                <h3 class="card-title">{ t("home.quick_actions") }</h3>
                <div class="button-group">
                    { nav_button("home.manage_monsters", "btn-primary", ViewAction::OpenProfile, &p.on_navigate) }
                    { nav_button("home.start_battle", "btn-battle", ViewAction::OpenBattle, &p.on_navigate) }
                    { nav_button("home.view_leaderboard", "btn-secondary", ViewAction::ViewLeaderboard, &p.on_navigate) }
                </div>
            </div>
            { if p.roster_size == 0 {
                html! {
                    <div class="card callout" role="note">
                        <h3>{ t("home.no_monsters.title") }</h3>
                        <p>{ t("home.no_monsters.body") }</p>
                        { nav_button("home.no_monsters.cta", "btn-primary", ViewAction::OpenProfile, &p.on_navigate) }
                    </div>
                }
            } else {
                html! {}
            }}
            <div class="card">
                <h3 class="card-title">{ t("home.top_players") }</h3>
                <LeaderboardTable
                    entries={p.leaderboard.clone()}
                    highlight={Some(player.id)}
                    limit={Some(LEADERBOARD_PREVIEW)}
                />
            </div>
        </section>
    }
}

fn render_welcome(p: &HomePageProps) -> Html {
    let refresh = {
        let cb = p.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="view" aria-labelledby="welcome-title">
            <div class="header">
                <h2 id="welcome-title" class="title">{ t("home.welcome") }</h2>
                <p class="subtitle">{ t("home.subtitle") }</p>
            </div>
            <div class="card">
                <div class="card-header">
                    <h3 class="card-title">{ t("home.select_player") }</h3>
                    <div class="button-group">
                        { nav_button("home.create_player", "btn-primary", ViewAction::OpenLogin, &p.on_navigate) }
                        <button type="button" class="btn-secondary" onclick={refresh} disabled={p.loading}>
                            { t("home.refresh") }
                        </button>
                    </div>
                </div>
                <PlayerList
                    players={p.players.clone()}
                    on_select={p.on_select_player.clone()}
                    loading={p.loading}
                    empty_message={AttrValue::from(t("home.no_players"))}
                />
            </div>
        </section>
    }
}

#[function_component(HomePage)]
pub fn home_page(p: &HomePageProps) -> Html {
    p.player
        .as_ref()
        .map_or_else(|| render_welcome(p), |player| render_dashboard(p, player))
}

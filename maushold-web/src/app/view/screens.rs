use crate::app::state::AppState;
use crate::app::view::handlers::AppHandlers;
use crate::pages::{
    battle::BattlePage, battle_detail::BattleDetailPage, battle_result::BattleResultPage,
    history::HistoryPage, home::HomePage, leaderboard::LeaderboardPage, login::LoginPage,
    not_found::NotFound, profile::ProfilePage,
};
use crate::router::Route;
use maushold_core::{BattleId, Player, Screen};
use yew::prelude::*;

pub fn render_main_view(state: &AppState, handlers: &AppHandlers, route: Option<&Route>) -> Html {
    let not_found = matches!(route, None | Some(Route::NotFound));
    if not_found {
        return html! { <NotFound on_go_home={handlers.go_home.clone()} /> };
    }

    match state.view.screen() {
        Screen::Login => render_login(state, handlers),
        Screen::Home => render_home(state, handlers),
        Screen::Profile => session_player(state).map_or_else(
            || render_login(state, handlers),
            |player| render_profile(state, handlers, player),
        ),
        Screen::Battle => render_battle(state, handlers),
        Screen::BattleResult => render_result(state, handlers),
        Screen::Leaderboard => html! {
            <LeaderboardPage
                entries={state.portal.leaderboard.clone()}
                highlight={state.active_player()}
                loading={*state.fetching}
                on_refresh={handlers.refresh_portal.clone()}
            />
        },
        Screen::History => html! {
            <HistoryPage
                battles={(*state.history).clone()}
                players={state.portal.players.clone()}
                loading={*state.fetching}
                on_open={handlers.open_battle.clone()}
                on_refresh={handlers.refresh_history.clone()}
            />
        },
        Screen::BattleDetail(id) => render_detail(state, handlers, id),
    }
}

fn session_player(state: &AppState) -> Option<Player> {
    state.session.as_ref().map(|session| session.player.clone())
}

fn render_login(state: &AppState, handlers: &AppHandlers) -> Html {
    html! {
        <LoginPage
            mode={*state.login_mode}
            busy={*state.busy}
            on_submit={handlers.login.clone()}
            on_toggle_mode={handlers.toggle_login_mode.clone()}
        />
    }
}

fn render_home(state: &AppState, handlers: &AppHandlers) -> Html {
    html! {
        <HomePage
            player={session_player(state)}
            players={state.portal.players.clone()}
            roster_size={state.roster.len()}
            battles={(*state.player_battles).clone()}
            ranking={(*state.ranking).clone()}
            leaderboard={state.portal.leaderboard.clone()}
            loading={*state.loading || *state.fetching}
            on_navigate={handlers.navigate.clone()}
            on_select_player={handlers.select_player.clone()}
            on_refresh={handlers.refresh_portal.clone()}
        />
    }
}

fn render_profile(state: &AppState, handlers: &AppHandlers, player: Player) -> Html {
    html! {
        <ProfilePage
            player={player}
            roster={(*state.roster).clone()}
            catalog={state.portal.monsters.clone()}
            busy={*state.busy}
            on_add_monster={handlers.add_monster.clone()}
            on_navigate={handlers.navigate.clone()}
            on_delete_account={handlers.delete_account.clone()}
        />
    }
}

fn render_battle(state: &AppState, handlers: &AppHandlers) -> Html {
    let Some(acting) = state.active_player() else {
        return render_login(state, handlers);
    };
    let opponents: Vec<Player> = state.portal.opponents(acting).cloned().collect();
    html! {
        <BattlePage
            roster={(*state.roster).clone()}
            catalog={state.portal.monsters.clone()}
            opponents={opponents}
            setup={state.setup.setup.clone()}
            on_select_own={handlers.select_own.clone()}
            on_select_opponent={handlers.select_opponent.clone()}
            on_select_opponent_monster={handlers.select_opponent_monster.clone()}
            on_submit={handlers.submit_battle.clone()}
            on_navigate={handlers.navigate.clone()}
        />
    }
}

fn render_result(state: &AppState, handlers: &AppHandlers) -> Html {
    let Some(battle) = state.view.last_battle().cloned() else {
        return render_home(state, handlers);
    };
    html! {
        <BattleResultPage
            battle={battle}
            viewer={state.active_player()}
            players={state.portal.players.clone()}
            on_navigate={handlers.navigate.clone()}
        />
    }
}

fn render_detail(state: &AppState, handlers: &AppHandlers, id: BattleId) -> Html {
    let battle = state.detail.as_ref().filter(|battle| battle.id == id).cloned();
    html! {
        <BattleDetailPage
            id={id}
            battle={battle}
            loading={*state.fetching}
            players={state.portal.players.clone()}
            on_navigate={handlers.navigate.clone()}
        />
    }
}

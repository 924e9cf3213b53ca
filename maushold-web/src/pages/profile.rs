use crate::components::ui::catalog_grid::CatalogGrid;
use crate::components::ui::roster_grid::RosterGrid;
use crate::i18n::{t, tr};
use maushold_core::{Monster, MonsterId, Player, PlayerMonster, ViewAction};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProfilePageProps {
    pub player: Player,
    pub roster: Vec<PlayerMonster>,
    pub catalog: Vec<Monster>,
    #[prop_or_default]
    pub busy: bool,
    pub on_add_monster: Callback<MonsterId>,
    pub on_navigate: Callback<ViewAction>,
    pub on_delete_account: Callback<()>,
}

#[function_component(ProfilePage)]
pub fn profile_page(p: &ProfilePageProps) -> Html {
    let show_catalog = use_state(|| false);

    let toggle_catalog = {
        let show_catalog = show_catalog.clone();
        Callback::from(move |_| show_catalog.set(!*show_catalog))
    };
    let add = {
        let show_catalog = show_catalog.clone();
        let cb = p.on_add_monster.clone();
        Callback::from(move |id: MonsterId| {
            show_catalog.set(false);
            cb.emit(id);
        })
    };
    let battle = {
        let cb = p.on_navigate.clone();
        Callback::from(move |_| cb.emit(ViewAction::OpenBattle))
    };
    let delete = {
        let cb = p.on_delete_account.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let points = p.player.points.to_string();
    let mut point_vars = BTreeMap::new();
    point_vars.insert("points", points.as_str());
    point_vars.insert("count", points.as_str());
    let count = p.roster.len().to_string();
    let mut team_vars = BTreeMap::new();
    team_vars.insert("count", count.as_str());

    html! {
        <section class="view profile" aria-labelledby="profile-name">
            <div class="profile-header">
                <h2 id="profile-name" class="profile-name">{ p.player.username.clone() }</h2>
                <p class="profile-points">{ tr("players.points", Some(&point_vars)) }</p>
            </div>
            <div class="card">
                <div class="card-header">
                    <h3 class="card-title">{ tr("profile.team_title", Some(&team_vars)) }</h3>
                    <div class="button-group">
                        <button type="button" id="add-monster" class="btn-primary" onclick={toggle_catalog} disabled={p.busy}>
                            { t("profile.add_monster") }
                        </button>
                        { if p.roster.is_empty() {
                            html! {}
                        } else {
                            html! {
                                <button type="button" class="btn-battle" onclick={battle}>{ t("profile.battle") }</button>
                            }
                        }}
                    </div>
                </div>
                { if *show_catalog {
                    html! { <CatalogGrid monsters={p.catalog.clone()} on_add={add} busy={p.busy} /> }
                } else {
                    html! {}
                }}
                <RosterGrid
                    roster={p.roster.clone()}
                    catalog={p.catalog.clone()}
                    empty_message={AttrValue::from(t("profile.empty"))}
                />
            </div>
            <div class="card danger-zone">
                <button type="button" class="btn-danger" onclick={delete} disabled={p.busy}>
                    { t("profile.delete_account") }
                </button>
            </div>
        </section>
    }
}

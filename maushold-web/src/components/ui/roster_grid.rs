use crate::i18n::t;
use maushold_core::{Monster, PlayerMonster, RosterEntryId, RosterRow, resolve_roster};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub roster: Vec<PlayerMonster>,
    pub catalog: Vec<Monster>,
    #[prop_or_default]
    pub selected: Option<RosterEntryId>,
    /// Cards become selectable buttons when set.
    #[prop_or_default]
    pub on_select: Option<Callback<RosterEntryId>>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub loading: bool,
    pub empty_message: AttrValue,
}

fn render_stats(entry: &PlayerMonster) -> Html {
    html! {
        <dl class="stats">
            <dt>{ t("stats.hp") }</dt><dd>{ entry.stats.hp }</dd>
            <dt>{ t("stats.attack") }</dt><dd>{ entry.stats.attack }</dd>
            <dt>{ t("stats.defense") }</dt><dd>{ entry.stats.defense }</dd>
            <dt>{ t("stats.speed") }</dt><dd>{ entry.stats.speed }</dd>
            <dt>{ t("stats.level") }</dt><dd>{ entry.level }</dd>
        </dl>
    }
}

fn render_card(row: &RosterRow<'_>, p: &Props) -> Html {
    let id = row.entry.id;
    let body = html! {
        <>
            <h4 class="team-name">{ row.display_name() }</h4>
            <p class="team-species">{ format!("{} ({})", row.species_name(), row.primary_type()) }</p>
            { render_stats(row.entry) }
        </>
    };
    let Some(on_select) = p.on_select.clone() else {
        return html! { <li class="team-card">{ body }</li> };
    };
    let selected = p.selected == Some(id);
    let onclick = Callback::from(move |_| on_select.emit(id));
    html! {
        <li>
            <button
                type="button"
                class={classes!("team-card", selected.then_some("selected"))}
                aria-pressed={selected.to_string()}
                disabled={p.disabled}
                data-entry-id={id.to_string()}
                {onclick}
            >
                { body }
            </button>
        </li>
    }
}

#[function_component(RosterGrid)]
pub fn roster_grid(p: &Props) -> Html {
    if p.loading {
        return html! { <p class="loading" aria-busy="true">{ t("roster.loading") }</p> };
    }
    if p.roster.is_empty() {
        return html! { <p class="empty-message">{ p.empty_message.clone() }</p> };
    }
    let rows = resolve_roster(&p.roster, &p.catalog);
    html! {
        <ul class="team-grid">
            { for rows.iter().map(|row| render_card(row, p)) }
        </ul>
    }
}

use crate::i18n::t;
use maushold_core::{Monster, MonsterId};
use yew::prelude::*;

/// Catalog species; clicking one adds it to the active roster.
#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub monsters: Vec<Monster>,
    pub on_add: Callback<MonsterId>,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(CatalogGrid)]
pub fn catalog_grid(p: &Props) -> Html {
    if p.monsters.is_empty() {
        return html! { <p class="empty-message">{ t("catalog.empty") }</p> };
    }
    html! {
        <section class="add-monster" aria-labelledby="catalog-heading">
            <h4 id="catalog-heading" class="section-title">{ t("catalog.title") }</h4>
            <ul class="monster-grid">
                { for p.monsters.iter().map(|monster| {
                    let id = monster.id;
                    let onclick = {
                        let cb = p.on_add.clone();
                        Callback::from(move |_| cb.emit(id))
                    };
                    html! {
                        <li>
                            <button
                                type="button"
                                class="monster-card"
                                disabled={p.busy}
                                data-monster-id={id.to_string()}
                                {onclick}
                            >
                                <p class="monster-name">{ monster.name.clone() }</p>
                                <p class="monster-type">{ monster.types().join(" / ") }</p>
                                <p class="monster-stats">
                                    { format!(
                                        "HP: {} | ATK: {} | DEF: {} | SPD: {}",
                                        monster.base_hp,
                                        monster.base_attack,
                                        monster.base_defense,
                                        monster.base_speed
                                    ) }
                                </p>
                            </button>
                        </li>
                    }
                }) }
            </ul>
        </section>
    }
}

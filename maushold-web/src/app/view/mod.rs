mod handlers;
mod screens;

pub use handlers::AppHandlers;

use crate::app::state::AppState;
use crate::components::{alert_banner::AlertBanner, footer::Footer, navbar::Navbar};
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Navigator;

pub fn render_app(state: &AppState, route: Option<&Route>, navigator: Option<Navigator>) -> Html {
    let handlers = AppHandlers::new(state, navigator);
    let main_view = screens::render_main_view(state, &handlers, route);
    let player = state.session.as_ref().map(|session| session.player.clone());
    let alert = (*state.alert).clone().map(AttrValue::from);

    html! {
        <>
            <Navbar
                player={player}
                screen={state.view.screen()}
                has_result={state.view.last_battle().is_some()}
                current_lang={(*state.current_language).clone()}
                on_navigate={handlers.navigate.clone()}
                on_logout={handlers.logout.clone()}
                on_lang_change={handlers.lang_change.clone()}
            />
            <AlertBanner message={alert} on_dismiss={handlers.dismiss_alert.clone()} />
            <main id="main" role="main">
                <style>{ crate::a11y::visible_focus_css() }</style>
                <div id="status-live" class="sr-only" aria-live="polite"></div>
                { main_view }
            </main>
            <Footer />
        </>
    }
}

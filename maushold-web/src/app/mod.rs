#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod bootstrap;
pub mod routing;
pub mod screen_data;
pub mod state;
pub mod view;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let app_state = state::use_app_state();
    let navigator = use_navigator();
    let route = use_route::<Route>();

    bootstrap::use_bootstrap(&app_state, route.clone());
    routing::use_sync_screen_with_route(&app_state.view, route.clone());
    routing::use_sync_route_with_screen(
        &app_state.view,
        !*app_state.loading,
        navigator.clone(),
        route.clone(),
    );
    screen_data::use_screen_data(&app_state);

    view::render_app(&app_state, route.as_ref(), navigator)
}

#[cfg(any(target_arch = "wasm32", test))]
use crate::router::Route;
#[cfg(any(target_arch = "wasm32", test))]
use maushold_core::{Screen, ViewState};
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

#[cfg(any(target_arch = "wasm32", test))]
fn next_route_for_screen(screen: Screen, current_route: Option<&Route>) -> Option<Route> {
    let new_route = Route::from_screen(screen);
    if Some(&new_route) == current_route {
        None
    } else {
        Some(new_route)
    }
}

/// View state after following `route`, when the route asks for a different
/// screen the current state allows.
#[cfg(any(target_arch = "wasm32", test))]
fn next_view_for_route(current: &ViewState, route: Option<Route>) -> Option<ViewState> {
    let action = route.and_then(|route| route.to_action())?;
    if action.target() == current.screen() {
        return None;
    }
    let mut next = current.clone();
    match next.apply(action) {
        Ok(_) => Some(next),
        Err(err) => {
            log::debug!("route ignored: {err}");
            None
        }
    }
}

/// Push the route for the current screen once startup has finished.
///
/// Only screen changes trigger a push; route changes are handled by
/// [`use_sync_screen_with_route`].
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_route_with_screen(
    view: &UseStateHandle<ViewState>,
    ready: bool,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    let screen = view.screen();
    use_effect_with((screen, ready), move |(screen, ready)| {
        if !*ready {
            return;
        }
        if let (Some(nav), Some(new_route)) = (
            navigator.as_ref(),
            next_route_for_screen(*screen, active_route.as_ref()),
        ) {
            nav.push(&new_route);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_screen_with_route(view: &UseStateHandle<ViewState>, route: Option<Route>) {
    let view = view.clone();
    use_effect_with(route, move |route| {
        if let Some(next) = next_view_for_route(&view, route.clone()) {
            view.set(next);
        }
    });
}

use yew::prelude::*;

use crate::hooks::use_user_context;
use crate::shared::RouteLink;

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let user = use_user_context();

    html! {
        <nav class="nav-bar">
            <RouteLink to="Home">{ "LoL Data" }</RouteLink>
            <RouteLink to="PlayerList">{ "Players" }</RouteLink>
            <RouteLink to="MatchList">{ "Matches" }</RouteLink>
            <RouteLink to="TeamList">{ "Teams" }</RouteLink>
            <RouteLink to="HeroList">{ "Heroes" }</RouteLink>
            if let Some(user) = user {
                <span class="visitor" title={user.user_id.clone()}>
                    { if user.persistent { "Visitor" } else { "Guest session" } }
                </span>
            }
        </nav>
    }
}

use yew::prelude::*;

use crate::hooks::use_user_context;
use crate::shared::RouteLink;

#[function_component(Home)]
pub fn home() -> Html {
    let user = use_user_context();

    html! {
        <div class="home">
            <h1>{ "LoL Data" }</h1>
            <p>{ "Professional League of Legends statistics." }</p>
            <ul class="sections">
                <li><RouteLink to="PlayerList">{ "Players" }</RouteLink></li>
                <li><RouteLink to="MatchList">{ "Matches" }</RouteLink></li>
                <li><RouteLink to="TeamList">{ "Teams" }</RouteLink></li>
                <li><RouteLink to="HeroList">{ "Heroes" }</RouteLink></li>
            </ul>
            if let Some(user) = user {
                <p class="visitor-id">{ format!("Visitor id: {}", user.user_id) }</p>
            }
        </div>
    }
}

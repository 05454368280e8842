use yew::prelude::*;

use crate::hooks::use_route_params;
use crate::shared::Lookup;

#[function_component(MatchList)]
pub fn match_list() -> Html {
    html! {
        <div class="match-list">
            <h1>{ "Matches" }</h1>
            <Lookup route="MatchDetail" param="match_id" placeholder="Match id" />
        </div>
    }
}

/// Reads its id from the active route rather than from props.
#[function_component(MatchDetail)]
pub fn match_detail() -> Html {
    let params = use_route_params();
    let match_id = params.get("match_id").unwrap_or_default().to_owned();

    html! {
        <div class="match-detail">
            <h1>{ format!("Match {}", match_id) }</h1>
        </div>
    }
}

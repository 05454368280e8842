use yew::prelude::*;

use crate::shared::Lookup;

#[function_component(TeamList)]
pub fn team_list() -> Html {
    html! {
        <div class="team-list">
            <h1>{ "Teams" }</h1>
            <Lookup route="TeamDetail" param="team_name" placeholder="Team name" />
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct TeamDetailProps {
    pub team_name: AttrValue,
}

#[function_component(TeamDetail)]
pub fn team_detail(props: &TeamDetailProps) -> Html {
    html! {
        <div class="team-detail">
            <h1>{ props.team_name.clone() }</h1>
        </div>
    }
}

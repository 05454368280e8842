use yew::prelude::*;

use crate::shared::Lookup;

#[function_component(PlayerList)]
pub fn player_list() -> Html {
    html! {
        <div class="player-list">
            <h1>{ "Players" }</h1>
            <Lookup route="PlayerDetail" param="name" placeholder="Player name" />
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct PlayerDetailProps {
    pub name: AttrValue,
}

#[function_component(PlayerDetail)]
pub fn player_detail(props: &PlayerDetailProps) -> Html {
    html! {
        <div class="player-detail">
            <h1>{ props.name.clone() }</h1>
        </div>
    }
}

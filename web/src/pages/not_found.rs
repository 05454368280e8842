use yew::prelude::*;

use crate::shared::RouteLink;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub path: AttrValue,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    html! {
        <div class="not-found">
            <h1>{ "Not found" }</h1>
            if !props.path.is_empty() {
                <p>{ format!("Nothing lives at {}.", props.path) }</p>
            }
            <RouteLink to="Home">{ "Back home" }</RouteLink>
        </div>
    }
}

use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::AnyRoute;

use app_shell::Params;

use crate::routes::AppRoutes;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    /// Detail route to open.
    pub route: AttrValue,
    /// Parameter the entered text fills.
    pub param: AttrValue,
    pub placeholder: AttrValue,
}

/// Jumps to a detail view by name, e.g. a hero or a team.
#[function_component(Lookup)]
pub fn lookup(props: &Props) -> Html {
    let navigator = use_navigator();
    let routes = use_context::<AppRoutes>();
    let value = use_state(String::new);

    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };

    let onsubmit = {
        let value = value.clone();
        let props = props.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let wanted = value.trim();
            if wanted.is_empty() {
                return;
            }

            let (Some(navigator), Some(routes)) = (&navigator, &routes) else {
                return;
            };

            let params = Params::new().with(&props.param, wanted);
            match routes.href(&props.route, &params) {
                Ok(href) => navigator.push(&AnyRoute::new(href)),
                Err(e) => log::warn!("lookup: {}", e),
            }
        })
    };

    html! {
        <form class="lookup" {onsubmit}>
            <input type="text" placeholder={props.placeholder.clone()} value={(*value).clone()} {oninput} />
            <button type="submit">{ "Go" }</button>
        </form>
    }
}

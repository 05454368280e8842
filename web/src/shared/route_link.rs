use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::AnyRoute;

use app_shell::Params;

use crate::routes::AppRoutes;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    /// Name of the target route.
    pub to: AttrValue,
    #[prop_or_default]
    pub params: Params,
    #[prop_or_default]
    pub children: Children,
}

/// Link to a named route, navigating without a page load.
#[function_component(RouteLink)]
pub fn route_link(props: &Props) -> Html {
    let navigator = use_navigator();
    let routes = use_context::<AppRoutes>();

    let href = match routes.map(|routes| routes.href(&props.to, &props.params)) {
        Some(Ok(href)) => href,
        Some(Err(e)) => {
            log::warn!("route-link: {}", e);
            return html! { <span class="broken-link">{ for props.children.iter() }</span> };
        }
        None => return html! {},
    };

    let onclick = {
        let href = href.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(navigator) = &navigator {
                e.prevent_default();
                navigator.push(&AnyRoute::new(href.clone()));
            }
        })
    };

    html! {
        <a {href} {onclick}>{ for props.children.iter() }</a>
    }
}

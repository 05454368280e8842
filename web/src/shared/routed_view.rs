use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use app_shell::{LoadError, Params, ViewProvider};

use crate::hooks::RouteParams;
use crate::pages::NotFound;
use crate::routes::AppRoutes;
use crate::shared::LoadFailed;

/// Renders the view of the route matching the current location.
#[function_component(RoutedView)]
pub fn routed_view() -> Html {
    let routes = use_context::<AppRoutes>();
    let location = use_location();

    let (Some(routes), Some(location)) = (routes, location) else {
        log::warn!("routed-view: no router");
        return html! {};
    };

    let path = location.path().to_owned();

    let Some(matched) = routes.resolve(&path) else {
        return html! { <NotFound path={path} /> };
    };

    let route = matched.route();
    let params = matched.props().cloned().unwrap_or_default();

    let body = match route.view() {
        ViewProvider::Eager(render) => render(&params),
        ViewProvider::Deferred(_) => html! {
            <LazyView key={path.clone()} name={route.name()} {params} />
        },
    };

    html! {
        <ContextProvider<RouteParams> context={RouteParams(matched.into_params())}>
            { body }
        </ContextProvider<RouteParams>>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct LazyViewProps {
    pub name: AttrValue,
    /// Forwarded route parameters.
    pub params: Params,
}

/// Loads a deferred view, showing progress and a retry on failure.
#[function_component(LazyView)]
pub fn lazy_view(props: &LazyViewProps) -> Html {
    let provider = use_context::<AppRoutes>()
        .and_then(|routes| routes.find(&props.name).map(|route| route.view().clone()));
    let ready = provider.as_ref().and_then(|provider| provider.ready());

    let loading = {
        let name = props.name.to_string();
        use_async_with_options(
            async move {
                match provider {
                    Some(provider) => provider.load().await,
                    None => Err(LoadError::new(name, "not registered")),
                }
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    if let Some(render) = ready.or_else(|| loading.data.clone()) {
        return render(&props.params);
    }

    if let Some(error) = &loading.error {
        let onretry = {
            let loading = loading.clone();
            Callback::from(move |_: MouseEvent| loading.run())
        };

        return html! { <LoadFailed error={error.to_string()} {onretry} /> };
    }

    html! { <div class="loading">{ "Loading..." }</div> }
}

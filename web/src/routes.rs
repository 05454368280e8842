use std::{ops::Deref, rc::Rc};
use yew::prelude::*;

use app_shell::{LoadError, Params, RouteError, RouteSpec, Router, ViewProvider, ROUTE_TABLE};

use crate::pages::*;

/// Renders a view from the parameters forwarded to it.
pub type Render = fn(&Params) -> Html;

pub type AppRouter = Router<Render>;

/// Shared handle on the application's router, handed down through context.
#[derive(Clone)]
pub struct AppRoutes(Rc<AppRouter>);

impl AppRoutes {
    pub fn new(router: AppRouter) -> Self {
        Self(Rc::new(router))
    }
}

impl Deref for AppRoutes {
    type Target = AppRouter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for AppRoutes {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

pub fn build_router() -> Result<AppRouter, RouteError> {
    Router::build(ROUTE_TABLE, bind)
}

fn bind(spec: &RouteSpec) -> ViewProvider<Render> {
    let render = view_for(spec.name);

    if spec.lazy {
        let name = spec.name;
        ViewProvider::deferred(move || load(name, render))
    } else {
        ViewProvider::eager(render)
    }
}

/// Views are compiled into the bundle, so loading only defers the first
/// render to a later turn of the event loop.
async fn load(name: &'static str, render: Render) -> Result<Render, LoadError> {
    gloo_timers::future::TimeoutFuture::new(0).await;
    log::debug!("view:loaded {}", name);
    Ok(render)
}

fn view_for(name: &str) -> Render {
    match name {
        "Home" => home,
        "PlayerList" => player_list,
        "PlayerDetail" => player_detail,
        "MatchList" => match_list,
        "MatchDetail" => match_detail,
        "TeamList" => team_list,
        "TeamDetail" => team_detail,
        "HeroList" => hero_list,
        "HeroDetail" => hero_detail,
        _ => {
            log::warn!("view:unknown {}", name);
            not_found
        }
    }
}

fn param(params: &Params, name: &str) -> AttrValue {
    AttrValue::from(params.get(name).unwrap_or_default().to_owned())
}

fn home(_: &Params) -> Html {
    html! { <Home /> }
}

fn player_list(_: &Params) -> Html {
    html! { <PlayerList /> }
}

fn player_detail(params: &Params) -> Html {
    html! { <PlayerDetail name={param(params, "name")} /> }
}

fn match_list(_: &Params) -> Html {
    html! { <MatchList /> }
}

fn match_detail(_: &Params) -> Html {
    html! { <MatchDetail /> }
}

fn team_list(_: &Params) -> Html {
    html! { <TeamList /> }
}

fn team_detail(params: &Params) -> Html {
    html! { <TeamDetail team_name={param(params, "team_name")} /> }
}

fn hero_list(_: &Params) -> Html {
    html! { <HeroList /> }
}

fn hero_detail(params: &Params) -> Html {
    html! { <HeroDetail hero_name={param(params, "hero_name")} /> }
}

fn not_found(_: &Params) -> Html {
    html! { <NotFound /> }
}

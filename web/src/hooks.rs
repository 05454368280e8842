use yew::prelude::*;

use app_shell::Params;

/// Anonymous identity of this browser profile.
#[derive(Debug, Clone, PartialEq)]
pub struct UserContext {
    pub user_id: AttrValue,
    pub persistent: bool,
}

/// Every parameter of the active route, whether or not it is forwarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams(pub Params);

#[hook]
pub fn use_user_context() -> Option<UserContext> {
    use_context::<UserContext>()
}

#[hook]
pub fn use_route_params() -> Params {
    use_context::<RouteParams>()
        .map(|p| p.0)
        .unwrap_or_default()
}

//! User context provider.

use yew::prelude::*;

use app_shell::UserIdentifier;

use crate::hooks::UserContext;
use crate::services::BrowserStorage;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub children: Children,
}

/// Resolves the anonymous user id once and shares it with the tree.
#[function_component(UserContextProvider)]
pub fn user_context_provider(props: &Props) -> Html {
    let user_ctx = use_state(|| {
        let identifier = UserIdentifier::new(BrowserStorage::local());
        let user_id = identifier.user_id();
        let persistent = identifier.is_persistent();
        log::info!("user-context: {} (persistent: {})", user_id, persistent);
        UserContext {
            user_id: user_id.into(),
            persistent,
        }
    });

    html! {
        <ContextProvider<UserContext> context={(*user_ctx).clone()}>
            { for props.children.iter() }
        </ContextProvider<UserContext>>
    }
}

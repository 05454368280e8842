use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::{build_router, AppRoutes};
use crate::shared::{NavBar, RoutedView, UserContextProvider};

#[function_component(App)]
pub fn app() -> Html {
    let routes = use_memo(|_| build_router().map(AppRoutes::new), ());

    let routes = match &*routes {
        Ok(routes) => routes.clone(),
        Err(e) => {
            log::error!("routes: {}", e);
            return html! { <div class="fatal">{ e.to_string() }</div> };
        }
    };

    html! {
        <BrowserRouter>
            <ContextProvider<AppRoutes> context={routes}>
                <UserContextProvider>
                    <div id="app">
                        <NavBar />
                        <main>
                            <RoutedView />
                        </main>
                    </div>
                </UserContextProvider>
            </ContextProvider<AppRoutes>>
        </BrowserRouter>
    }
}

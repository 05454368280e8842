mod load_failed;
mod lookup;
mod nav_bar;
mod route_link;
mod routed_view;
mod user_context_provider;

pub use load_failed::*;
pub use lookup::*;
pub use nav_bar::*;
pub use route_link::*;
pub use routed_view::*;
pub use user_context_provider::*;

pub mod identity;
pub mod routes;
pub mod views;

pub mod prelude {
    pub use crate::identity::{
        generate_uuid, is_uuid_v4, KeyValueStorage, MemoryStorage, StorageError,
        UnavailableStorage, UserIdentifier, USER_ID_KEY,
    };
    pub use crate::routes::{Matched, Params, Route, RouteError, RouteSpec, Router, ROUTE_TABLE};
    pub use crate::views::{Deferred, LoadError, ViewProvider};
}

pub use prelude::*;

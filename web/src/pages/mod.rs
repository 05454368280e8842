mod heroes;
mod home;
mod matches;
mod not_found;
mod players;
mod teams;

pub use heroes::*;
pub use home::*;
pub use matches::*;
pub use not_found::*;
pub use players::*;
pub use teams::*;

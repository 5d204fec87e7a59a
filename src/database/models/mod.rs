mod actor;
mod movie;

pub use actor::{Actor, ActorDraft};
pub use movie::{Movie, MovieDraft};

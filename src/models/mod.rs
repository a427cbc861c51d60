pub mod caught;
pub mod creature;
pub mod user;

pub use caught::{CaughtCreature, CaughtCreatureDetails};
pub use creature::{normalize_name, CatchRequest, Creature};
pub use user::User;

pub mod category;
pub mod common;
pub mod expense;
pub mod group;
pub mod user;
pub mod wallet;

pub use common::{Displayable, Identifiable, NamedEntity};

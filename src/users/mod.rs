/// User accounts: the record model and the storage seam.

mod memory;
mod model;
mod postgres;
mod store;

pub use memory::InMemoryUserStore;
pub use model::{NewUser, User};
pub use postgres::PgUserStore;
pub use store::UserStore;

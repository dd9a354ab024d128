//! Record types for the shop's entities

mod bill;
mod category;
mod favorite;
mod product;
mod size;
mod user;

pub use bill::Bill;
pub use category::Category;
pub use favorite::Favorite;
pub use product::Product;
pub use size::Size;
pub use user::User;

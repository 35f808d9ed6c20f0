pub mod app_context;
pub mod cell;

pub use app_context::AppContext;
pub use cell::{StateCell, SubscriptionToken};

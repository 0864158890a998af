pub mod principal;
pub mod request;

pub use principal::CurrentUser;
pub use request::{ApiJson, ApiPath};

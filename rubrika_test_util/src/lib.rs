pub mod prelude;
mod response;
pub mod sample_categories;
mod server;
pub use response::*;
pub use server::*;

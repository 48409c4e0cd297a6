pub mod schema;
pub mod rules;

pub use schema::*;
pub use rules::*;

pub mod error;
pub mod schema;
pub mod provider;
pub mod outcome;
pub mod factcheck;
pub mod news;
pub mod encyclopedia;

pub use error::{LookupError, Result};
pub use schema::*;
pub use provider::{http_client, LookupProvider, RESULT_CAP, USER_AGENT};
pub use outcome::{lookup, LookupOutcome};
pub use factcheck::FactCheckClient;
pub use news::NewsClient;
pub use encyclopedia::{strip_highlight, EncyclopediaClient};

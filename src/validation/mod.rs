//! Accumulating validation and the checks that gate a network fetch.

mod request;
mod validated;

pub use request::{
    Capability, FetchError, LoadError, NetworkClient, Page, load_website, validate_client,
    validate_url,
};
pub use validated::Validated;

//! Persistence behind the side-effecting save lens.
//!
//! - [`ByteStore`]: read/write bytes by name ([`FileStore`], [`MemoryStore`])
//! - [`TokenSource`] and [`Clock`]: the parts of a derived save name
//! - [`SaveFileLens`]: an optic from a resource name to its bytes whose write
//!   side saves under a new name

mod naming;
mod save_lens;
mod store;

pub use naming::{Clock, SystemClock, TokenSource, UuidTokens};
pub use save_lens::SaveFileLens;
pub use store::{ByteStore, FileStore, MemoryStore, StoreError};

//! Versioned handles and the pool that hands them out.

#[macro_use]
pub mod handle;
pub mod handle_pool;

pub use self::handle::{Handle, HandleIndex, HandleLike};
pub use self::handle_pool::HandlePool;

pub mod ops;
pub mod search;
pub(crate) mod state;
pub mod util;

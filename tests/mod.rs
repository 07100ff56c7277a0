pub mod common;
pub mod e2e;
pub mod integration;

pub use common::{init, mock::*, test_utils::*};

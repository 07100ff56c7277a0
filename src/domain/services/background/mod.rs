pub mod poller;

pub use poller::{PollOutcome, Poller, PollerStatus};

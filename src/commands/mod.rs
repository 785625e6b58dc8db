pub mod doctor;
pub mod list;
pub mod snapshot;
pub mod watch;

pub use doctor::*;
pub use list::*;
pub use snapshot::*;
pub use watch::*;

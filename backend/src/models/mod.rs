pub mod records;
pub mod snapshot;
pub mod state;
pub mod time;
pub mod window;

pub use records::*;
pub use snapshot::*;
pub use state::*;
pub use time::*;
pub use window::*;

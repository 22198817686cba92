pub mod event;
pub mod hook;
pub mod transcript;

pub use event::{Event, EventMessage, EventUsage};
pub use hook::HookJson;
pub use transcript::Transcript;

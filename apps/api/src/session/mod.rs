// Wizard sessions: step enum and contract data, the navigation state machine,
// the in-memory store, and the session/navigation handlers.

pub mod handlers;
pub mod machine;
pub mod models;
pub mod store;

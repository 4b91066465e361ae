//! Request handling from text to response

pub mod orchestrator;
pub mod request;
pub mod session;

pub use orchestrator::{RenderFailure, RenderService, Stage};
pub use request::{RenderRequest, RenderResponse, RenderResult};
pub use session::RenderSession;

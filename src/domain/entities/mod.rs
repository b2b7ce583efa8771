//! Domain Entities
//!
//! - `CompileRequest` - one save event and the config read for it

mod compile_request;

pub use compile_request::CompileRequest;

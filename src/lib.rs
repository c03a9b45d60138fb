mod ast;
mod emitter;
mod engine;
mod error;
mod eval;
mod interface;
mod log;
mod production;
mod template;

// Public exports.
pub use ast::RuleNode;
pub use emitter::{EmitSettings, emit};
pub use engine::PathweaveEngine;
pub use error::{PathweaveError, PathweaveResult};
pub use eval::{PathFailure, PathRuntime, evaluate};
pub use interface::{Features, PathweaveInterface};
pub use log::{Log, LogMsg, Logger};
pub use production::{emit_production, generate_production};
pub use template::RuleTemplate;

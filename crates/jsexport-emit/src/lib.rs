/*! Turn lowered statements into JavaScript source text.
 *
 * Lowering produces a statement tree; this crate is the last step before a bundler sees the code.
 * The printer keeps the shapes a reader expects from hand-written prototype code: one statement
 * per line, descriptor objects spread over several lines, forwarder bodies indented.
 */

pub mod config;
pub mod emitter;
pub mod js_emitter;

pub use config::{EmitterConfig, IndentStyle, QuoteStyle};
pub use emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
pub use js_emitter::JsEmitter;

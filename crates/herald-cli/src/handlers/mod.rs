//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<u8, CliError>`
//! - The returned `u8` is the process exit code
//! - Thin wrappers that:
//!   1. Resolve CLI-specific input
//!   2. Call herald-runtime
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Resolve paths themselves (use the context)
//! - Signal processes directly
//! - Exit the process

pub mod paths;
pub mod restart;
pub mod start;
pub mod status;
pub mod stop;
pub mod supervise;

//! Building and launching the notification server process.
//!
//! The server is an opaque script run by the Node.js runtime:
//!
//! ```text
//! <nodejs|node> <script> --config=<path> --log=<path> [extra...]
//! ```

mod invocation;
mod runtime;

pub use invocation::{ServerInvocation, ServerSpawner};
pub use runtime::{RUNTIME_CANDIDATES, resolve_runtime_binary};

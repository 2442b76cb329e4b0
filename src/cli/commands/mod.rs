//! One module per subcommand.  Each exposes `execute`.

pub mod completions;
pub mod lock;
pub mod newkey;
pub mod unlock;

mod error;

pub use error::{ErrorKind, ExitCode, LinkError, LinkResult};

pub mod kind;

pub use mathex_error::{Error, ErrorCategory, ErrorKind};

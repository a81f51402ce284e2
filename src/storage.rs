mod needs_json;

pub use needs_json::{LoadError, NeedsFile, parse};

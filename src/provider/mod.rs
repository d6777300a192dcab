pub use self::http::{DataType, HTTP};

mod http;
pub mod snapshot;

mod article;
pub use self::article::{Article, Source};

mod response;
pub use self::response::{NewsResponse, ParseError};

pub mod dictionaries;
pub mod parser;
pub mod translator;

pub use dictionaries::Dictionary;
pub use translator::WordReference;

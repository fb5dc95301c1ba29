pub mod category;
pub mod record;

pub use category::Category;
pub use record::{Exception, Origin, DEFAULT_MAX_MESSAGE_LENGTH};

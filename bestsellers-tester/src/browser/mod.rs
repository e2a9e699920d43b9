pub mod page;
pub mod session;

pub use page::SectionPage;
pub use session::{BrowserConfig, BrowserKind, new_session};

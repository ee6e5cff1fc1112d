pub mod page;
pub mod types;

pub use page::{BulletinPage, FISCAL_MONTHS};
pub use types::{BulletinRecord, COLUMN_NAMES};

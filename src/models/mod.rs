pub mod paper;
pub mod request;
pub mod subject;

pub use paper::{two_digit_year, DocType, PaperQuery, Session};
pub use request::{DownloadRequest, ValidatedRequest};
pub use subject::{Level, SubjectEntry};

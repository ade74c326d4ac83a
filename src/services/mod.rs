pub mod candidate_generator;
pub mod fetch_probe;
pub mod pdf_collector;
pub mod subject_resolver;

pub use candidate_generator::generate_candidates;
pub use fetch_probe::{payload_looks_like_pdf, FetchProbe, ProbeOutcome, RetrievedFile};
pub use pdf_collector::{collect_merged, write_output};
pub use subject_resolver::{SubjectMap, SubjectResolver};

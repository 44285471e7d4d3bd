//! Concrete backends: the WebSoc HTTP feed and the CSV grade store.

pub mod grades_csv;
pub mod websoc;

pub use grades_csv::CsvGradeStore;
pub use websoc::WebSocClient;

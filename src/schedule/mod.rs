//! Schedule query pipeline: validate, translate to the feed vocabulary, and
//! reshape the feed's offerings.

pub mod args;
pub mod normalize;
pub mod offering;
pub mod validate;

pub use args::{Quarter, ScheduleQueryArgs};
pub use normalize::{BackendScheduleQuery, normalize};
pub use offering::{Offering, RawOffering, SectionInfo, assemble};
pub use validate::validate;

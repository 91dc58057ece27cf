//! Record suppliers.
//!
//! A [`RecordSource`] delivers raw records for one category. Live suppliers
//! talk to ferien-api.de and date.nager.at; [`LocalSource`] serves fixtures.

pub mod error;
pub mod factory;
pub mod local;
pub mod raw;
pub mod source;

#[cfg(feature = "http-sources")]
pub mod ferien_api;
#[cfg(feature = "http-sources")]
pub mod http;
#[cfg(feature = "http-sources")]
pub mod nager;

pub use error::{ErrorContext, SourceError, SourceResult};
pub use factory::{SourceFactory, SourcePair};
pub use local::LocalSource;
pub use raw::{decode_entries, RawHoliday, RawRecord, RawVacation};
pub use source::RecordSource;

#[cfg(feature = "http-sources")]
pub use ferien_api::{FerienApiSource, FERIEN_API_BASE};
#[cfg(feature = "http-sources")]
pub use nager::{NagerDateSource, NAGER_API_BASE};

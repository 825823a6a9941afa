pub mod filter;
pub mod session;

pub use filter::{apply_filter, CountryFilter, YearRange};
pub use session::{FileIdentity, SessionCache};

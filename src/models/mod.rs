pub mod observation;
pub mod table;

pub use observation::Observation;
pub use table::ObservationTable;

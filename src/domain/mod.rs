// Domain layer: fact model, language table and the ports the engine depends on.

pub mod language;
pub mod model;
pub mod ports;

pub use language::Language;
pub use model::{FactRecord, FetchOutcome};
pub use ports::{ConfigProvider, FactSource, Storage};

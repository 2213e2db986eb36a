mod delivery;
mod payload;
mod snapshot;

pub use delivery::DeliveryError;
pub use payload::PayloadError;
pub use snapshot::SnapshotError;

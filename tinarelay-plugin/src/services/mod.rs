pub mod delivery_service;
pub mod event_service;
pub mod measurement;
pub mod message_format;
pub mod snapshot_service;
pub mod timer_service;

pub use delivery_service::{Delivery, DeliveryService};
pub use event_service::EventService;
pub use snapshot_service::{Snapshot, SnapshotService, SnapshotSource};
pub use timer_service::RepeatedTimer;

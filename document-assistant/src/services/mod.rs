pub mod backend_client;
pub mod metrics;

pub use self::backend_client::{BackendClient, DocumentBackend};
pub use self::metrics::{get_metrics, init_metrics};

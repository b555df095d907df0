pub mod error;
pub mod pacing;
pub mod prober;
pub mod result;
#[cfg(any(test, feature = "stub"))]
pub mod stub;
pub mod transport;

pub use error::ScanError;
pub use pacing::RequestPacing;
pub use prober::Prober;
pub use result::ProbeResult;
#[cfg(any(test, feature = "stub"))]
pub use stub::{StubResponse, StubTransport};
pub use transport::{ClientSettings, HttpTransport, Transport, TransportResponse};

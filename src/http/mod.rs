//! 传输层：HttpTransport 抽象与实现（reqwest / Mock）

pub mod mock;
pub mod reqwest_transport;
pub mod traits;

pub use mock::{MockReply, MockTransport};
pub use reqwest_transport::ReqwestTransport;
pub use traits::{ApiRequest, ApiResponse, HttpTransport, TransportError};

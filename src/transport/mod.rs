mod http_transport;
mod upstream_url;

pub use http_transport::{HttpTransport, UpstreamReply};
pub use upstream_url::{build_upstream_url, redacted_url};

pub mod dispatch;

pub use dispatch::{build_router, normalize_base_path};

mod types;
pub use types::{VisionConfig, DEFAULT_ENDPOINT};

mod batch_analyze;
pub use batch_analyze::{strip_data_url_prefix, VisionClient};

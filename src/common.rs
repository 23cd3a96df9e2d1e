// Default URLs
pub static DEFAULT_LIVE_PAYMENT_URL: &str = "https://heidelpay.hpcgw.net/ngw/post";
pub static DEFAULT_SANDBOX_PAYMENT_URL: &str = "https://test-heidelpay.hpcgw.net/ngw/post";

// Constant request parameters
pub static REQUEST_VERSION: &str = "1.0";
pub static FRONTEND_MODE: &str = "WHITELABEL";
pub static SDK_NAME: &str = env!("CARGO_PKG_NAME");
pub static SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

// Processing values returned by the gateway
pub static PROCESSING_RESULT_ACK: &str = "ACK";
pub static PROCESSING_STATUS_CODE_WAITING: &str = "80";
pub static PROCESSING_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

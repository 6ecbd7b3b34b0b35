pub mod fade;
pub mod logging;
pub mod protocol;
pub mod proxy;
pub mod settings;

pub use fade::*;
pub use protocol::*;
pub use proxy::start_proxy;

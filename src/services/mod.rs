pub mod api_client;
pub mod geolocation;
pub mod notification_poller;
pub mod session_store;
pub mod traits;

pub use api_client::ApiClient;
pub use geolocation::BrowserGeolocation;
pub use notification_poller::NotificationPoller;
pub use session_store::SessionStore;
pub use traits::*;

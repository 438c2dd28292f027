//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod device_api;
pub mod download;
pub mod prompt;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use device_api::DeviceApi;
pub use download::Downloader;
pub use prompt::UserPrompt;
pub use view::DashboardView;

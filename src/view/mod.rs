pub mod debounce;
pub mod mode;
pub mod state;
pub mod url;

pub use debounce::Debouncer;
pub use mode::{ViewMode, ViewModeStore, VIEW_MODE_KEY};
pub use state::{Reaction, ViewEvent, ViewState};
pub use url::UrlState;

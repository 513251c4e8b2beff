//! Display configuration derived from the settings store.

mod display;
mod overrides;

pub use display::DisplayConfig;
pub use overrides::DisplayOverrides;

//! Configuration resolution.
//!
//! Turns a sparse, user-authored tree into a complete configuration:
//! 1. **Normalize** - expand shorthand (`transition: "fade"`, `middleware: "auth"`)
//! 2. **Paths** - make `rootDir`, `srcDir`, `buildDir` and `modulesDir` absolute
//! 3. **Probe** - enable features whose conventional files exist on disk
//! 4. **Mode** - apply the `universal`, `spa` or `static` preset
//! 5. **Defaults** - fill everything still unset from the default tree
//!
//! ## Merge Strategy
//! - User values always win; presets and defaults only fill gaps
//! - Objects merge recursively, arrays and scalars are replaced as a whole
//! - `null` counts as unset
//!
//! ## Environment Variables
//! - `NODE_ENV` - `production` makes `dev` default to false

pub mod defaults;
mod loader;
mod merge;
mod modes;
mod normalize;
mod resolver;
mod style;
mod types;

pub use defaults::default_tree;
pub use loader::ConfigFormat;
pub use merge::{fill_defaults, merge_defaults};
pub use modes::{Mode, ModeSelector};
pub use normalize::{ROUTER_BASE_SPECIFIED, normalize};
pub use resolver::{ENV_VAR, Resolver, resolve};
pub use style::{StylePipeline, find_config};
pub use types::{RawConfig, RenderSsr, ResolvedConfig};

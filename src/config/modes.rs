//! Rendering modes and their preset overlays.

use serde_json::{Value, json};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Mutually exclusive rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Server-rendered on every request, hydrated on the client.
    Universal,
    /// Client-only single-page application.
    Spa,
    /// Pre-rendered to static files at generate time.
    Static,
}

impl Mode {
    /// Look up a mode by name. `"single-page"` is accepted as an alias of `"spa"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "universal" => Some(Mode::Universal),
            "spa" | "single-page" => Some(Mode::Spa),
            "static" => Some(Mode::Static),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Universal => "universal",
            Mode::Spa => "spa",
            Mode::Static => "static",
        }
    }

    /// The partial overlay for this mode.
    pub fn preset(self) -> &'static Value {
        match self {
            Mode::Universal => &UNIVERSAL,
            Mode::Spa => &SPA,
            Mode::Static => &STATIC,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static UNIVERSAL: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "build": { "ssr": true },
        "render": { "ssr": true }
    })
});

static SPA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "build": { "ssr": false },
        "render": { "ssr": false }
    })
});

static STATIC: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "build": { "ssr": true },
        "render": { "ssr": "static" }
    })
});

static NO_PRESET: LazyLock<Value> = LazyLock::new(|| json!({}));

/// Overlay used when the mode is missing, malformed or unknown.
pub fn empty_preset() -> &'static Value {
    &NO_PRESET
}

/// Chooses the mode, either up front or when resolution starts.
#[derive(Clone)]
pub enum ModeSelector {
    Fixed(Mode),
    /// Called once, at the start of each resolution.
    Deferred(Arc<dyn Fn() -> Mode + Send + Sync>),
}

impl ModeSelector {
    pub fn deferred<F>(select: F) -> Self
    where
        F: Fn() -> Mode + Send + Sync + 'static,
    {
        ModeSelector::Deferred(Arc::new(select))
    }

    pub fn select(&self) -> Mode {
        match self {
            ModeSelector::Fixed(mode) => *mode,
            ModeSelector::Deferred(select) => select(),
        }
    }
}

impl fmt::Debug for ModeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeSelector::Fixed(mode) => f.debug_tuple("Fixed").field(mode).finish(),
            ModeSelector::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Mode> for ModeSelector {
    fn from(mode: Mode) -> Self {
        ModeSelector::Fixed(mode)
    }
}

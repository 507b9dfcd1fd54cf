use serde::{Deserialize, Serialize};

/// Window width used by the variable-base engines unless configured.
pub const DEFAULT_WINDOW: u32 = 4;

/// Narrowest window any engine accepts.
pub const MIN_WINDOW: u32 = 1;

/// Widest window any engine builds tables for. A width-`w` table holds up to
/// `2^w` points per window.
pub const MAX_WINDOW: u32 = 16;

/// Narrowest window the signed-digit engines accept.
pub const MIN_SIGNED_WINDOW: u32 = 2;

/// Options shared by the scalar multiplication engines.
///
/// `w` is public and may arrive through deserialisation, so the engines read
/// it through [`MulConfig::window`] and [`MulConfig::signed_window`], which
/// clamp it into the supported range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MulConfig {
    /// Window width in bits.
    pub w: u32,
    /// Normalise precomputed tables to `z = 1` with one batch inversion.
    pub normalize: bool,
}

impl Default for MulConfig {
    fn default() -> Self {
        MulConfig {
            w: DEFAULT_WINDOW,
            normalize: false,
        }
    }
}

impl MulConfig {
    /// Config with window `w`, clamped to `MIN_WINDOW..=MAX_WINDOW`.
    pub fn with_window(w: u32) -> Self {
        MulConfig {
            w: w.clamp(MIN_WINDOW, MAX_WINDOW),
            ..Self::default()
        }
    }

    pub fn normalized(self) -> Self {
        MulConfig {
            normalize: true,
            ..self
        }
    }

    /// Window width for the unsigned chunk engines.
    #[inline]
    pub fn window(&self) -> u32 {
        self.w.clamp(MIN_WINDOW, MAX_WINDOW)
    }

    /// Window width for the wNAF and offset engines.
    #[inline]
    pub fn signed_window(&self) -> u32 {
        self.w.clamp(MIN_SIGNED_WINDOW, MAX_WINDOW)
    }
}

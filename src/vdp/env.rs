use super::Vdp;

/// Cached env-var flag: returns `true` when the env var is set (`.is_ok()`).
macro_rules! env_bool {
    ($name:ident, $var:expr) => {
        #[inline]
        pub(crate) fn $name() -> bool {
            use std::sync::OnceLock;
            static V: OnceLock<bool> = OnceLock::new();
            *V.get_or_init(|| std::env::var($var).is_ok())
        }
    };
}

/// Cached env-var parsed as `Option<u64>` (decimal).
macro_rules! env_option_u64 {
    ($name:ident, $var:expr) => {
        pub(crate) fn $name() -> Option<u64> {
            use std::sync::OnceLock;
            static V: OnceLock<Option<u64>> = OnceLock::new();
            *V.get_or_init(|| {
                std::env::var($var)
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
            })
        }
    };
}

impl Vdp {
    // Deterministic power-on VRAM fill, for reproducing host runs.
    env_option_u64!(env_vram_seed, "TMS_VRAM_SEED");
    // Debug: render the background layers even while the display-enable
    // bit is clear, to tell a blanked screen from a broken table setup.
    env_bool!(env_force_display, "TMS_FORCE_DISPLAY");
}

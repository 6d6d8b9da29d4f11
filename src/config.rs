use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose cart logging while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const TOAST_DURATION_MS: u32 = 2_500;
pub const TICKER_INTERVAL_MS: u32 = 4_500;
pub const TICKER_FADE_MS: u32 = 300; // Matches the CSS opacity transition
pub const SCROLL_SPY_DEBOUNCE_MS: u32 = 100;
pub const ITEM_HIGHLIGHT_MS: u32 = 500;
pub const PLAN_FADE_MS: u32 = 300; // Matches fadeOutPlan

pub const HEADER_SHADOW_THRESHOLD: i32 = 10;
pub const SCROLL_LINK_PADDING: i32 = 15;
pub const SCROLL_SPY_OFFSET: i32 = 50;

pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_THRESHOLD: f64 = 0.1;

pub const MAX_ITEM_QUANTITY: u32 = 99;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_fade_fits_inside_interval() {
        assert!(TICKER_FADE_MS < TICKER_INTERVAL_MS);
    }

    #[test]
    fn log_level_matches_build_profile() {
        if cfg!(debug_assertions) {
            assert_eq!(log_level(), Level::Debug);
        } else {
            assert_eq!(log_level(), Level::Info);
        }
    }
}

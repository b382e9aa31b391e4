//! `Date.now()` clock for staleness windows in the browser.

use std::time::Duration;

use strapi::clock::Clock;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> Duration {
        #[cfg(feature = "hydrate")]
        {
            let millis = js_sys::Date::now();
            if millis.is_finite() && millis > 0.0 {
                return Duration::from_secs_f64(millis / 1000.0);
            }
            Duration::ZERO
        }
        #[cfg(not(feature = "hydrate"))]
        {
            strapi::clock::SystemClock.now()
        }
    }
}

//! Status LED driver.

use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Timer;
use joystick_core::LedPattern;

use crate::status::StatusLink;

/// Show the current USB status on `led` forever.
pub async fn drive_led(mut led: Output<'static>, link: &'static StatusLink) -> ! {
    let mut pattern = link.status().led_pattern();
    loop {
        match pattern {
            LedPattern::Off => {
                led.set_low();
                pattern = link.changed().await.led_pattern();
            }
            LedPattern::Solid => {
                led.set_high();
                pattern = link.changed().await.led_pattern();
            }
            LedPattern::Blink { period_ms } => {
                led.toggle();
                let delay = Timer::after_millis(u64::from(period_ms));
                if let Either::First(status) = select(link.changed(), delay).await {
                    pattern = status.led_pattern();
                }
            }
        }
    }
}

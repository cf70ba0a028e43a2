//! Thin hardware access layer
//!
//! Digital pins go through the GPIO character device, I2C through the Linux
//! i2c-dev interface, and analog / PWM / onboard LEDs through their sysfs
//! attribute files. Each handle is opened from a [`crate::board::Board`] which
//! supplies chip paths and the shield pin offset.

pub mod aio;
pub mod gpio;
pub mod i2c;
pub mod leds;
pub mod pwm;

pub use aio::Aio;
pub use gpio::Gpio;
pub use i2c::I2c;
pub use leds::OnboardLed;
pub use pwm::Pwm;

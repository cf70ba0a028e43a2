//! Grove peripheral wrappers
//!
//! One file per peripheral the samples use. Wrappers hold a hal handle and
//! expose readings in sensible units; raw-to-unit conversions are free
//! functions so they can be unit tested without hardware.

pub mod accel;
pub mod button;
pub mod buzzer;
pub mod compass;
pub mod distance;
pub mod gps;
pub mod lcd;
pub mod led;
pub mod ledbar;
pub mod light;
pub mod microphone;
pub mod moisture;
pub mod motors;
pub mod reflective;
pub mod relay;
pub mod rotary;
pub mod stepper;
pub mod temperature;
pub mod touch;
pub mod uv;
pub mod vdiv;

pub use accel::Accelerometer;
pub use button::Button;
pub use buzzer::Buzzer;
pub use compass::Compass;
pub use distance::DistanceInterrupter;
pub use gps::Gps;
pub use lcd::Lcd;
pub use led::Led;
pub use ledbar::LedBar;
pub use light::LightSensor;
pub use microphone::Microphone;
pub use moisture::MoistureSensor;
pub use motors::{MotorDirection, MotorDriver};
pub use reflective::ReflectiveSensor;
pub use relay::Relay;
pub use rotary::RotaryAngle;
pub use stepper::{Stepper, StepDirection};
pub use temperature::TempSensor;
pub use touch::TouchSensor;
pub use uv::UvSensor;
pub use vdiv::VoltageDivider;

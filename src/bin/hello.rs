//! Print the library version, the detected platform, and the effective
//! board configuration. The traditional first sample to run on new hardware.

use grovekit::board;

fn main() {
    grovekit::init_tracing();

    let platform = board::detect_platform();
    println!("hello grovekit {}", env!("CARGO_PKG_VERSION"));
    println!("platform: {}", platform.label());

    let config = grovekit::config::BoardConfig::load(platform);
    println!("gpio chip:  {}", config.gpio_chip);
    println!("i2c bus:    /dev/i2c-{}", config.i2c_bus);
    println!("aio device: iio:device{}", config.aio_device);
    println!("pwm chip:   pwmchip{}", config.pwm_chip);
    println!("pin offset: {}", config.pin_offset);
}

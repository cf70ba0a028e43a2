//! PWM output over the sysfs pwmchip interface

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::board::Board;
use crate::error::{Error, Result};

/// One PWM channel, parameterized by period and duty cycle.
///
/// The channel is exported on open and left configured on drop, the same as
/// the original samples which never tore PWM down on exit.
pub struct Pwm {
    dir: PathBuf,
    period_ns: u64,
}

impl Pwm {
    /// Export and open channel `channel` of the board's PWM controller.
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        let chip = board.config().pwm_chip;
        let base = PathBuf::from(format!("/sys/class/pwm/pwmchip{}", chip));
        let dir = base.join(format!("pwm{}", channel));

        if !dir.exists() {
            let export = base.join("export");
            match fs::write(&export, channel.to_string()) {
                Ok(()) => {}
                // Already exported by someone else is fine
                Err(e) if e.kind() == ErrorKind::ResourceBusy => {}
                Err(e) => return Err(Error::sysfs(export, e)),
            }
        }

        let pwm = Self {
            dir,
            period_ns: 1_000_000, // 1 ms, the samples' default pulse width period
        };
        pwm.write_attr("period", pwm.period_ns.to_string())?;
        Ok(pwm)
    }

    /// Enable or disable the output.
    pub fn enable(&self, on: bool) -> Result<()> {
        self.write_attr("enable", if on { "1" } else { "0" }.to_string())
    }

    /// Set the pulse width period in milliseconds.
    pub fn set_period_ms(&mut self, ms: u64) -> Result<()> {
        self.set_period_ns(ms * 1_000_000)
    }

    /// Set the pulse width period in microseconds.
    pub fn set_period_us(&mut self, us: u64) -> Result<()> {
        self.set_period_ns(us * 1_000)
    }

    fn set_period_ns(&mut self, ns: u64) -> Result<()> {
        // The kernel rejects a period shorter than the active duty cycle,
        // so zero the duty cycle first when shrinking.
        if ns < self.period_ns {
            self.write_attr("duty_cycle", "0".to_string())?;
        }
        self.write_attr("period", ns.to_string())?;
        self.period_ns = ns;
        Ok(())
    }

    /// Write a duty cycle in [0.0, 1.0]; out-of-range values are clamped.
    pub fn write(&self, duty: f64) -> Result<()> {
        let duty_ns = duty_to_ns(duty, self.period_ns);
        self.write_attr("duty_cycle", duty_ns.to_string())
    }

    fn write_attr(&self, attr: &str, value: String) -> Result<()> {
        let path = self.dir.join(attr);
        fs::write(&path, value).map_err(|e| Error::sysfs(path, e))
    }
}

/// Convert a [0,1] duty fraction into nanoseconds of the period, clamping.
pub fn duty_to_ns(duty: f64, period_ns: u64) -> u64 {
    let duty = duty.clamp(0.0, 1.0);
    (duty * period_ns as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_clamps() {
        assert_eq!(duty_to_ns(-0.5, 1_000_000), 0);
        assert_eq!(duty_to_ns(0.0, 1_000_000), 0);
        assert_eq!(duty_to_ns(0.5, 1_000_000), 500_000);
        assert_eq!(duty_to_ns(1.0, 1_000_000), 1_000_000);
        assert_eq!(duty_to_ns(1.5, 1_000_000), 1_000_000);
    }
}

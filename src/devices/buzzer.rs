//! Grove buzzer driven from a PWM channel

use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::Pwm;

/// Note periods in microseconds.
pub mod notes {
    pub const DO: u64 = 3830;
    pub const RE: u64 = 3400;
    pub const MI: u64 = 3038;
    pub const FA: u64 = 2864;
    pub const SOL: u64 = 2550;
    pub const LA: u64 = 2272;
    pub const SI: u64 = 2028;
}

pub struct Buzzer {
    pwm: Pwm,
}

impl Buzzer {
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        let pwm = Pwm::open(board, channel)?;
        pwm.enable(true)?;
        Ok(Self { pwm })
    }

    /// Sound a note (period in microseconds) for `duration`.
    pub async fn play(&mut self, note_period_us: u64, duration: Duration) -> Result<()> {
        self.pwm.set_period_us(note_period_us)?;
        self.pwm.write(0.5)?;
        tokio::time::sleep(duration).await;
        self.stop()
    }

    pub fn stop(&mut self) -> Result<()> {
        self.pwm.write(0.0)
    }
}

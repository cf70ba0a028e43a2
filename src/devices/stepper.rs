//! ULN200XA-driven unipolar stepper motor (four digital lines)

use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Clockwise,
    CounterClockwise,
}

// Half-step excitation sequence, alternating one and two energized coils
const SEQUENCE: [[u8; 4]; 8] = [
    [1, 0, 0, 0],
    [1, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 1, 0],
    [0, 0, 1, 0],
    [0, 0, 1, 1],
    [0, 0, 0, 1],
    [1, 0, 0, 1],
];

pub struct Stepper {
    coils: [Gpio; 4],
    steps_per_rev: u32,
    step_delay: Duration,
    direction: StepDirection,
    sequence_index: usize,
}

impl Stepper {
    pub fn open(board: &Board, steps_per_rev: u32, pins: [u32; 4]) -> Result<Self> {
        let [p1, p2, p3, p4] = pins;
        Ok(Self {
            coils: [
                Gpio::output(board, p1)?,
                Gpio::output(board, p2)?,
                Gpio::output(board, p3)?,
                Gpio::output(board, p4)?,
            ],
            steps_per_rev,
            step_delay: step_delay(steps_per_rev, 5),
            direction: StepDirection::Clockwise,
            sequence_index: 0,
        })
    }

    pub fn steps_per_rev(&self) -> u32 {
        self.steps_per_rev
    }

    /// Set rotation speed in revolutions per minute.
    pub fn set_speed(&mut self, rpm: u32) {
        self.step_delay = step_delay(self.steps_per_rev, rpm);
    }

    pub fn set_direction(&mut self, direction: StepDirection) {
        self.direction = direction;
    }

    /// Advance `count` steps in the current direction, blocking between
    /// steps at the configured speed.
    pub async fn step(&mut self, count: u32) -> Result<()> {
        for _ in 0..count {
            self.sequence_index = match self.direction {
                StepDirection::Clockwise => (self.sequence_index + 1) % SEQUENCE.len(),
                StepDirection::CounterClockwise => {
                    (self.sequence_index + SEQUENCE.len() - 1) % SEQUENCE.len()
                }
            };
            let phase = SEQUENCE[self.sequence_index];
            for (coil, level) in self.coils.iter().zip(phase) {
                coil.write(level)?;
            }
            tokio::time::sleep(self.step_delay).await;
        }
        Ok(())
    }

    /// De-energize all coils.
    pub fn release(&self) -> Result<()> {
        for coil in &self.coils {
            coil.write(0)?;
        }
        Ok(())
    }
}

/// Per-step delay for a target speed.
fn step_delay(steps_per_rev: u32, rpm: u32) -> Duration {
    let steps_per_rev = steps_per_rev.max(1);
    let rpm = rpm.max(1);
    Duration::from_micros(60_000_000 / (steps_per_rev as u64 * rpm as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_delay() {
        // 4096 steps/rev at 5 rpm: one revolution per 12s
        let d = step_delay(4096, 5);
        assert_eq!(d.as_micros() as u64, 60_000_000 / (4096 * 5));
        // Zero rpm or zero steps/rev does not divide by zero
        assert!(step_delay(4096, 0) > Duration::ZERO);
        assert!(step_delay(0, 5) > Duration::ZERO);
    }

    #[test]
    fn test_half_step_sequence() {
        assert_eq!(SEQUENCE.len(), 8);
        for (i, phase) in SEQUENCE.iter().enumerate() {
            let energized: u8 = phase.iter().sum();
            // Half-stepping alternates single-coil and two-coil phases
            assert_eq!(energized, 1 + (i as u8 % 2));
            // Consecutive phases keep one coil in common, so the rotor
            // never loses holding torque mid-transition
            let next = SEQUENCE[(i + 1) % SEQUENCE.len()];
            let overlap = phase.iter().zip(next).filter(|(a, b)| **a == 1 && *b == 1).count();
            assert_eq!(overlap, 1);
        }
    }
}

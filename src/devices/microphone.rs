//! Grove sound sensor (electret microphone on an analog pin)

use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::Aio;

pub struct Microphone {
    pin: Aio,
}

impl Microphone {
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        Ok(Self {
            pin: Aio::open(board, channel)?,
        })
    }

    /// Capture `count` samples, one every `interval`.
    pub async fn sampled_window(&self, interval: Duration, count: usize) -> Result<Vec<u16>> {
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(self.pin.read()?);
            tokio::time::sleep(interval).await;
        }
        Ok(samples)
    }
}

/// Mean of a sample window, zero for an empty one.
pub fn average(samples: &[u16]) -> u16 {
    if samples.is_empty() {
        return 0;
    }
    let sum: u64 = samples.iter().map(|&s| s as u64).sum();
    (sum / samples.len() as u64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0);
        assert_eq!(average(&[10]), 10);
        assert_eq!(average(&[10, 20, 30]), 20);
    }
}

/// Brightness change between two consecutive fade publishes.
pub const FADE_STEP: u8 = 2;

/// Evenly stepped brightness values from `from` (exclusive) to `to` (inclusive).
///
/// The last step is clamped to `to`, so the sequence never overshoots.
#[derive(Debug, Clone)]
pub struct FadeRamp {
    current: u8,
    target: u8,
}

impl FadeRamp {
    pub fn new(from: u8, to: u8) -> Self {
        Self {
            current: from,
            target: to,
        }
    }
}

impl Iterator for FadeRamp {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.current == self.target {
            return None;
        }
        self.current = if self.current < self.target {
            self.current.saturating_add(FADE_STEP).min(self.target)
        } else {
            self.current.saturating_sub(FADE_STEP).max(self.target)
        };
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let distance = self.current.abs_diff(self.target) as usize;
        let remaining = distance.div_ceil(FADE_STEP as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FadeRamp {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_up() {
        let steps: Vec<u8> = FadeRamp::new(10, 100).collect();
        let expected: Vec<u8> = (12..=100).step_by(2).collect();
        assert_eq!(steps.len(), 45);
        assert_eq!(steps, expected);
    }

    #[test]
    fn test_fade_down_clamps() {
        let steps: Vec<u8> = FadeRamp::new(3, 0).collect();
        assert_eq!(steps, vec![1, 0]);
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(FadeRamp::new(40, 40).count(), 0);
    }

    #[test]
    fn test_every_pair_of_values() {
        for from in 0..=100u8 {
            for to in 0..=100u8 {
                let ramp = FadeRamp::new(from, to);
                let expected_len = (from.abs_diff(to) as usize).div_ceil(2);
                assert_eq!(ramp.len(), expected_len, "{from} -> {to}");

                let steps: Vec<u8> = ramp.collect();
                assert_eq!(steps.len(), expected_len, "{from} -> {to}");
                if from != to {
                    assert_eq!(steps.last(), Some(&to), "{from} -> {to}");
                }

                let mut previous = from;
                for value in steps {
                    if from < to {
                        assert!(value > previous && value <= to, "{from} -> {to}");
                    } else {
                        assert!(value < previous && value >= to, "{from} -> {to}");
                    }
                    previous = value;
                }
            }
        }
    }

}

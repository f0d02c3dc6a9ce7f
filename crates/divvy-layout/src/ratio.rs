// ABOUTME: Split ratio as a clamped percentage and the flex weights it produces.
// ABOUTME: The two sides of a split always share exactly 100 weight units.

/// Percentage of a container's extent given to the first region.
///
/// Always within `0.0..=100.0`; construction clamps out-of-range input and
/// maps NaN to zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ratio(f32);

impl Ratio {
    pub const MIN: Ratio = Ratio(0.0);
    pub const MAX: Ratio = Ratio(100.0);
    pub const HALF: Ratio = Ratio(50.0);

    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self::MIN;
        }
        Self(percent.clamp(0.0, 100.0))
    }

    pub fn percent(&self) -> f32 {
        self.0
    }

    /// Percentage left for the second region
    pub fn complement(&self) -> f32 {
        100.0 - self.0
    }

    /// Ratio as a 0.0..=1.0 fraction
    pub fn fraction(&self) -> f32 {
        self.0 / 100.0
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::HALF
    }
}

/// Which child of a split a region is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

/// Proportional flex weights of the two regions of a split
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionWeights {
    pub first: f32,
    pub second: f32,
}

impl RegionWeights {
    pub fn get(&self, side: Side) -> f32 {
        match side {
            Side::First => self.first,
            Side::Second => self.second,
        }
    }

    pub fn total(&self) -> f32 {
        self.first + self.second
    }
}

impl From<Ratio> for RegionWeights {
    fn from(ratio: Ratio) -> Self {
        Self {
            first: ratio.percent(),
            second: ratio.complement(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_range() {
        assert_eq!(Ratio::new(-20.0), Ratio::MIN);
        assert_eq!(Ratio::new(140.0), Ratio::MAX);
        assert_eq!(Ratio::new(f32::NAN), Ratio::MIN);
        assert_eq!(Ratio::new(f32::INFINITY), Ratio::MAX);
        assert_eq!(Ratio::new(37.5).percent(), 37.5);
    }

    #[test]
    fn default_is_even_split() {
        assert_eq!(Ratio::default().percent(), 50.0);
    }

    #[test]
    fn weights_always_sum_to_hundred() {
        for step in -10..=110 {
            let weights = RegionWeights::from(Ratio::new(step as f32 * 1.37));
            assert!((weights.total() - 100.0).abs() < 1e-4);
            assert!(weights.first >= 0.0 && weights.second >= 0.0);
        }
    }

    #[test]
    fn weights_follow_sides() {
        let weights = RegionWeights::from(Ratio::new(20.0));
        assert_eq!(weights.get(Side::First), 20.0);
        assert_eq!(weights.get(Side::Second), 80.0);
    }
}

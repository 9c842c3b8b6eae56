//! Coupon frequencies and rate compounding.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tenor::{Tenor, TenorUnit};

/// How often a fixed leg or bond pays.
///
/// Configuration files may use either the variant name or the short form
/// (`"annual"`, `"semiannual"`, `"quarterly"`, `"monthly"`, `"once"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Frequency {
    /// Once a year.
    #[serde(alias = "annual")]
    Annual,
    /// Twice a year.
    #[default]
    #[serde(alias = "semiannual")]
    SemiAnnual,
    /// Four times a year.
    #[serde(alias = "quarterly")]
    Quarterly,
    /// Every month.
    #[serde(alias = "monthly")]
    Monthly,
    /// Everything paid at maturity.
    #[serde(alias = "once")]
    Zero,
}

impl Frequency {
    /// Payments per year; zero for a single payment.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self.months_per_period() {
            0 => 0,
            months => 12 / months,
        }
    }

    /// Length of one period in months; zero for a single payment.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        match self {
            Self::Annual => 12,
            Self::SemiAnnual => 6,
            Self::Quarterly => 3,
            Self::Monthly => 1,
            Self::Zero => 0,
        }
    }

    /// The period as a tenor, `None` for a single payment.
    #[must_use]
    pub fn period(&self) -> Option<Tenor> {
        match self.months_per_period() {
            0 => None,
            12 => Some(Tenor::new(1, TenorUnit::Years)),
            months => Some(Tenor::new(months, TenorUnit::Months)),
        }
    }

    /// True for a single payment at maturity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::Zero
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period() {
            Some(tenor) => write!(f, "every {tenor}"),
            None => f.write_str("at maturity"),
        }
    }
}

/// How an interest rate turns into a growth factor over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Compounding {
    /// `1 + r·t`
    Simple,
    /// `(1 + r)^t`
    #[default]
    Annual,
    /// `(1 + r/2)^(2t)`
    SemiAnnual,
    /// `(1 + r/4)^(4t)`
    Quarterly,
    /// `(1 + r/12)^(12t)`
    Monthly,
    /// `e^(r·t)`
    Continuous,
}

impl Compounding {
    /// Compounding periods per year; `None` for simple and continuous.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Self::Annual => Some(1),
            Self::SemiAnnual => Some(2),
            Self::Quarterly => Some(4),
            Self::Monthly => Some(12),
            Self::Simple | Self::Continuous => None,
        }
    }

    /// True for `e^(r·t)`.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        *self == Self::Continuous
    }

    /// True for `1 + r·t`.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        *self == Self::Simple
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.periods_per_year() {
            Some(1) => f.write_str("annual"),
            Some(n) => write!(f, "{n}x per year"),
            None if self.is_simple() => f.write_str("simple"),
            None => f.write_str("continuous"),
        }
    }
}

/// Yield compounding matching a coupon frequency.
///
/// A single-payment bond compounds annually.
impl From<Frequency> for Compounding {
    fn from(frequency: Frequency) -> Self {
        match frequency {
            Frequency::SemiAnnual => Self::SemiAnnual,
            Frequency::Quarterly => Self::Quarterly,
            Frequency::Monthly => Self::Monthly,
            Frequency::Annual | Frequency::Zero => Self::Annual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_and_months_agree() {
        for frequency in [
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ] {
            assert_eq!(frequency.periods_per_year() * frequency.months_per_period(), 12);
            assert_eq!(
                Compounding::from(frequency).periods_per_year(),
                Some(frequency.periods_per_year())
            );
        }
        assert_eq!(Frequency::Zero.periods_per_year(), 0);
        assert_eq!(Compounding::from(Frequency::Zero), Compounding::Annual);
    }

    #[test]
    fn test_period_tenor() {
        assert_eq!(Frequency::Annual.period(), Some(Tenor::new(1, TenorUnit::Years)));
        assert_eq!(Frequency::Quarterly.period(), Some(Tenor::new(3, TenorUnit::Months)));
        assert_eq!(Frequency::Zero.period(), None);
    }

    #[test]
    fn test_short_names_deserialize() {
        let parsed: Vec<Frequency> =
            serde_json::from_str(r#"["semiannual", "Quarterly", "once"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![Frequency::SemiAnnual, Frequency::Quarterly, Frequency::Zero]
        );
    }

    #[test]
    fn test_simple_and_continuous_have_no_periods() {
        assert!(Compounding::Simple.is_simple());
        assert!(Compounding::Continuous.is_continuous());
        assert_eq!(Compounding::Simple.periods_per_year(), None);
        assert_eq!(Compounding::Continuous.to_string(), "continuous");
        assert_eq!(Compounding::SemiAnnual.to_string(), "2x per year");
    }
}

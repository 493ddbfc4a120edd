use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::cost::CostValue;
use crate::error::CoreError;

/// Comparison operator of a constraint predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal to the threshold.
    Le,
    /// Greater than or equal to the threshold.
    Ge,
    /// Equal to the threshold.
    Eq,
}

impl ConstraintOp {
    fn tag(&self) -> &'static str {
        match self {
            ConstraintOp::Le => "le",
            ConstraintOp::Ge => "ge",
            ConstraintOp::Eq => "eq",
        }
    }
}

/// A post-lookup filter predicate on cost values.
///
/// Parsed from the wire form `"<op> <threshold>"`, e.g. `"le 10"`. Multiple
/// constraints on one query are conjunctive: an entry must satisfy all of
/// them to be returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub op: ConstraintOp,
    pub threshold: f64,
}

impl Constraint {
    pub fn new(op: ConstraintOp, threshold: f64) -> Self {
        Self { op, threshold }
    }

    /// Evaluate this predicate against a cost value.
    ///
    /// Numerical values use exact real-number comparison. Ordinal ranks use
    /// integer comparison: the threshold is tightened to the nearest integral
    /// bound (`le 2.5` means rank <= 2, `ge 2.5` means rank >= 3), and
    /// equality against a non-integral threshold never holds.
    pub fn matches(&self, value: &CostValue) -> bool {
        match *value {
            CostValue::Numerical(v) => match self.op {
                ConstraintOp::Le => v <= self.threshold,
                ConstraintOp::Ge => v >= self.threshold,
                ConstraintOp::Eq => v == self.threshold,
            },
            CostValue::Ordinal(rank) => match self.op {
                ConstraintOp::Le => {
                    self.threshold >= 0.0 && rank <= self.threshold.floor() as u64
                }
                ConstraintOp::Ge => {
                    self.threshold <= 0.0 || rank >= self.threshold.ceil() as u64
                }
                ConstraintOp::Eq => {
                    self.threshold.fract() == 0.0
                        && self.threshold >= 1.0
                        && rank == self.threshold as u64
                }
            },
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.tag(), self.threshold)
    }
}

impl FromStr for Constraint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, threshold) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| CoreError::InvalidConstraint(s.to_string()))?;
        let op = match op {
            "le" => ConstraintOp::Le,
            "ge" => ConstraintOp::Ge,
            "eq" => ConstraintOp::Eq,
            _ => return Err(CoreError::InvalidConstraint(s.to_string())),
        };
        let threshold: f64 = threshold
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidConstraint(s.to_string()))?;
        if !threshold.is_finite() {
            return Err(CoreError::InvalidConstraint(s.to_string()));
        }
        Ok(Self { op, threshold })
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

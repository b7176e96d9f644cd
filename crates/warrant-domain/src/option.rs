//! Candidate solutions and their eight-axis scores

use crate::claim::ClaimId;
use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a candidate option (e.g. `O1`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Create an option id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OptionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Whether an option is built in-house or bought from a third party
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Built and run in-house
    Internal,

    /// Product, vendor or service from outside
    #[default]
    External,
}

impl OptionKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Internal => "internal",
            OptionKind::External => "external",
        }
    }
}

/// Highest score on any axis
pub const MAX_AXIS_SCORE: u8 = 5;

/// Scores on the eight decision axes, 0 (worst) to 5 (best)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreVector {
    /// Tolerance to faults
    pub robustness: u8,
    /// Exposure to attack
    pub security: u8,
    /// Ease of understanding
    pub simplicity: u8,
    /// Cheapness
    pub cost: u8,
    /// Throughput and latency
    pub performance: u8,
    /// Speed of delivery
    pub time_to_ship: u8,
    /// Ease of running in production
    pub operability: u8,
    /// Headroom for growth
    pub scalability: u8,
}

impl ScoreVector {
    /// Axis names in record order
    pub const AXES: [&'static str; 8] = [
        "robustness",
        "security",
        "simplicity",
        "cost",
        "performance",
        "time_to_ship",
        "operability",
        "scalability",
    ];

    /// Build a vector from axis values in [`ScoreVector::AXES`] order
    pub fn from_array(values: [u8; 8]) -> Self {
        let [
            robustness,
            security,
            simplicity,
            cost,
            performance,
            time_to_ship,
            operability,
            scalability,
        ] = values;
        Self {
            robustness,
            security,
            simplicity,
            cost,
            performance,
            time_to_ship,
            operability,
            scalability,
        }
    }

    /// Axis values in [`ScoreVector::AXES`] order
    pub fn to_array(&self) -> [u8; 8] {
        [
            self.robustness,
            self.security,
            self.simplicity,
            self.cost,
            self.performance,
            self.time_to_ship,
            self.operability,
            self.scalability,
        ]
    }

    /// (axis, score) pairs in record order
    pub fn axes(&self) -> impl Iterator<Item = (&'static str, u8)> {
        Self::AXES.into_iter().zip(self.to_array())
    }

    /// Sum of all axes
    pub fn total(&self) -> u32 {
        self.to_array().iter().map(|v| u32::from(*v)).sum()
    }

    /// Mutable access to an axis by name
    pub fn axis_mut(&mut self, axis: &str) -> Option<&mut u8> {
        match axis {
            "robustness" => Some(&mut self.robustness),
            "security" => Some(&mut self.security),
            "simplicity" => Some(&mut self.simplicity),
            "cost" => Some(&mut self.cost),
            "performance" => Some(&mut self.performance),
            "time_to_ship" => Some(&mut self.time_to_ship),
            "operability" => Some(&mut self.operability),
            "scalability" => Some(&mut self.scalability),
            _ => None,
        }
    }

    /// Shift an axis by `delta`, clamped to 0–5
    pub fn adjust(&mut self, axis: &str, delta: i8) {
        if let Some(value) = self.axis_mut(axis) {
            let shifted = (*value as i16 + delta as i16).clamp(0, MAX_AXIS_SCORE as i16);
            *value = shifted as u8;
        }
    }

    /// The first axis over [`MAX_AXIS_SCORE`], if any
    pub fn out_of_range(&self) -> Option<(&'static str, u8)> {
        self.axes().find(|(_, v)| *v > MAX_AXIS_SCORE)
    }

    /// Strongest `n` axes, highest first; ties keep record order
    pub fn strongest(&self, n: usize) -> Vec<&'static str> {
        let mut axes: Vec<_> = self.axes().collect();
        axes.sort_by(|a, b| b.1.cmp(&a.1));
        axes.into_iter().take(n).map(|(name, _)| name).collect()
    }

    /// Weakest `n` axes, lowest first; ties keep record order
    pub fn weakest(&self, n: usize) -> Vec<&'static str> {
        let mut axes: Vec<_> = self.axes().collect();
        axes.sort_by(|a, b| a.1.cmp(&b.1));
        axes.into_iter().take(n).map(|(name, _)| name).collect()
    }
}

/// A candidate solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionOption {
    /// Identifier
    pub id: OptionId,

    /// Short name
    pub name: String,

    /// What the option entails
    #[serde(default)]
    pub description: String,

    /// In-house or third party
    #[serde(default)]
    pub kind: OptionKind,

    /// Eight-axis score
    #[serde(default)]
    pub scores: ScoreVector,

    /// Axes the option is strongest on
    #[serde(default)]
    pub advantages: Vec<String>,

    /// Axes the option is weakest on
    #[serde(default)]
    pub disadvantages: Vec<String>,

    /// Claim recording the option's score, set when the option is scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_claim: Option<ClaimId>,
}

impl SolutionOption {
    /// Create an option; every axis must be within 0–5
    pub fn new(
        id: impl Into<OptionId>,
        name: impl Into<String>,
        kind: OptionKind,
        scores: ScoreVector,
    ) -> Result<Self> {
        let option = Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            scores,
            advantages: Vec::new(),
            disadvantages: Vec::new(),
            score_claim: None,
        };
        option.validate()?;
        Ok(option)
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the score range
    pub fn validate(&self) -> Result<()> {
        match self.scores.out_of_range() {
            Some((axis, value)) => Err(DomainError::ScoreOutOfRange {
                option: self.id.to_string(),
                axis,
                value,
            }),
            None => Ok(()),
        }
    }

    /// Derive advantages and disadvantages from the score vector
    pub fn derive_tradeoffs(&mut self) {
        if self.advantages.is_empty() {
            self.advantages = self.scores.strongest(2).into_iter().map(String::from).collect();
        }
        if self.disadvantages.is_empty() {
            self.disadvantages = self.scores.weakest(2).into_iter().map(String::from).collect();
        }
    }

    /// Total score
    pub fn total(&self) -> u32 {
        self.scores.total()
    }

    /// Whether the option comes from outside
    pub fn is_external(&self) -> bool {
        self.kind == OptionKind::External
    }
}

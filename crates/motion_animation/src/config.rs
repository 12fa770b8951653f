//! Sequence descriptions
//!
//! A sequence can be described declaratively and loaded from TOML:
//!
//! ```toml
//! duration_ms = 300
//! easing = "fast_out_slow_in"
//!
//! [[stages]]
//! name = "fade_out"
//! from = 1.0
//! to = 0.0
//!
//! [[stages]]
//! name = "fade_in"
//! weight = 2.0
//! from = 0.0
//! to = 1.0
//! ```

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::Result;
use crate::sequence::SequentialSet;
use crate::timeline::Tween;

/// A declarative sequential set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Total duration; stages stay unspecified when absent
    #[serde(default)]
    pub duration_ms: Option<u32>,
    /// Total curve; stages stay linear when absent
    #[serde(default)]
    pub easing: Option<Easing>,
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

/// One stage of a [`SequenceConfig`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    pub from: f32,
    pub to: f32,
}

fn default_weight() -> f32 {
    1.0
}

/// A tween tagged with the name of the stage it came from
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTween {
    pub name: String,
    pub tween: Tween,
}

impl Borrow<Tween> for NamedTween {
    fn borrow(&self) -> &Tween {
        &self.tween
    }
}

impl SequenceConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build the described set, validating weights and curve slices
    pub fn build(&self) -> Result<SequentialSet<NamedTween>> {
        let mut set = SequentialSet::new();
        set.set_duration(self.duration_ms);
        if let Some(easing) = self.easing {
            set.set_interpolator(Some(easing.shared()))?;
        }
        for stage in &self.stages {
            set.add_weighted(
                NamedTween {
                    name: stage.name.clone(),
                    tween: Tween::new(stage.from, stage.to),
                },
                stage.weight,
            )?;
        }
        tracing::debug!(stages = set.len(), "built sequence from config");
        Ok(set)
    }
}

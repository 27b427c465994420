use serde::{Deserialize, Serialize};

use crate::*;

/// Timing rules of a round. All values are seconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundRules {
    /// Time budget granted per pair on the board.
    pub seconds_per_pair: Seconds,
    /// Delay between the second selection and the comparison outcome.
    pub settle_delay: Seconds,
    /// How long mismatched cards stay face up before hiding again.
    pub flip_back_delay: Seconds,
    /// Window after each comparison during which selections are ignored.
    pub input_lock: Seconds,
    /// Opening reveal of the whole board; `0` disables it.
    pub preview: Seconds,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            seconds_per_pair: 15.,
            settle_delay: 0.4,
            flip_back_delay: 0.5,
            input_lock: 0.5,
            preview: 1.,
        }
    }
}

impl RoundRules {
    /// Rules with every delay and the preview set to zero.
    pub fn instant(seconds_per_pair: Seconds) -> Self {
        Self {
            seconds_per_pair,
            settle_delay: 0.,
            flip_back_delay: 0.,
            input_lock: 0.,
            preview: 0.,
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let rules: Self = toml::from_str(raw).map_err(|err| {
            GameError::InvalidConfiguration(ConfigIssue::Unparsable(err.to_string()))
        })?;
        rules.validate()
    }

    pub fn validate(self) -> Result<Self> {
        let checks = [
            ("seconds_per_pair", self.seconds_per_pair),
            ("settle_delay", self.settle_delay),
            ("flip_back_delay", self.flip_back_delay),
            ("input_lock", self.input_lock),
            ("preview", self.preview),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0. {
                return Err(GameError::InvalidConfiguration(ConfigIssue::InvalidRule(name)));
            }
        }
        if self.seconds_per_pair == 0. {
            return Err(GameError::InvalidConfiguration(ConfigIssue::InvalidRule(
                "seconds_per_pair",
            )));
        }
        Ok(self)
    }

    pub fn game_duration(&self, pair_count: CardCount) -> Seconds {
        pair_count as Seconds * self.seconds_per_pair
    }
}

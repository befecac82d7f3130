/// Easing curves used to map normalized segment time to reveal progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-in (`t³`).
    EaseIn,
    /// Cubic ease-out (`1-(1-t)³`).
    EaseOut,
    /// Cubic ease-in/out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply this easing function to normalized time `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// How eased time is mapped onto the reveal within one segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Reveal grows from 0 to 1.
    #[default]
    Forward,
    /// Reveal shrinks from 1 to 0.
    Reverse,
    /// Round trip: 0 → 1 over the first half, 1 → 0 over the second half.
    ///
    /// The value at the end of a segment is 0, not 1. Callers expecting a fully revealed final
    /// frame will see the mask back at its start state.
    Pingpong,
}

impl Direction {
    /// Apply this direction to an eased value `v` in `[0, 1]`.
    pub fn apply(self, v: f64) -> f64 {
        let v = v.clamp(0.0, 1.0);
        match self {
            Self::Forward => v,
            Self::Reverse => 1.0 - v,
            Self::Pingpong => {
                if v <= 0.5 {
                    v * 2.0
                } else {
                    2.0 - v * 2.0
                }
            }
        }
    }

    /// Progress value at the first frame of a segment.
    pub fn start_value(self) -> f64 {
        self.apply(0.0)
    }
}

/// Eased, direction-adjusted progress for normalized time `t`.
pub fn shape_progress(easing: Easing, direction: Direction, t: f64) -> f64 {
    direction.apply(easing.apply(t))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

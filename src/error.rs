/// A coordinate outside the board was accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("position ({x}, {y}) is outside the {width}x{height} board")]
pub struct OutOfBounds {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Raised by every update once neither side can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("game over: black {black_score}, white {white_score} (differential {differential})")]
pub struct GameOver {
    /// `black_score - white_score`.
    pub differential: i32,
    pub black_score: u32,
    pub white_score: u32,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_display() {
        let err = OutOfBounds {
            x: 10,
            y: 2,
            width: 10,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "position (10, 2) is outside the 10x5 board"
        );
    }

    #[test]
    fn game_over_display() {
        let err = GameOver {
            differential: -4,
            black_score: 23,
            white_score: 27,
        };
        assert_eq!(
            err.to_string(),
            "game over: black 23, white 27 (differential -4)"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Validation("width must be >= 2".to_string());
        assert_eq!(err.to_string(), "config validation error: width must be >= 2");
    }
}

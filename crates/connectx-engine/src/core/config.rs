use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest supported number of rows or columns.
pub const MAX_DIMENSION: usize = 16;

/// Largest supported connect length.
///
/// Windows are stored inline with this capacity.
pub const MAX_IN_A_ROW: usize = MAX_DIMENSION;

/// Immutable game parameters: board size and the run length needed to win.
///
/// Every function that depends on the board geometry receives a
/// `&GameConfig` explicitly; there is no global configuration.
///
/// Deserializes from the harness `configuration` object
/// (`{"rows": 6, "columns": 7, "inarow": 4, ...}`). Extra keys such as
/// `timeout` are ignored and out-of-range values are rejected.
///
/// # Example
///
/// ```
/// use connectx_engine::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!((config.rows(), config.columns(), config.inarow()), (6, 7, 4));
///
/// assert!(GameConfig::new(6, 7, 8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    rows: usize,
    columns: usize,
    inarow: usize,
}

#[derive(Debug, Deserialize)]
struct RawGameConfig {
    rows: usize,
    columns: usize,
    inarow: usize,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.columns, raw.inarow)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CONNECT_FOUR
    }
}

impl GameConfig {
    /// Standard Connect Four: 6 rows, 7 columns, four in a row.
    pub const CONNECT_FOUR: Self = Self {
        rows: 6,
        columns: 7,
        inarow: 4,
    };

    pub fn new(rows: usize, columns: usize, inarow: usize) -> Result<Self, ConfigError> {
        if !(1..=MAX_DIMENSION).contains(&rows) {
            return Err(ConfigError::InvalidRows(rows));
        }
        if !(1..=MAX_DIMENSION).contains(&columns) {
            return Err(ConfigError::InvalidColumns(columns));
        }
        if !(2..=MAX_IN_A_ROW).contains(&inarow) || inarow > rows.max(columns) {
            return Err(ConfigError::InvalidInarow {
                rows,
                columns,
                inarow,
            });
        }
        Ok(Self {
            rows,
            columns,
            inarow,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub const fn inarow(&self) -> usize {
        self.inarow
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

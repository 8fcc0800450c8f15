//! models::coefficients — period-indexed regression coefficient tables.
//!
//! Purpose
//! -------
//! Hold the per-period regression coefficients of an attenuation model as an
//! immutable, validated table that models share read-only through `Arc`.
//!
//! Key behaviors
//! -------------
//! - [`CoefficientTable`] validates that the table is non-empty and its
//!   periods are positive and strictly increasing, whether it is built from
//!   rows in memory or read from CSV.
//! - CSV input has a header row naming the row fields; lines starting with
//!   `#` are comments and surrounding whitespace is trimmed.
//! - [`Idriss2014Coefficients`] pairs the small- and large-magnitude tables
//!   of Idriss (2014) and requires them to share one period grid.
//!
//! Invariants & assumptions
//! ------------------------
//! - Tables never change after construction; there is no global registry.
//!   Models receive their tables explicitly.
//! - The PGA row, when present, is tabulated at a short positive period
//!   (conventionally 0.01 s) so that it can take part in log-period
//!   interpolation.
use std::{fs::File, io::Read, path::Path};

use ndarray::Array1;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::models::errors::{ModelError, ModelResult};

/// A coefficient row tabulated at one spectral period.
pub trait PeriodRow {
    fn period(&self) -> f64;
}

/// CoefficientTable — validated rows ordered by period.
///
/// Fields
/// ------
/// - `rows`: `Vec<C>` — one row per period.
/// - `periods`: `Array1<f64>` — cached `rows[i].period()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable<C> {
    rows: Vec<C>,
    periods: Array1<f64>,
}

impl<C: PeriodRow> CoefficientTable<C> {
    /// Build a table from rows.
    ///
    /// Errors
    /// ------
    /// - `ModelError::EmptyTable` for no rows.
    /// - `ModelError::NonPositivePeriod` for a NaN/±inf or non-positive
    ///   period.
    /// - `ModelError::NonIncreasingPeriods` when periods do not strictly
    ///   increase.
    pub fn from_rows(rows: Vec<C>) -> ModelResult<Self> {
        if rows.is_empty() {
            return Err(ModelError::EmptyTable);
        }
        let periods: Vec<f64> = rows.iter().map(PeriodRow::period).collect();
        for (index, &value) in periods.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::NonPositivePeriod { index, value });
            }
        }
        for (index, pair) in periods.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ModelError::NonIncreasingPeriods {
                    index,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(CoefficientTable { rows, periods: Array1::from(periods) })
    }

    pub fn periods(&self) -> &Array1<f64> {
        &self.periods
    }

    pub fn rows(&self) -> &[C] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<C: PeriodRow + DeserializeOwned> CoefficientTable<C> {
    /// Read a table from CSV with a header row and `#` comment lines.
    ///
    /// Errors
    /// ------
    /// - `ModelError::Csv` for I/O failures, malformed records, or fields
    ///   that do not deserialize into `C`.
    /// - Any error from [`CoefficientTable::from_rows`].
    pub fn from_csv_reader<R: Read>(reader: R) -> ModelResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);
        let rows = rdr.deserialize().collect::<Result<Vec<C>, csv::Error>>()?;
        debug!(n_rows = rows.len(), "loaded coefficient table");
        Self::from_rows(rows)
    }

    /// Read a table from a CSV file; see [`CoefficientTable::from_csv_reader`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| ModelError::Csv { text: format!("{}: {err}", path.display()) })?;
        debug!(path = %path.display(), "reading coefficient table");
        Self::from_csv_reader(file)
    }
}

/// Idriss (2014) regression coefficients at one period.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Idriss2014Coeffs {
    pub period: f64,
    pub alpha_1: f64,
    pub alpha_2: f64,
    pub alpha_3: f64,
    pub beta_1: f64,
    pub beta_2: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub phi: f64,
}

impl PeriodRow for Idriss2014Coeffs {
    fn period(&self) -> f64 {
        self.period
    }
}

/// Small- (`M <= 6.75`) and large-magnitude coefficient tables of Idriss (2014).
#[derive(Debug, Clone, PartialEq)]
pub struct Idriss2014Coefficients {
    small: CoefficientTable<Idriss2014Coeffs>,
    large: CoefficientTable<Idriss2014Coeffs>,
}

impl Idriss2014Coefficients {
    /// Pair two tables.
    ///
    /// Errors
    /// ------
    /// - `ModelError::MismatchedPeriodGrid` when the tables differ in length
    ///   or in any period (the index is the first disagreeing row, or the
    ///   shorter length).
    pub fn new(
        small: CoefficientTable<Idriss2014Coeffs>, large: CoefficientTable<Idriss2014Coeffs>,
    ) -> ModelResult<Self> {
        let (ps, pl) = (small.periods(), large.periods());
        if let Some(index) = ps.iter().zip(pl.iter()).position(|(a, b)| a != b) {
            return Err(ModelError::MismatchedPeriodGrid {
                index,
                left: ps[index],
                right: pl[index],
            });
        }
        if ps.len() != pl.len() {
            let index = ps.len().min(pl.len());
            let left = ps.get(index).copied().unwrap_or(f64::NAN);
            let right = pl.get(index).copied().unwrap_or(f64::NAN);
            return Err(ModelError::MismatchedPeriodGrid { index, left, right });
        }
        Ok(Idriss2014Coefficients { small, large })
    }

    /// Load both tables from CSV files.
    pub fn from_csv_paths(small: impl AsRef<Path>, large: impl AsRef<Path>) -> ModelResult<Self> {
        Self::new(CoefficientTable::from_csv_path(small)?, CoefficientTable::from_csv_path(large)?)
    }

    pub fn small(&self) -> &CoefficientTable<Idriss2014Coeffs> {
        &self.small
    }

    pub fn large(&self) -> &CoefficientTable<Idriss2014Coeffs> {
        &self.large
    }

    /// Shared period grid of both tables.
    pub fn periods(&self) -> &Array1<f64> {
        self.small.periods()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - CSV parsing with comments and whitespace.
    // - Table validation (empty, non-positive, non-increasing periods).
    // - Grid agreement between the Idriss (2014) tables.
    //
    // They intentionally DO NOT cover:
    // - Published coefficient values; tables here are synthetic.
    // -------------------------------------------------------------------------

    const CSV: &str = "\
# synthetic coefficients
period, alpha_1, alpha_2, alpha_3, beta_1, beta_2, gamma, epsilon, phi
0.01, 1.0, 0.1, 0.0, 1.0, 0.0, 0.0, 0.0, 0.5
1.0, 0.5, 0.1, 0.0, 1.0, 0.0, 0.0, 0.0, 0.5
";

    fn row(period: f64) -> Idriss2014Coeffs {
        Idriss2014Coeffs {
            period,
            alpha_1: 0.0,
            alpha_2: 0.0,
            alpha_3: 0.0,
            beta_1: 0.0,
            beta_2: 0.0,
            gamma: 0.0,
            epsilon: 0.0,
            phi: 0.0,
        }
    }

    #[test]
    // Purpose
    // -------
    // Parse a commented, padded CSV into a table.
    //
    // Given
    // -----
    // - Two data rows at 0.01 s and 1.0 s after a comment line.
    //
    // Expect
    // ------
    // - Periods [0.01, 1.0]; the second row's alpha_1 is 0.5.
    fn from_csv_reader_parses_rows() {
        // Act
        let table = CoefficientTable::<Idriss2014Coeffs>::from_csv_reader(CSV.as_bytes()).unwrap();

        // Assert
        assert_eq!(table.len(), 2);
        assert_eq!(table.periods().to_vec(), vec![0.01, 1.0]);
        assert_eq!(table.rows()[1].alpha_1, 0.5);
        assert_eq!(table.rows()[0].phi, 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Malformed CSV surfaces as `ModelError::Csv`.
    //
    // Given
    // -----
    // - A row with a non-numeric coefficient.
    //
    // Expect
    // ------
    // - `ModelError::Csv`.
    fn from_csv_reader_rejects_bad_fields() {
        // Arrange
        let bad = "period,alpha_1,alpha_2,alpha_3,beta_1,beta_2,gamma,epsilon,phi\n\
                   0.1,x,0,0,0,0,0,0,0\n";

        // Act
        let result = CoefficientTable::<Idriss2014Coeffs>::from_csv_reader(bad.as_bytes());

        // Assert
        assert!(matches!(result, Err(ModelError::Csv { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Table invariants are enforced.
    //
    // Given
    // -----
    // - No rows; a zero period; periods [0.1, 0.1].
    //
    // Expect
    // ------
    // - `EmptyTable`, `NonPositivePeriod`, `NonIncreasingPeriods`.
    fn from_rows_validates_periods() {
        // Act & Assert
        assert_eq!(
            CoefficientTable::<Idriss2014Coeffs>::from_rows(vec![]),
            Err(ModelError::EmptyTable)
        );
        assert!(matches!(
            CoefficientTable::from_rows(vec![row(0.0)]),
            Err(ModelError::NonPositivePeriod { index: 0, .. })
        ));
        assert!(matches!(
            CoefficientTable::from_rows(vec![row(0.1), row(0.1)]),
            Err(ModelError::NonIncreasingPeriods { index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // The small and large tables must share a grid.
    //
    // Given
    // -----
    // - Grids [0.1, 1.0] vs [0.1, 2.0], and [0.1, 1.0] vs [0.1].
    //
    // Expect
    // ------
    // - `MismatchedPeriodGrid` at row 1 in both cases.
    fn idriss_tables_must_share_grid() {
        // Arrange
        let a = CoefficientTable::from_rows(vec![row(0.1), row(1.0)]).unwrap();
        let b = CoefficientTable::from_rows(vec![row(0.1), row(2.0)]).unwrap();
        let c = CoefficientTable::from_rows(vec![row(0.1)]).unwrap();

        // Act
        let differ = Idriss2014Coefficients::new(a.clone(), b);
        let shorter = Idriss2014Coefficients::new(a.clone(), c);
        let same = Idriss2014Coefficients::new(a.clone(), a);

        // Assert
        assert!(matches!(differ, Err(ModelError::MismatchedPeriodGrid { index: 1, .. })));
        assert!(matches!(shorter, Err(ModelError::MismatchedPeriodGrid { index: 1, .. })));
        assert_eq!(same.unwrap().periods().len(), 2);
    }
}

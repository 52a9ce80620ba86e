use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("row has {got} values but the table has {expected} columns")]
    ColumnCountMismatch { expected: usize, got: usize },
    #[error("missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },
}

/// Ordered rows over named columns. By convention the first column holds a
/// timestamp in nanoseconds; the last column holds the completion timestamp
/// for execution-span tables or the metric value for time-series tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<i64>>>,
}

impl RecordTable {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Option<i64>>) -> Result<(), RecordError> {
        if row.len() != self.columns.len() {
            return Err(RecordError::ColumnCountMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at (row, column), where a missing value is a data-integrity
    /// failure rather than a skip.
    pub fn value(&self, row: usize, column: &str) -> Result<i64, RecordError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| RecordError::UnknownColumn(column.to_string()))?;
        self.rows[row][idx].ok_or_else(|| RecordError::MissingValue {
            column: column.to_string(),
            row,
        })
    }

    pub fn column_series(&self, column: &str) -> Result<Vec<Option<i64>>, RecordError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| RecordError::UnknownColumn(column.to_string()))?;
        Ok(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Dense column extraction. Fails on the first missing value.
    pub fn column_values(&self, column: &str) -> Result<Vec<i64>, RecordError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| RecordError::UnknownColumn(column.to_string()))?;
        let mut values = Vec::with_capacity(self.rows.len());
        for (row, cells) in self.rows.iter().enumerate() {
            match cells[idx] {
                Some(value) => values.push(value),
                None => {
                    return Err(RecordError::MissingValue {
                        column: column.to_string(),
                        row,
                    })
                }
            }
        }
        Ok(values)
    }
}

/// Valid time range applied to a table before building a visual source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    begin_ns: i64,
    end_ns: i64,
}

impl Clip {
    pub fn new(begin_ns: i64, end_ns: i64) -> Self {
        Self { begin_ns, end_ns }
    }

    /// Derives the clip from the observed frame and the left/right trim
    /// seconds of a chart request.
    pub fn from_trimmed_frame(
        frame_min_ns: i64,
        frame_max_ns: i64,
        lstrip_s: f64,
        rstrip_s: f64,
    ) -> Self {
        let begin_ns = frame_min_ns + (lstrip_s * 1e9) as i64;
        let end_ns = frame_max_ns - (rstrip_s * 1e9) as i64;
        Self {
            begin_ns,
            end_ns: end_ns.max(begin_ns),
        }
    }

    pub fn begin_ns(&self) -> i64 {
        self.begin_ns
    }

    pub fn end_ns(&self) -> i64 {
        self.end_ns
    }

    pub fn contains(&self, time_ns: i64) -> bool {
        self.begin_ns <= time_ns && time_ns <= self.end_ns
    }

    /// Keeps rows whose first-column timestamp lies inside the range. Rows
    /// with a missing first value are kept so the consumer rejects them as
    /// integrity failures instead of silently dropping them.
    pub fn apply(&self, table: &RecordTable) -> RecordTable {
        let mut clipped = RecordTable::new(table.columns.clone());
        for row in &table.rows {
            match row.first().copied().flatten() {
                Some(timestamp) if !self.contains(timestamp) => {}
                _ => clipped.rows.push(row.clone()),
            }
        }
        clipped
    }
}

/// Linear mapping from a raw nanosecond timestamp into a converted time
/// domain, typically simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockConverter {
    slope: f64,
    offset: f64,
}

impl ClockConverter {
    pub fn new(slope: f64, offset: f64) -> Self {
        Self { slope, offset }
    }

    pub fn convert(&self, time_ns: i64) -> f64 {
        self.slope * time_ns as f64 + self.offset
    }
}

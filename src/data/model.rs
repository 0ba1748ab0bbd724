use serde::Serialize;

// ---------------------------------------------------------------------------
// Column layout of the result file
// ---------------------------------------------------------------------------

/// Temperature, the x axis of every figure.
pub const TEMPERATURE_COLUMN: usize = 0;
/// Nearest-neighbour coupling J. Recorded with every run, read by no figure.
pub const COUPLING_COLUMN: usize = 1;
/// Total energy per site.
pub const ENERGY_COLUMN: usize = 2;
/// Total magnetization per site, signed.
pub const MAGNETIZATION_COLUMN: usize = 3;
/// Heat capacity per site.
pub const HEAT_CAPACITY_COLUMN: usize = 4;
/// Magnetic susceptibility per site.
pub const SUSCEPTIBILITY_COLUMN: usize = 5;
/// Smallest row width the figures can be drawn from.
pub const MIN_COLUMNS: usize = 6;

// ---------------------------------------------------------------------------
// Measurement – one simulator result row
// ---------------------------------------------------------------------------

/// One simulation result. Field order is the column order of the result
/// file; the writer serializes the fields positionally.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub temperature: f64,
    pub coupling: f64,
    pub energy: f64,
    pub magnetization: f64,
    pub heat_capacity: f64,
    pub susceptibility: f64,
    /// Wall-clock duration of the sampling loop.
    pub seconds: f64,
}

// ---------------------------------------------------------------------------
// ObservationTable – the parsed result file
// ---------------------------------------------------------------------------

/// All rows of a parsed result file. The loader guarantees a uniform row
/// width of at least [`MIN_COLUMNS`].
#[derive(Debug, Clone)]
pub struct ObservationTable {
    rows: Vec<Vec<f64>>,
}

impl ObservationTable {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        ObservationTable { rows }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extract one column, top row first.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }
}

// ---------------------------------------------------------------------------
// ObservableSeries – one column per figure
// ---------------------------------------------------------------------------

/// The five equal-length series the figures are drawn from.
#[derive(Debug, Clone)]
pub struct ObservableSeries {
    pub temperature: Vec<f64>,
    pub energy: Vec<f64>,
    pub magnetization: Vec<f64>,
    pub heat_capacity: Vec<f64>,
    pub susceptibility: Vec<f64>,
}

impl ObservableSeries {
    /// Split a table into its figure columns.
    pub fn from_table(table: &ObservationTable) -> Self {
        ObservableSeries {
            temperature: table.column(TEMPERATURE_COLUMN),
            energy: table.column(ENERGY_COLUMN),
            magnetization: table.column(MAGNETIZATION_COLUMN),
            heat_capacity: table.column(HEAT_CAPACITY_COLUMN),
            susceptibility: table.column(SUSCEPTIBILITY_COLUMN),
        }
    }

    /// Magnetization with the sign dropped. The sampler records the signed
    /// value; below the critical temperature either sign is equally likely,
    /// so the figure shows the magnitude.
    pub fn absolute_magnetization(&self) -> Vec<f64> {
        self.magnetization.iter().map(|m| m.abs()).collect()
    }
}

//! Session State and Operation Forwarding

use drive_metrics::{
    launch_metrics, protection_summary, shift_summary, wheel_speed_summary, LaunchMetrics,
    MetricsConfig, ProtectionSummary, ShiftEvent, SpeedUnit, WheelSpeedSummary,
};
use log_cache::LogCache;
use log_parser::{ChannelMap, ChannelRole, ColumnTable, LogParser, ParseError, ParserConfig};
use serde::{Deserialize, Serialize};
use series_engine::{
    align, basic_stats, count_in_range, diff, downsample, AlignedSeries, BasicStats, DiffResult,
    DownsampledSeries, RangeCount, RangeQueryError,
};
use tracing::info;

/// Two channels aligned on the common grid together with their diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelComparison {
    pub aligned: AlignedSeries,
    pub diff: DiffResult,
}

/// Viewer-facing analysis state for one loaded log
///
/// All results are recomputed from the current table on each call; nothing
/// is cached between interactions.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    parser: LogParser,
    table: Option<ColumnTable>,
    channels: ChannelMap,
    source_name: Option<String>,
}

impl AnalysisSession {
    /// Create a session with the given parser configuration
    pub fn new(config: ParserConfig) -> Self {
        Self {
            parser: LogParser::new(config),
            ..Default::default()
        }
    }

    /// Parse log text, classify its channels, and cache the raw text
    ///
    /// Parse failures are returned for display and leave the previous
    /// table in place.
    pub fn load_text(
        &mut self,
        name: &str,
        text: &str,
        cache: &mut dyn LogCache,
    ) -> Result<(), ParseError> {
        let table = self.parser.parse(text)?;
        let channels = ChannelMap::resolve(&table.headers);
        info!(
            "loaded '{}': {} rows x {} columns, time channel {:?}",
            name,
            table.row_count(),
            table.column_count(),
            channels.time
        );
        cache.store_log(name, text);
        self.table = Some(table);
        self.channels = channels;
        self.source_name = Some(name.to_string());
        Ok(())
    }

    /// Reload the most recently cached log, if one exists
    ///
    /// Returns `Ok(false)` when the cache is empty.
    pub fn load_recent(&mut self, cache: &dyn LogCache) -> Result<bool, ParseError> {
        let Some(recent) = cache.recent_log() else {
            return Ok(false);
        };
        let (name, text) = (recent.name.clone(), recent.text.clone());

        let table = self.parser.parse(&text)?;
        self.channels = ChannelMap::resolve(&table.headers);
        info!("restored '{}' from cache, {} rows", name, table.row_count());
        self.table = Some(table);
        self.source_name = Some(name);
        Ok(true)
    }

    /// The current table, when a log is loaded
    pub fn table(&self) -> Option<&ColumnTable> {
        self.table.as_ref()
    }

    /// Channel roles resolved for the current table
    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    /// Name the current log was loaded under
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Values of one column of the current table
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.table.as_ref()?.column(index)
    }

    /// Values of the column resolved for a role
    pub fn channel(&self, role: ChannelRole) -> Option<&[f64]> {
        self.column(self.channels.index(role)?)
    }

    /// Statistics for one column
    pub fn column_stats(&self, index: usize) -> Option<BasicStats> {
        basic_stats(self.column(index)?)
    }

    /// Statistics for the column resolved for a role
    pub fn channel_stats(&self, role: ChannelRole) -> Option<BasicStats> {
        basic_stats(self.channel(role)?)
    }

    /// Inclusive range query over one column
    ///
    /// `None` when no log is loaded or the column does not exist; the
    /// inner error carries the user-facing message for invalid bounds.
    pub fn range_count(
        &self,
        index: usize,
        min: f64,
        max: f64,
    ) -> Option<Result<RangeCount, RangeQueryError>> {
        Some(count_in_range(self.column(index)?, min, max))
    }

    /// Align two columns on the time axis and diff them
    ///
    /// `None` when the table, time channel, or either column is missing,
    /// or when alignment finds no overlap.
    pub fn compare_columns(&self, index_a: usize, index_b: usize) -> Option<ChannelComparison> {
        let time = self.table.as_ref()?.time_column()?;
        let a = self.column(index_a)?;
        let b = self.column(index_b)?;
        let aligned = align(a, time, b, time)?;
        let diff = diff(&aligned);
        Some(ChannelComparison { aligned, diff })
    }

    /// One column reduced to at most `threshold` points for plotting
    ///
    /// X is the time channel when present, otherwise the sample index.
    pub fn plot_series(&self, index: usize, threshold: usize) -> Option<DownsampledSeries> {
        let table = self.table.as_ref()?;
        let ys = table.column(index)?;
        match table.time_column() {
            Some(time) => Some(downsample(time, ys, threshold)),
            None => {
                let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
                Some(downsample(&xs, ys, threshold))
            }
        }
    }

    /// Unit of the vehicle-speed channel, from its header text
    pub fn speed_unit(&self) -> Option<SpeedUnit> {
        let index = self.channels.vehicle_speed?;
        Some(SpeedUnit::from_header(self.table.as_ref()?.header(index)?))
    }

    /// Launch metrics between two speed thresholds in the channel's unit
    pub fn launch(&self, v_start: f64, v_end: f64) -> Option<LaunchMetrics> {
        let speed = self.channel(ChannelRole::VehicleSpeed)?;
        let time = self.table.as_ref()?.time_column()?;
        let unit = self.speed_unit()?;
        Some(launch_metrics(speed, time, unit, v_start, v_end))
    }

    /// Detected upshifts with RPM drop
    pub fn shifts(&self) -> Option<Vec<ShiftEvent>> {
        let gear = self.channel(ChannelRole::GearActual)?;
        let rpm = self.channel(ChannelRole::Rpm)?;
        Some(shift_summary(gear, rpm))
    }

    /// Traction/stability intervention counts
    pub fn protection(&self, config: &MetricsConfig) -> Option<ProtectionSummary> {
        self.table.as_ref()?;
        Some(protection_summary(
            self.channel(ChannelRole::TorqueIntervention),
            self.channel(ChannelRole::WheelSlip),
            config,
        ))
    }

    /// Largest front/rear wheel-speed split
    pub fn wheel_speeds(&self) -> Option<WheelSpeedSummary> {
        let front = self.channel(ChannelRole::WheelSpeedFront)?;
        let rear = self.channel(ChannelRole::WheelSpeedRear)?;
        wheel_speed_summary(front, rear)
    }

    /// Columns with enough finite samples to offer in plotting menus
    pub fn plottable_columns(&self) -> Vec<usize> {
        self.table
            .as_ref()
            .map(ColumnTable::plottable_columns)
            .unwrap_or_default()
    }

    /// Metadata pairs recovered from the log header
    pub fn metadata(&self) -> &[(String, String)] {
        self.table
            .as_ref()
            .map(|t| t.metadata.as_slice())
            .unwrap_or(&[])
    }
}

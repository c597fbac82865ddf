//! The orchestrating view as an explicit state machine.
//!
//! `Idle -> Parsing -> Suggesting -> Ready`, with `Error` reachable from
//! `Parsing` and `Suggesting`. Every upload starts a new generation; results
//! carrying the ticket of an older upload are ignored, so the latest upload
//! always wins.

use crate::advisor::{AdvisorError, ChartAdvisor};
use crate::chart_type::{ChartType, Suggestion};
use crate::csv_reader::{read_dataset, IngestError};
use crate::data::Dataset;
use crate::ir::ChartDatum;
use crate::transform::map_chart_data;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const PARSE_ERROR_MESSAGE: &str = "Error parsing CSV file";
pub const SUGGESTION_ERROR_MESSAGE: &str = "Error fetching chart suggestions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Parsing,
    Suggesting,
    Ready,
    Error,
}

/// Identifies one upload action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No dataset loaded")]
    NoDataset,
    #[error("Unknown column '{column}'. Available columns: {available}")]
    UnknownColumn { column: String, available: String },
}

/// What the chart area should show
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Nothing,
    /// The advisor named something no renderer exists for
    Unsupported(String),
    Render {
        chart_type: ChartType,
        data: Vec<ChartDatum>,
        label_column: String,
        value_column: String,
    },
}

#[derive(Debug)]
pub struct Session {
    phase: Phase,
    generation: u64,
    dataset: Option<Dataset>,
    suggestion: Option<Suggestion>,
    label_column: Option<String>,
    value_column: Option<String>,
    notification: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            dataset: None,
            suggestion: None,
            label_column: None,
            value_column: None,
            notification: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Parsing
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Column names of the current dataset, empty before a successful parse
    pub fn columns(&self) -> &[String] {
        self.dataset.as_ref().map(|d| d.columns()).unwrap_or(&[])
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.suggestion.as_ref()
    }

    pub fn label_column(&self) -> Option<&str> {
        self.label_column.as_deref()
    }

    pub fn value_column(&self) -> Option<&str> {
        self.value_column.as_deref()
    }

    /// The pending user-visible error message, if any
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn dismiss(&mut self) {
        self.notification = None;
    }

    /// Start a new upload. The previous dataset, suggestion and column
    /// selections are discarded.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.generation += 1;
        self.phase = Phase::Parsing;
        self.dataset = None;
        self.suggestion = None;
        self.label_column = None;
        self.value_column = None;
        debug!(generation = self.generation, "Upload started");
        UploadTicket(self.generation)
    }

    fn is_current(&self, ticket: UploadTicket) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "Ignoring result of a superseded upload"
            );
            return false;
        }
        true
    }

    /// Record the ingest result. Returns false when the ticket is stale.
    pub fn finish_parsing(
        &mut self,
        ticket: UploadTicket,
        result: Result<Dataset, IngestError>,
    ) -> bool {
        if !self.is_current(ticket) || self.phase != Phase::Parsing {
            return false;
        }
        match result {
            Ok(dataset) => {
                info!(
                    rows = dataset.len(),
                    columns = dataset.columns().len(),
                    "Parsed CSV"
                );
                self.dataset = Some(dataset);
                self.phase = Phase::Suggesting;
            }
            Err(e) => {
                warn!(error = %e, "CSV parse failed");
                self.fail(PARSE_ERROR_MESSAGE);
            }
        }
        true
    }

    /// Record the advisor result. Returns false when the ticket is stale.
    pub fn finish_suggestion(
        &mut self,
        ticket: UploadTicket,
        result: Result<String, AdvisorError>,
    ) -> bool {
        if !self.is_current(ticket) || self.phase != Phase::Suggesting {
            return false;
        }
        match result {
            Ok(raw) => {
                let suggestion = Suggestion::parse(&raw);
                info!(%suggestion, "Chart suggestion received");
                self.suggestion = Some(suggestion);
                self.phase = Phase::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Chart suggestion failed");
                self.fail(SUGGESTION_ERROR_MESSAGE);
            }
        }
        true
    }

    fn fail(&mut self, message: &str) {
        self.phase = Phase::Error;
        self.notification = Some(message.to_string());
    }

    fn check_column(&self, column: &str) -> Result<(), SelectionError> {
        let dataset = self.dataset.as_ref().ok_or(SelectionError::NoDataset)?;
        if dataset.has_column(column) {
            Ok(())
        } else {
            Err(SelectionError::UnknownColumn {
                column: column.to_string(),
                available: dataset.columns().join(", "),
            })
        }
    }

    pub fn select_label_column(&mut self, column: &str) -> Result<(), SelectionError> {
        self.check_column(column)?;
        self.label_column = Some(column.to_string());
        Ok(())
    }

    pub fn select_value_column(&mut self, column: &str) -> Result<(), SelectionError> {
        self.check_column(column)?;
        self.value_column = Some(column.to_string());
        Ok(())
    }

    /// Derive the chart area from the current state. Chart data is mapped
    /// afresh on every call.
    pub fn chart_view(&self) -> ChartView {
        if self.phase != Phase::Ready {
            return ChartView::Nothing;
        }
        let chart_type = match &self.suggestion {
            Some(Suggestion::Supported(chart_type)) => *chart_type,
            Some(Suggestion::Unsupported(raw)) => return ChartView::Unsupported(raw.clone()),
            None => return ChartView::Nothing,
        };
        match (&self.dataset, &self.label_column, &self.value_column) {
            (Some(dataset), Some(label_column), Some(value_column)) => ChartView::Render {
                chart_type,
                data: map_chart_data(dataset, label_column, value_column),
                label_column: label_column.clone(),
                value_column: value_column.clone(),
            },
            _ => ChartView::Nothing,
        }
    }

    /// Run a whole upload: ingest the bytes, then ask the advisor. Returns
    /// the phase the session ends in.
    pub async fn upload<A>(&mut self, bytes: &[u8], advisor: &A) -> Phase
    where
        A: ChartAdvisor + ?Sized,
    {
        let ticket = self.begin_upload();
        self.finish_parsing(ticket, read_dataset(bytes));
        if self.phase != Phase::Suggesting {
            return self.phase;
        }

        let result = match &self.dataset {
            Some(dataset) => advisor.suggest(dataset).await,
            None => return self.phase,
        };
        self.finish_suggestion(ticket, result);
        self.phase
    }
}

//! Parse Worker Task

use log_parser::{ColumnTable, LogParser, ParseError, ParserConfig};
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};
use uuid::Uuid;

/// Minimum progress advance, in percentage points, between notifications
pub const PROGRESS_STEP: u8 = 5;

/// A request to parse one log in the background
#[derive(Debug, Clone)]
pub struct ParseRequest {
    /// Correlates progress and terminal messages to this request
    pub request_id: Uuid,
    /// Display name of the log, for logging only
    pub name: String,
    /// Raw log text, moved into the worker
    pub text: String,
    /// Parser configuration for this request
    pub config: ParserConfig,
}

impl ParseRequest {
    /// Create a request with a fresh id and default parser config
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            name: name.into(),
            text: text.into(),
            config: ParserConfig::default(),
        }
    }
}

/// Messages emitted by the worker for one request
#[derive(Debug)]
pub enum ParseUpdate {
    /// Coarse progress notification, 0-100
    Progress { request_id: Uuid, percent: u8 },
    /// Terminal message, exactly one per request
    Finished {
        request_id: Uuid,
        result: Result<ColumnTable, ParseError>,
    },
}

/// Parse a log on a blocking thread, streaming updates into `tx`
///
/// Progress messages are sent lossily (a full channel drops them) and only
/// when progress has advanced at least [`PROGRESS_STEP`] points or hit
/// 100. The terminal `Finished` message is delivered blocking so it is
/// never lost while the receiver lives; a dropped receiver is logged and
/// the result discarded.
pub fn spawn_parse(request: ParseRequest, tx: mpsc::Sender<ParseUpdate>) -> JoinHandle<()> {
    task::spawn_blocking(move || {
        let ParseRequest {
            request_id,
            name,
            text,
            config,
        } = request;

        info!(
            "parsing '{}' ({} bytes) on background thread, request {}",
            name,
            text.len(),
            request_id
        );

        let parser = LogParser::new(config);
        let mut last_sent: u8 = 0;
        let result = parser.parse_with_progress(&text, |percent| {
            let due = percent >= last_sent + PROGRESS_STEP || (percent == 100 && last_sent < 100);
            if due {
                last_sent = percent;
                let _ = tx.try_send(ParseUpdate::Progress {
                    request_id,
                    percent,
                });
            }
        });

        match &result {
            Ok(table) => info!(
                "request {} parsed {} rows x {} columns",
                request_id,
                table.row_count(),
                table.column_count()
            ),
            Err(e) => warn!("request {} failed: {}", request_id, e),
        }

        if tx
            .blocking_send(ParseUpdate::Finished { request_id, result })
            .is_err()
        {
            warn!("request {}: result receiver dropped", request_id);
        }
    })
}

//! Caller-owned memory of the most recent successful render

use crate::io::error::{Result, persistence_error};
use crate::io::export::export_table_csv;
use crate::pipeline::orchestrator::{RenderFailure, RenderService};
use crate::pipeline::request::{RenderRequest, RenderResponse, RenderResult};
use crate::text::frequency::FrequencyTable;
use std::path::Path;

/// Holds the frequency table of the last successful render
///
/// Each client keeps its own session, so concurrent clients never see each
/// other's tables. Failed renders leave the slot untouched.
#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    last_table: Option<FrequencyTable>,
}

impl RenderSession {
    /// Session with an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Render through `service` and remember the table on success
    pub fn render(&mut self, service: &RenderService, request: &RenderRequest) -> RenderResponse {
        match self.render_result(service, request) {
            Ok(result) => RenderResponse::success(&result),
            Err(failure) => RenderResponse::failure(&failure),
        }
    }

    /// Like [`RenderSession::render`] but hands back the full result
    ///
    /// # Errors
    ///
    /// Returns the service's [`RenderFailure`]; the slot keeps its previous
    /// table
    pub fn render_result(
        &mut self,
        service: &RenderService,
        request: &RenderRequest,
    ) -> std::result::Result<RenderResult, RenderFailure> {
        let result = service.render(request)?;
        self.last_table = Some(result.table.clone());
        Ok(result)
    }

    /// Table of the last successful render
    pub const fn last_table(&self) -> Option<&FrequencyTable> {
        self.last_table.as_ref()
    }

    /// Write the last table to `path` as CSV
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No render has succeeded in this session
    /// - The file cannot be written
    pub fn export_last(&self, path: &Path) -> Result<()> {
        let table = self
            .last_table
            .as_ref()
            .ok_or_else(|| persistence_error("export", &"no render has succeeded yet"))?;
        export_table_csv(table.entries(), path)
    }
}

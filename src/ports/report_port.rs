//! Report generation port trait.

use crate::domain::error::DcasimError;
use crate::domain::simulation::InvestmentHistory;
use crate::domain::summary::Summary;
use std::path::Path;

/// Port for writing simulation reports.
pub trait ReportPort {
    fn write(
        &self,
        history: &InvestmentHistory,
        summary: &Summary,
        output_path: &Path,
    ) -> Result<(), DcasimError>;
}

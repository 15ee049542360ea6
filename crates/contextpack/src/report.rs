use serde::{Deserialize, Serialize};

/// What a single reduction cut away. Sizes are characters of the compact
/// JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionReport {
    pub raw_chars: usize,
    pub reduced_chars: usize,
    /// Audits kept in the reduced report.
    pub audits: usize,
    /// `details.items` entries replaced by their count.
    pub items_elided: usize,
    /// Strings replaced by an oversized-value placeholder.
    pub oversized_values: usize,
}

impl ReductionReport {
    /// Emit as a structured trace event.
    pub fn emit(&self) {
        lh_domain::trace::TraceEvent::ReportReduced {
            raw_chars: self.raw_chars,
            reduced_chars: self.reduced_chars,
            audits: self.audits,
            items_elided: self.items_elided,
            oversized_values: self.oversized_values,
        }
        .emit();
    }
}

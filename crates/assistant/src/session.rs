//! Caller-owned chat state: the loaded reports and the conversation.

use std::path::Path;

use lh_contextpack::{parse_report, ValidatedReport};
use lh_domain::config::clamp_temperature;
use lh_domain::error::{Error, Result};
use lh_domain::message::Message;

use crate::runtime::ReportSummary;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Loaded reports
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A validated report plus its summary once one has been computed.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub name: String,
    pub validated: ValidatedReport,
    pub summary: Option<ReportSummary>,
}

impl LoadedReport {
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_ref().map(|s| s.text.as_str())
    }

    /// No summary yet, or only the fallback from a failed run.
    pub fn needs_summary(&self) -> bool {
        self.summary.as_ref().map_or(true, |s| s.degraded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// A report with the same name was already loaded; nothing changed.
    AlreadyLoaded,
}

/// Reports keyed by file name, in load order.
#[derive(Debug, Clone, Default)]
pub struct ReportSet {
    reports: Vec<LoadedReport>,
}

impl ReportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `json_text` and add it under `name`.
    ///
    /// Validation runs before anything is touched, so a rejected report
    /// leaves the set exactly as it was.
    pub fn load(&mut self, name: impl Into<String>, json_text: &str) -> Result<LoadOutcome> {
        let name = name.into();
        let validated = parse_report(json_text)?;

        if self.contains(&name) {
            tracing::debug!(report = %name, "report already loaded");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        tracing::info!(report = %name, version = %validated.lighthouse_version, "report loaded");
        self.reports.push(LoadedReport {
            name,
            validated,
            summary: None,
        });
        Ok(LoadOutcome::Loaded)
    }

    /// Read and load a report file, named by its file name.
    pub fn load_file(&mut self, path: &Path) -> Result<(String, LoadOutcome)> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidInput(format!("not a file path: {}", path.display())))?
            .to_string();
        let text = std::fs::read_to_string(path)?;
        let outcome = self.load(name.clone(), &text)?;
        Ok((name, outcome))
    }

    /// Remove a report. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| r.name != name);
        self.reports.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reports.iter().any(|r| r.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&LoadedReport> {
        self.reports.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.reports.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedReport> {
        self.reports.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LoadedReport> {
        self.reports.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Chat session
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Loaded reports plus the append-only conversation.
///
/// Load and remove notes are recorded as assistant messages, so they are
/// part of the history sent with the next question.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub reports: ReportSet,
    history: Vec<Message>,
    temperature: f32,
}

impl ChatSession {
    pub fn new(temperature: f32) -> Self {
        Self {
            reports: ReportSet::new(),
            history: Vec::new(),
            temperature: clamp_temperature(temperature),
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Set the answer temperature, clamped to the supported range.
    /// Returns the value actually stored.
    pub fn set_temperature(&mut self, t: f32) -> f32 {
        self.temperature = clamp_temperature(t);
        self.temperature
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.history.push(Message::user(text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.history.push(Message::assistant(text));
    }

    /// Load a report from disk and note it in the history.
    pub fn load_file(&mut self, path: &Path) -> Result<LoadOutcome> {
        let (_, outcome) = self.reports.load_file(path)?;
        if outcome == LoadOutcome::Loaded {
            self.note_loaded();
        }
        Ok(outcome)
    }

    /// Load report text and note it in the history.
    pub fn load(&mut self, name: impl Into<String>, json_text: &str) -> Result<LoadOutcome> {
        let outcome = self.reports.load(name, json_text)?;
        if outcome == LoadOutcome::Loaded {
            self.note_loaded();
        }
        Ok(outcome)
    }

    /// Remove a report and note it in the history.
    pub fn remove(&mut self, name: &str) -> bool {
        if !self.reports.remove(name) {
            return false;
        }
        let remaining = self.reports.len();
        let note = if remaining > 0 {
            format!("Report removed. {remaining} report(s) still loaded.")
        } else {
            "Report removed. No reports are currently loaded.".to_string()
        };
        self.push_assistant(note);
        true
    }

    fn note_loaded(&mut self) {
        let note = match self.reports.names().as_slice() {
            [only] => format!(
                "Report loaded: **{only}**. You can now ask me about the analysis."
            ),
            names => format!(
                "{} reports loaded. I can analyze any of them.",
                names.len()
            ),
        };
        self.push_assistant(note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{"lighthouseVersion":"11.0","categories":{"performance":{"score":0.5}}}"#;

    #[test]
    fn rejected_report_leaves_set_untouched() {
        let mut set = ReportSet::new();
        set.load("home.json", REPORT).unwrap();

        let err = set.load("bad.json", "not json").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(set.names(), vec!["home.json"]);
    }

    #[test]
    fn duplicate_name_is_already_loaded() {
        let mut set = ReportSet::new();
        assert_eq!(set.load("home.json", REPORT).unwrap(), LoadOutcome::Loaded);
        assert_eq!(
            set.load("home.json", REPORT).unwrap(),
            LoadOutcome::AlreadyLoaded
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn load_order_is_kept() {
        let mut set = ReportSet::new();
        for name in ["c.json", "a.json", "b.json"] {
            set.load(name, REPORT).unwrap();
        }
        assert_eq!(set.names(), vec!["c.json", "a.json", "b.json"]);
        assert!(set.remove("a.json"));
        assert!(!set.remove("a.json"));
        assert_eq!(set.names(), vec!["c.json", "b.json"]);
    }

    #[test]
    fn session_notes_loads_and_removals() {
        let mut session = ChatSession::new(0.7);
        session.load("home.json", REPORT).unwrap();
        session.load("blog.json", REPORT).unwrap();
        session.load("blog.json", REPORT).unwrap();
        session.remove("home.json");
        session.remove("blog.json");

        let notes: Vec<&str> = session.history().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            notes,
            vec![
                "Report loaded: **home.json**. You can now ask me about the analysis.",
                "2 reports loaded. I can analyze any of them.",
                "Report removed. 1 report(s) still loaded.",
                "Report removed. No reports are currently loaded.",
            ]
        );
    }

    #[test]
    fn temperature_is_clamped() {
        let mut session = ChatSession::new(5.0);
        assert_eq!(session.temperature(), 2.0);
        assert_eq!(session.set_temperature(-0.5), 0.0);
    }
}

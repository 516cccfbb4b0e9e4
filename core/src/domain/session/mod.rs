//! Finite-state model of one user's analysis session.
//!
//! The presentation layer owns an [`AnalysisSession`] and moves it only by
//! applying [`SessionEvent`]s; there are no free-standing mode flags.

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::analysis::entities::{BarcodeVerdict, CanonicalComparison, CanonicalVerdict};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Input,
    Camera,
    Scanning,
    Loading,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Verdict(CanonicalVerdict),
    Barcode(BarcodeVerdict),
    Comparison(CanonicalComparison),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    OpenCamera,
    OpenScanner,
    Captured,
    Close,
    Submit,
    Success(Box<AnalysisOutcome>),
    Failure(String),
    Reset,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::OpenCamera => "open_camera",
            SessionEvent::OpenScanner => "open_scanner",
            SessionEvent::Captured => "captured",
            SessionEvent::Close => "close",
            SessionEvent::Submit => "submit",
            SessionEvent::Success(_) => "success",
            SessionEvent::Failure(_) => "failure",
            SessionEvent::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("an analysis is already in flight")]
    RequestInFlight,

    #[error("event '{event}' is not allowed in mode {mode:?}")]
    InvalidTransition {
        mode: SessionMode,
        event: &'static str,
    },
}

/// Which optional result blocks should be rendered for a verdict.
/// Absent fields produce no block at all, never an empty placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictView {
    pub show_flags: bool,
    pub show_shock_comparison: bool,
    pub show_alternative: bool,
    pub show_pro_tip: bool,
}

impl From<&CanonicalVerdict> for VerdictView {
    fn from(verdict: &CanonicalVerdict) -> Self {
        Self {
            show_flags: !verdict.flags.is_empty(),
            show_shock_comparison: verdict.shock_comparison.is_some(),
            show_alternative: verdict.alternative_category.is_some()
                || verdict.alternative_product.is_some(),
            show_pro_tip: verdict.pro_tip.is_some(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AnalysisSession {
    mode: SessionMode,
    outcome: Option<AnalysisOutcome>,
    error: Option<String>,
    in_flight: Option<CancellationToken>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Token for the request currently in flight, if any.
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        self.in_flight.clone()
    }

    pub fn cancel(&self) {
        if let Some(token) = &self.in_flight {
            token.cancel();
        }
    }

    pub fn verdict_view(&self) -> Option<VerdictView> {
        match self.outcome.as_ref()? {
            AnalysisOutcome::Verdict(verdict) => Some(VerdictView::from(verdict)),
            AnalysisOutcome::Barcode(barcode) => Some(VerdictView::from(&barcode.verdict)),
            AnalysisOutcome::Comparison(_) => None,
        }
    }

    /// Applies an event. Rejected events leave the session untouched.
    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionMode, SessionError> {
        use SessionEvent as E;
        use SessionMode as M;

        let next = match (self.mode, event) {
            (M::Input, E::OpenCamera) => M::Camera,
            (M::Input, E::OpenScanner) => M::Scanning,
            (M::Camera | M::Scanning, E::Close | E::Captured) => M::Input,
            (M::Loading, E::Submit) => return Err(SessionError::RequestInFlight),
            (M::Input | M::Scanning, E::Submit) => {
                self.error = None;
                self.outcome = None;
                self.in_flight = Some(CancellationToken::new());
                M::Loading
            }
            (M::Loading, E::Success(outcome)) => {
                self.in_flight = None;
                self.outcome = Some(*outcome);
                M::Results
            }
            (M::Loading, E::Failure(message)) => {
                self.in_flight = None;
                self.error = Some(message);
                M::Input
            }
            (M::Results | M::Input, E::Reset) => {
                self.outcome = None;
                self.error = None;
                M::Input
            }
            (mode, event) => {
                return Err(SessionError::InvalidTransition {
                    mode,
                    event: event.name(),
                });
            }
        };

        self.mode = next;
        Ok(next)
    }
}

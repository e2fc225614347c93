use std::fmt;

/// Lifecycle of a scan. Phases only ever move forward.
///
/// `Idle → Expanding → ProbingLiveness → ProbingPorts → Reporting → Done`,
/// with `Failed` reachable from every non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanPhase {
    Idle,
    Expanding,
    ProbingLiveness,
    ProbingPorts,
    Reporting,
    Done,
    Failed,
}

impl ScanPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanPhase::Done | ScanPhase::Failed)
    }

    /// The phase that follows `self` on the success path.
    pub fn successor(self) -> Option<ScanPhase> {
        match self {
            ScanPhase::Idle => Some(ScanPhase::Expanding),
            ScanPhase::Expanding => Some(ScanPhase::ProbingLiveness),
            ScanPhase::ProbingLiveness => Some(ScanPhase::ProbingPorts),
            ScanPhase::ProbingPorts => Some(ScanPhase::Reporting),
            ScanPhase::Reporting => Some(ScanPhase::Done),
            ScanPhase::Done | ScanPhase::Failed => None,
        }
    }

    pub fn can_advance_to(self, next: ScanPhase) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == ScanPhase::Failed || self.successor() == Some(next)
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Expanding => "expanding",
            ScanPhase::ProbingLiveness => "probing liveness",
            ScanPhase::ProbingPorts => "probing ports",
            ScanPhase::Reporting => "reporting",
            ScanPhase::Done => "done",
            ScanPhase::Failed => "failed",
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

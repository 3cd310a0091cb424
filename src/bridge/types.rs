use std::fmt;

/// Stages of a single bridge run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Validating,
    Prompting,
    Calling,
    Extracting,
    Normalizing,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageKind::Validating => "validating",
            StageKind::Prompting => "prompting",
            StageKind::Calling => "calling",
            StageKind::Extracting => "extracting",
            StageKind::Normalizing => "normalizing",
        };
        write!(f, "{label}")
    }
}

//! Artifact store layers (spec.md §6).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Layer {
    Landing,
    Staging,
    Operational,
    Analytics,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Layer::Landing => "landing",
            Layer::Staging => "staging",
            Layer::Operational => "operational",
            Layer::Analytics => "analytics",
        };
        write!(f, "{s}")
    }
}

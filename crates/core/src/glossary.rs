/// A glossary term and its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub term: &'static str,
    pub definition: &'static str,
}

pub const GLOSSARY: &[GlossaryEntry] = &[
    GlossaryEntry {
        term: "Stream",
        definition: "One simulated time series with a fixed-size sliding window of recent samples.",
    },
    GlossaryEntry {
        term: "Window",
        definition: "The 20 most recent samples of a stream, newest first.",
    },
    GlossaryEntry {
        term: "Tick",
        definition: "One step of the simulation; every stream receives a new sample.",
    },
    GlossaryEntry {
        term: "Offset",
        definition: "A sample's age in ticks relative to the newest sample (0 = newest).",
    },
    GlossaryEntry {
        term: "Rate",
        definition: "Ticks per second, between 1 and 100.",
    },
    GlossaryEntry {
        term: "Alert",
        definition: "A short-lived notification that disappears after five seconds.",
    },
];

/// Case-insensitive lookup of a glossary term.
pub fn lookup(term: &str) -> Option<&'static GlossaryEntry> {
    GLOSSARY.iter().find(|e| e.term.eq_ignore_ascii_case(term))
}

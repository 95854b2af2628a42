use serde::{Deserialize, Serialize};

/// The three flat content slots the service publishes. Each kind is a
/// single-table keyed store where only the newest row is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    News,
    Competitions,
    Schedule,
}

impl ContentKind {
    pub fn table(&self) -> &'static str {
        match self {
            ContentKind::News => "news",
            ContentKind::Competitions => "competitions",
            ContentKind::Schedule => "schedule",
        }
    }

    /// Natural-key column, UNIQUE in the table.
    pub fn key_column(&self) -> &'static str {
        match self {
            ContentKind::News => "title",
            ContentKind::Competitions => "name",
            ContentKind::Schedule => "event",
        }
    }

    pub fn value_column(&self) -> &'static str {
        match self {
            ContentKind::News => "content",
            ContentKind::Competitions => "date",
            ContentKind::Schedule => "time",
        }
    }
}

/// One key/value pair in a content slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub key: String,
    pub value: String,
}

impl ContentRecord {
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_name_distinct_tables() {
        let tables = [
            ContentKind::News.table(),
            ContentKind::Competitions.table(),
            ContentKind::Schedule.table(),
        ];
        assert_eq!(tables, ["news", "competitions", "schedule"]);
    }
}

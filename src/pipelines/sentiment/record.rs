use std::fmt::Debug;

/// A trait for labeled records that can train or evaluate the sentiment
/// pipeline
pub trait Record: Send + Sync + Clone + Debug {
    /// Returns the text of the record
    fn text(&self) -> &str;

    /// Returns true when the record is labeled positive
    fn label(&self) -> bool;
}

impl Record for (String, bool) {
    fn text(&self) -> &str {
        &self.0
    }

    fn label(&self) -> bool {
        self.1
    }
}

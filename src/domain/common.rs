//! Traits shared by records that aggregations look up and label.

/// Records addressed by an opaque string id assigned by the store.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Records that have a label to show in reports.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

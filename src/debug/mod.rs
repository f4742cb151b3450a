mod binding;
pub mod ui;

pub use binding::{ActionFn, ChangeFn, DebugPanel, Getter, Property, PropertyKind, PropertyValue, Setter};

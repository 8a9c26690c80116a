//! # Dependency edges.
//!
//! A [`Dependency`] names another registered component that must be started
//! first. Required edges participate in resolution errors; optional edges
//! order startup when the target happens to be registered and are ignored
//! when it is not.

/// # A startup-ordering edge to another component.
///
/// Declared by [`Component::dependencies`](crate::Component::dependencies).
///
/// ## Rules
/// - A **required** edge whose target is not registered fails resolution.
/// - An **optional** edge whose target is not registered is skipped; when the
///   target is present, it constrains ordering exactly like a required edge
///   (and can therefore participate in a cycle).
///
/// # Example
/// ```
/// use muster::Dependency;
///
/// let hard = Dependency::required("config");
/// let soft = Dependency::optional("metrics");
/// assert!(hard.is_required());
/// assert!(!soft.is_required());
/// assert_eq!(soft.name(), "metrics");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    name: String,
    required: bool,
}

impl Dependency {
    /// Declares an edge that must be satisfiable: resolution fails if `name`
    /// is not registered.
    pub fn required(name: impl Into<String>) -> Self {
        Dependency {
            name: name.into(),
            required: true,
        }
    }

    /// Declares an edge that orders startup only when `name` is registered.
    pub fn optional(name: impl Into<String>) -> Self {
        Dependency {
            name: name.into(),
            required: false,
        }
    }

    /// Returns the name of the component this edge points at.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for edges that fail resolution when unsatisfied.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

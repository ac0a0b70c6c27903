//! Display-name lookup used to label blocks.

use std::collections::HashMap;

use af_core::entities::AudienceScope;
use af_core::enums::ScopeKind;

/// Read-only name resolution for audiences and courses.
///
/// Implemented by [`NameDirectory`], a snapshot the store layer fills before
/// calling the engine so that the engine itself never performs I/O.
pub trait NameLookup {
    /// Name of the group or subgroup behind `scope`.
    fn audience_name(&self, scope: &AudienceScope) -> Option<&str>;

    /// Name of a course.
    fn course_name(&self, course_id: &str) -> Option<&str>;
}

/// In-memory name snapshot keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDirectory {
    groups: HashMap<String, String>,
    subgroups: HashMap<String, String>,
    courses: HashMap<String, String>,
}

impl NameDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_group(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.groups.insert(id.into(), name.into());
    }

    pub fn insert_subgroup(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.subgroups.insert(id.into(), name.into());
    }

    pub fn insert_course(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.courses.insert(id.into(), name.into());
    }

    #[must_use]
    pub fn with_group(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert_group(id, name);
        self
    }

    #[must_use]
    pub fn with_subgroup(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert_subgroup(id, name);
        self
    }

    #[must_use]
    pub fn with_course(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert_course(id, name);
        self
    }
}

impl NameLookup for NameDirectory {
    fn audience_name(&self, scope: &AudienceScope) -> Option<&str> {
        match scope.kind {
            ScopeKind::Group => self.groups.get(&scope.id).map(String::as_str),
            ScopeKind::Subgroup => self.subgroups.get(&scope.id).map(String::as_str),
            ScopeKind::Unknown => None,
        }
    }

    fn course_name(&self, course_id: &str) -> Option<&str> {
        self.courses.get(course_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_scope_kind() {
        let names = NameDirectory::new()
            .with_group("g1", "Batch 21")
            .with_subgroup("g1", "clash");
        assert_eq!(names.audience_name(&AudienceScope::group("g1")), Some("Batch 21"));
        assert_eq!(names.audience_name(&AudienceScope::subgroup("g1")), Some("clash"));
        let unknown = AudienceScope {
            kind: ScopeKind::Unknown,
            id: "g1".into(),
        };
        assert_eq!(names.audience_name(&unknown), None);
    }
}

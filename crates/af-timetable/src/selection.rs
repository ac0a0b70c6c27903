//! The audience a timetable is viewed for.

use std::collections::BTreeSet;

use af_core::entities::AudienceScope;
use af_core::enums::ScopeKind;
use serde::Serialize;

use crate::error::TimetableError;

/// Current group/subgroup choice plus the subgroup membership of the group.
///
/// Constructed only through validating constructors so that a subgroup is
/// always paired with its parent group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    group_id: Option<String>,
    subgroup_id: Option<String>,
    subgroup_ids_of_group: BTreeSet<String>,
}

impl Selection {
    /// Nothing selected. Every cell is open and no event is placed.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A whole group, together with the ids of all its subgroups.
    pub fn group<I, S>(group_id: impl Into<String>, subgroup_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group_id: Some(group_id.into()),
            subgroup_id: None,
            subgroup_ids_of_group: subgroup_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// One subgroup of a group.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::InvalidSelection`] if `subgroup_id` is not in
    /// `subgroup_ids`.
    pub fn subgroup<I, S>(
        group_id: impl Into<String>,
        subgroup_id: impl Into<String>,
        subgroup_ids: I,
    ) -> Result<Self, TimetableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::group(group_id, subgroup_ids);
        let subgroup_id = subgroup_id.into();
        if !selection.subgroup_ids_of_group.contains(&subgroup_id) {
            return Err(TimetableError::InvalidSelection(format!(
                "subgroup {subgroup_id} is not a child of group {}",
                selection.group_id.as_deref().unwrap_or_default()
            )));
        }
        selection.subgroup_id = Some(subgroup_id);
        Ok(selection)
    }

    /// Build from optional ids as they arrive from a caller.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::InvalidSelection`] when a subgroup is given
    /// without a group, or is not a child of the group.
    pub fn from_parts<I, S>(
        group_id: Option<String>,
        subgroup_id: Option<String>,
        subgroup_ids: I,
    ) -> Result<Self, TimetableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match (group_id, subgroup_id) {
            (None, None) => Ok(Self::none()),
            (None, Some(subgroup_id)) => Err(TimetableError::InvalidSelection(format!(
                "subgroup {subgroup_id} selected without a group"
            ))),
            (Some(group_id), None) => Ok(Self::group(group_id, subgroup_ids)),
            (Some(group_id), Some(subgroup_id)) => {
                Self::subgroup(group_id, subgroup_id, subgroup_ids)
            }
        }
    }

    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    #[must_use]
    pub fn subgroup_id(&self) -> Option<&str> {
        self.subgroup_id.as_deref()
    }

    #[must_use]
    pub const fn subgroup_ids_of_group(&self) -> &BTreeSet<String> {
        &self.subgroup_ids_of_group
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.group_id.is_none()
    }

    /// Whether an event with this scope covers cells in the current view.
    #[must_use]
    pub fn occupies(&self, scope: &AudienceScope) -> bool {
        let Some(group_id) = self.group_id.as_deref() else {
            return false;
        };
        match scope.kind {
            ScopeKind::Group => scope.id == group_id,
            ScopeKind::Subgroup => match self.subgroup_id.as_deref() {
                Some(subgroup_id) => scope.id == subgroup_id,
                None => self.subgroup_ids_of_group.contains(&scope.id),
            },
            ScopeKind::Unknown => false,
        }
    }

    /// Whether an event with this scope is the exact audience of the view and
    /// renders in full.
    #[must_use]
    pub fn describes(&self, scope: &AudienceScope) -> bool {
        self.exact_scope()
            .is_some_and(|exact| scope.is(exact.kind, &exact.id))
    }

    /// The scope new events created from this view are assigned to.
    #[must_use]
    pub fn exact_scope(&self) -> Option<AudienceScope> {
        match (&self.group_id, &self.subgroup_id) {
            (_, Some(subgroup_id)) => Some(AudienceScope::subgroup(subgroup_id.clone())),
            (Some(group_id), None) => Some(AudienceScope::group(group_id.clone())),
            (None, None) => None,
        }
    }
}

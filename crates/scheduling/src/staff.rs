use std::collections::HashMap;

use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::StaffMember;

#[derive(
    EnumString, Display, VariantArray, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq,
)]
#[strum(serialize_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Group,
    Individual,
}

/// The staff scoping of a planning view: the whole team, or one member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffScope {
    pub mode: ViewMode,
    pub selected: Option<String>,
}

impl StaffScope {
    pub fn group() -> Self {
        Self::default()
    }

    pub fn individual(staff_id: impl Into<String>) -> Self {
        Self {
            mode: ViewMode::Individual,
            selected: Some(staff_id.into()),
        }
    }

    /// The staff members this scope displays, as a fresh list.
    ///
    /// Individual mode without a selection is the empty list: the view never
    /// falls back to showing the whole team.
    pub fn visible(&self, staff: &[StaffMember]) -> Vec<StaffMember> {
        match self.mode {
            ViewMode::Group => staff.to_vec(),
            ViewMode::Individual => match self.selected.as_deref() {
                Some(selected) => staff
                    .iter()
                    .filter(|member| member.id == selected)
                    .cloned()
                    .collect(),
                None => Vec::new(),
            },
        }
    }

    /// The staff id the slot grid should be filtered by, if any. A selection
    /// left over from individual mode does not filter the group view.
    pub fn filter_id(&self) -> Option<&str> {
        match self.mode {
            ViewMode::Group => None,
            ViewMode::Individual => self.selected.as_deref(),
        }
    }
}

/// Display colors by staff id, for tagging grid buckets.
#[derive(Debug, Default)]
pub struct StaffPalette {
    colors: HashMap<String, String>,
}

impl StaffPalette {
    pub fn new(staff: &[StaffMember]) -> Self {
        Self {
            colors: staff
                .iter()
                .map(|member| (member.id.clone(), member.color.clone()))
                .collect(),
        }
    }

    pub fn color_for(&self, staff_id: Option<&str>) -> Option<&str> {
        staff_id
            .and_then(|id| self.colors.get(id))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Vec<StaffMember> {
        vec![
            StaffMember {
                id: "s1".to_owned(),
                first_name: "Ines".to_owned(),
                last_name: "Morel".to_owned(),
                color: "#a855f7".to_owned(),
                specialties: vec!["coloration".to_owned()],
            },
            StaffMember {
                id: "s2".to_owned(),
                first_name: "Lucas".to_owned(),
                last_name: "Robin".to_owned(),
                color: "#f59e0b".to_owned(),
                specialties: vec![],
            },
        ]
    }

    #[test]
    fn group_mode_shows_everyone_and_filters_nothing() {
        let scope = StaffScope::group();

        assert_eq!(scope.visible(&team()).len(), 2);
        assert_eq!(scope.filter_id(), None);
    }

    #[test]
    fn individual_mode_shows_only_the_selection() {
        let scope = StaffScope::individual("s2");

        let visible = scope.visible(&team());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "s2");
        assert_eq!(scope.filter_id(), Some("s2"));
    }

    #[test]
    fn individual_mode_without_selection_is_empty() {
        let scope = StaffScope {
            mode: ViewMode::Individual,
            selected: None,
        };

        assert!(scope.visible(&team()).is_empty());
        assert_eq!(scope.filter_id(), None);
    }

    #[test]
    fn stale_selection_does_not_leak_into_group_mode() {
        let scope = StaffScope {
            mode: ViewMode::Group,
            selected: Some("s1".to_owned()),
        };

        assert_eq!(scope.visible(&team()).len(), 2);
        assert_eq!(scope.filter_id(), None);
    }

    #[test]
    fn visible_returns_a_fresh_list() {
        let staff = team();
        let scope = StaffScope::group();

        let first = scope.visible(&staff);
        let second = scope.visible(&staff);
        assert_eq!(first, second);
        assert_eq!(staff.len(), 2);
    }

    #[test]
    fn palette_maps_staff_ids_to_colors() {
        let palette = StaffPalette::new(&team());

        assert_eq!(palette.color_for(Some("s1")), Some("#a855f7"));
        assert_eq!(palette.color_for(Some("missing")), None);
        assert_eq!(palette.color_for(None), None);
    }
}

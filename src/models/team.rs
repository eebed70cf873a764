//! Registered teams and the group draw.

use serde::{Deserialize, Serialize};

use super::Group;

/// A registered team and, once groups are drawn, its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    #[serde(default)]
    pub group: Option<Group>,
}

impl TeamEntry {
    pub fn new(name: String) -> Self {
        Self { name, group: None }
    }

    pub fn in_group(mut self, group: Group) -> Self {
        self.group = Some(group);
        self
    }
}

/// Group membership in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraw {
    pub group_a: Vec<String>,
    pub group_b: Vec<String>,
}

impl GroupDraw {
    /// Rebuild the draw from registered teams. `None` until at least one
    /// team has been assigned a group.
    pub fn from_entries(entries: &[TeamEntry]) -> Option<Self> {
        let mut draw = GroupDraw::default();
        for entry in entries {
            match entry.group {
                Some(Group::A) => draw.group_a.push(entry.name.clone()),
                Some(Group::B) => draw.group_b.push(entry.name.clone()),
                Some(Group::Final) | None => {}
            }
        }

        if draw.group_a.is_empty() && draw.group_b.is_empty() {
            None
        } else {
            Some(draw)
        }
    }

    pub fn teams(&self, group: Group) -> &[String] {
        match group {
            Group::A => &self.group_a,
            Group::B => &self.group_b,
            Group::Final => &[],
        }
    }
}

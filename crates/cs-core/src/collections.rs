//! Skill, title and keyword sets owned by a creature.
//!
//! All three are keyed sets: adding an id that is already present replaces
//! the entry. Iteration order is ascending by id so saves are deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// Skill rank; lower is weaker. `NOVICE` is the lowest rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillRank(pub u8);

impl SkillRank {
    pub const NOVICE: SkillRank = SkillRank(0);
    pub const R1: SkillRank = SkillRank(15);
}

/// Skill id of the baseline skill every creature carries.
pub const SKILL_GATHERING: u16 = 50127;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: u16,
    pub rank: SkillRank,
    pub experience: i32,
}

impl Skill {
    pub fn new(id: u16, rank: SkillRank) -> Self {
        Self {
            id,
            rank,
            experience: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    skills: BTreeMap<u16, Skill>,
}

impl SkillSet {
    /// Add or replace a skill.
    pub fn add(&mut self, skill: Skill) {
        self.skills.insert(skill.id, skill);
    }

    pub fn get(&self, id: u16) -> Option<&Skill> {
        self.skills.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

/// Whether a title can be worn or is merely known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleState {
    Known,
    Usable,
}

impl TitleState {
    pub fn from_usable(usable: bool) -> Self {
        if usable {
            TitleState::Usable
        } else {
            TitleState::Known
        }
    }

    pub fn is_usable(self) -> bool {
        self == TitleState::Usable
    }
}

/// Titles a creature holds, plus the two selected slots.
///
/// Holding a title and wearing it are separate: selection goes through
/// [`TitleSet::change_title`], which only accepts usable titles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleSet {
    titles: BTreeMap<u16, TitleState>,
    selected: Option<u16>,
    selected_option: Option<u16>,
}

impl TitleSet {
    /// Add or replace a title.
    pub fn add(&mut self, id: u16, state: TitleState) {
        self.titles.insert(id, state);
    }

    pub fn state(&self, id: u16) -> Option<TitleState> {
        self.titles.get(&id).copied()
    }

    pub fn contains(&self, id: u16) -> bool {
        self.titles.contains_key(&id)
    }

    /// Select `id` as the main title, or as the option title when `option`
    /// is set. Returns false if the title is not held as usable.
    pub fn change_title(&mut self, id: u16, option: bool) -> bool {
        if !self.state(id).is_some_and(TitleState::is_usable) {
            return false;
        }
        if option {
            self.selected_option = Some(id);
        } else {
            self.selected = Some(id);
        }
        true
    }

    /// Clear both selections.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.selected_option = None;
    }

    pub fn selected(&self) -> Option<u16> {
        self.selected
    }

    pub fn selected_option(&self) -> Option<u16> {
        self.selected_option
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, TitleState)> + '_ {
        self.titles.iter().map(|(id, state)| (*id, *state))
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    keywords: BTreeSet<u16>,
}

impl KeywordSet {
    pub fn add(&mut self, id: u16) {
        self.keywords.insert(id);
    }

    pub fn contains(&self, id: u16) -> bool {
        self.keywords.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.keywords.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_add_replaces() {
        let mut skills = SkillSet::default();
        skills.add(Skill::new(1, SkillRank::NOVICE));
        skills.add(Skill::new(1, SkillRank::R1));
        assert_eq!(skills.len(), 1);
        assert_eq!(skills.get(1).unwrap().rank, SkillRank::R1);
    }

    #[test]
    fn change_title_requires_usable() {
        let mut titles = TitleSet::default();
        titles.add(10, TitleState::Known);
        titles.add(11, TitleState::Usable);

        assert!(!titles.change_title(10, false));
        assert!(!titles.change_title(99, false));
        assert_eq!(titles.selected(), None);

        assert!(titles.change_title(11, false));
        assert!(titles.change_title(11, true));
        assert_eq!(titles.selected(), Some(11));
        assert_eq!(titles.selected_option(), Some(11));

        titles.clear_selection();
        assert_eq!(titles.selected(), None);
        assert_eq!(titles.selected_option(), None);
    }

    #[test]
    fn title_state_from_flag() {
        assert_eq!(TitleState::from_usable(true), TitleState::Usable);
        assert_eq!(TitleState::from_usable(false), TitleState::Known);
    }

    #[test]
    fn keywords_are_a_set() {
        let mut kw = KeywordSet::default();
        kw.add(3);
        kw.add(1);
        kw.add(3);
        assert_eq!(kw.iter().collect::<Vec<_>>(), vec![1, 3]);
        assert!(kw.contains(1));
    }
}

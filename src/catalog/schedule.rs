use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SCHEDULE_YAML: &str = include_str!("data/schedule.yaml");

/// Length of the curriculum; the last day is the final challenge.
pub const CHALLENGE_DAYS: u8 = 7;

/// Element selection for one curriculum day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDayElements", into = "RawDayElements")]
pub enum DayElements {
    All,
    Ids(Vec<u8>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawDayElements {
    Keyword(String),
    Ids(Vec<u8>),
}

impl TryFrom<RawDayElements> for DayElements {
    type Error = String;

    fn try_from(raw: RawDayElements) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawDayElements::Ids(ids) => Ok(DayElements::Ids(ids)),
            RawDayElements::Keyword(word) if word == "all" => Ok(DayElements::All),
            RawDayElements::Keyword(word) => Err(format!("unknown element selector '{word}'")),
        }
    }
}

impl From<DayElements> for RawDayElements {
    fn from(value: DayElements) -> Self {
        match value {
            DayElements::All => RawDayElements::Keyword("all".into()),
            DayElements::Ids(ids) => RawDayElements::Ids(ids),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: u8,
    pub title: String,
    pub description: String,
    pub focus: String,
    pub elements: DayElements,
}

impl DaySchedule {
    pub fn is_final_challenge(&self) -> bool {
        matches!(self.elements, DayElements::All)
    }
}

/// Day number to element subset mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    days: Vec<DaySchedule>,
}

impl Schedule {
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(SCHEDULE_YAML).context("Failed to parse built-in daily schedule")
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut days: Vec<DaySchedule> = serde_yaml::from_str(yaml)?;
        days.sort_by_key(|d| d.day);
        Ok(Self { days })
    }

    pub fn new(days: Vec<DaySchedule>) -> Self {
        Self { days }
    }

    pub fn day(&self, day: u8) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }
}

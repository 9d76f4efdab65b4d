//! Read-only periodic table reference data.
//!
//! The catalog is compiled into the crate from `data/elements.yaml` and is
//! handed to the quiz engine explicitly through [`ElementLookup`], so tests can
//! swap in small synthetic catalogs.

pub mod schedule;

pub use schedule::{DayElements, DaySchedule, Schedule, CHALLENGE_DAYS};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ELEMENTS_YAML: &str = include_str!("data/elements.yaml");

/// Chemical classification used by the curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementCategory {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    ReactiveNonmetal,
    NobleGas,
    Lanthanide,
    Actinide,
}

impl ElementCategory {
    pub const ALL: [ElementCategory; 9] = [
        ElementCategory::AlkaliMetal,
        ElementCategory::AlkalineEarthMetal,
        ElementCategory::TransitionMetal,
        ElementCategory::PostTransitionMetal,
        ElementCategory::Metalloid,
        ElementCategory::ReactiveNonmetal,
        ElementCategory::NobleGas,
        ElementCategory::Lanthanide,
        ElementCategory::Actinide,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ElementCategory::AlkaliMetal => "alkali-metal",
            ElementCategory::AlkalineEarthMetal => "alkaline-earth-metal",
            ElementCategory::TransitionMetal => "transition-metal",
            ElementCategory::PostTransitionMetal => "post-transition-metal",
            ElementCategory::Metalloid => "metalloid",
            ElementCategory::ReactiveNonmetal => "reactive-nonmetal",
            ElementCategory::NobleGas => "noble-gas",
            ElementCategory::Lanthanide => "lanthanide",
            ElementCategory::Actinide => "actinide",
        }
    }

    /// Human readable label, also used verbatim as a multiple-choice option.
    pub fn display_name(self) -> &'static str {
        match self {
            ElementCategory::AlkaliMetal => "Alkali Metal",
            ElementCategory::AlkalineEarthMetal => "Alkaline Earth Metal",
            ElementCategory::TransitionMetal => "Transition Metal",
            ElementCategory::PostTransitionMetal => "Post-transition Metal",
            ElementCategory::Metalloid => "Metalloid",
            ElementCategory::ReactiveNonmetal => "Reactive Nonmetal",
            ElementCategory::NobleGas => "Noble Gas",
            ElementCategory::Lanthanide => "Lanthanide",
            ElementCategory::Actinide => "Actinide",
        }
    }
}

/// Electron block (highest-energy subshell being filled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    S,
    P,
    D,
    F,
}

impl Block {
    pub const ALL: [Block; 4] = [Block::S, Block::P, Block::D, Block::F];

    pub fn id(self) -> &'static str {
        match self {
            Block::S => "s",
            Block::P => "p",
            Block::D => "d",
            Block::F => "f",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Block::S => "s-block",
            Block::P => "p-block",
            Block::D => "d-block",
            Block::F => "f-block",
        }
    }
}

/// Physical state at room temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalState {
    Solid,
    Liquid,
    Gas,
}

impl PhysicalState {
    pub const ALL: [PhysicalState; 3] = [
        PhysicalState::Solid,
        PhysicalState::Liquid,
        PhysicalState::Gas,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PhysicalState::Solid => "solid",
            PhysicalState::Liquid => "liquid",
            PhysicalState::Gas => "gas",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PhysicalState::Solid => "Solid",
            PhysicalState::Liquid => "Liquid",
            PhysicalState::Gas => "Gas",
        }
    }
}

/// One periodic table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: String,
    pub name: String,
    pub atomic_mass: f64,
    pub group: u8,
    pub period: u8,
    pub block: Block,
    pub category: ElementCategory,
    pub state: PhysicalState,
    pub electron_config: String,
    #[serde(default)]
    pub electronegativity: Option<f64>,
    #[serde(default)]
    pub ionization_energy: Option<f64>,
    #[serde(default)]
    pub atomic_radius: Option<f64>,
    #[serde(default)]
    pub melting_point: Option<f64>,
    #[serde(default)]
    pub boiling_point: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub oxidation_states: Vec<i8>,
    #[serde(default)]
    pub discoverer: Option<String>,
    #[serde(default)]
    pub discovery_year: Option<i32>,
    #[serde(default)]
    pub uses: String,
    #[serde(default)]
    pub fun_facts: Vec<String>,
    #[serde(default)]
    pub history: String,
    pub day_unlocked: u8,
    /// Owned by the progress tracker; the quiz engine never writes it.
    #[serde(default)]
    pub learned: bool,
}

impl Element {
    /// First entry of the comma-separated `uses` list, if any.
    pub fn primary_use(&self) -> Option<&str> {
        self.uses
            .split(',')
            .map(str::trim)
            .find(|token| !token.is_empty())
    }

    /// Discoverer name when it identifies a person rather than antiquity.
    pub fn named_discoverer(&self) -> Option<&str> {
        self.discoverer
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case("ancient"))
    }
}

/// Data-provider seam between the quiz engine and the reference tables.
pub trait ElementLookup {
    fn all_elements(&self) -> Vec<Element>;

    fn elements_for_day(&self, day: u8) -> Vec<Element>;

    fn element(&self, atomic_number: u8) -> Option<Element>;
}

/// Element table plus the curriculum schedule.
#[derive(Debug, Clone)]
pub struct Catalog {
    elements: BTreeMap<u8, Element>,
    schedule: Schedule,
}

impl Catalog {
    /// Loads the compiled-in element table and schedule.
    pub fn builtin() -> Result<Self> {
        let elements = parse_elements(ELEMENTS_YAML).context("Failed to parse built-in element table")?;
        let schedule = Schedule::builtin()?;
        Ok(Self::new(elements, schedule))
    }

    pub fn new(elements: Vec<Element>, schedule: Schedule) -> Self {
        let elements = elements
            .into_iter()
            .map(|el| (el.atomic_number, el))
            .collect();
        Self { elements, schedule }
    }

    pub fn from_yaml(elements_yaml: &str, schedule: Schedule) -> Result<Self> {
        Ok(Self::new(parse_elements(elements_yaml)?, schedule))
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&Element> {
        self.elements.values().find(|el| el.symbol == symbol)
    }

    pub fn by_category(&self, category: ElementCategory) -> Vec<&Element> {
        self.filtered(|el| el.category == category)
    }

    pub fn by_group(&self, group: u8) -> Vec<&Element> {
        self.filtered(|el| el.group == group)
    }

    pub fn by_period(&self, period: u8) -> Vec<&Element> {
        self.filtered(|el| el.period == period)
    }

    pub fn by_block(&self, block: Block) -> Vec<&Element> {
        self.filtered(|el| el.block == block)
    }

    /// Elements whose `day_unlocked` is at or before `day`.
    pub fn unlocked_through(&self, day: u8) -> Vec<&Element> {
        self.filtered(|el| el.day_unlocked <= day)
    }

    pub fn learned(&self) -> Vec<&Element> {
        self.filtered(|el| el.learned)
    }

    /// Applies learning state from the progress tracker.
    pub fn set_learned(&mut self, atomic_number: u8, learned: bool) -> bool {
        match self.elements.get_mut(&atomic_number) {
            Some(el) => {
                el.learned = learned;
                true
            }
            None => false,
        }
    }

    fn filtered(&self, predicate: impl Fn(&Element) -> bool) -> Vec<&Element> {
        self.elements.values().filter(|el| predicate(*el)).collect()
    }
}

impl ElementLookup for Catalog {
    fn all_elements(&self) -> Vec<Element> {
        self.elements.values().cloned().collect()
    }

    fn elements_for_day(&self, day: u8) -> Vec<Element> {
        let Some(entry) = self.schedule.day(day) else {
            return Vec::new();
        };
        match &entry.elements {
            DayElements::All => self.all_elements(),
            DayElements::Ids(ids) => {
                let mut resolved = Vec::with_capacity(ids.len());
                for id in ids {
                    match self.elements.get(id) {
                        Some(el) => resolved.push(el.clone()),
                        None => log::debug!("day {day} lists element {id} missing from catalog"),
                    }
                }
                resolved
            }
        }
    }

    fn element(&self, atomic_number: u8) -> Option<Element> {
        self.elements.get(&atomic_number).cloned()
    }
}

fn parse_elements(yaml: &str) -> Result<Vec<Element>> {
    let elements: Vec<Element> = serde_yaml::from_str(yaml)?;
    for el in &elements {
        if !(1..=118).contains(&el.atomic_number) {
            anyhow::bail!(
                "Element {} has atomic number {} outside 1..=118",
                el.symbol,
                el.atomic_number
            );
        }
    }
    Ok(elements)
}

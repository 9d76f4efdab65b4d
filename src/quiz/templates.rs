//! Sub-templates for each question kind and the text they render.

use serde::{Deserialize, Serialize};

use crate::catalog::{Block, Element, ElementCategory, PhysicalState};

use super::question::SortCategory;

/// Multiple-choice sub-templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceTemplate {
    SymbolToName,
    NameToSymbol,
    AtomicNumber,
    Group,
    Category,
    Period,
    State,
    Discoverer,
    Uses,
}

impl ChoiceTemplate {
    /// Templates drawn uniformly by the randomized generators.
    pub const RANDOM_POOL: [ChoiceTemplate; 5] = [
        ChoiceTemplate::SymbolToName,
        ChoiceTemplate::NameToSymbol,
        ChoiceTemplate::AtomicNumber,
        ChoiceTemplate::Group,
        ChoiceTemplate::Category,
    ];
}

/// Fill-in-the-blank sub-templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankTemplate {
    ElectronConfig,
    AtomicMass,
    Discoverer,
}

impl BlankTemplate {
    pub const RANDOM_POOL: [BlankTemplate; 3] = [
        BlankTemplate::ElectronConfig,
        BlankTemplate::AtomicMass,
        BlankTemplate::Discoverer,
    ];
}

/// Matching sub-templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchTemplate {
    SymbolName,
    ElementUse,
}

impl MatchTemplate {
    pub const RANDOM_POOL: [MatchTemplate; 2] = [MatchTemplate::SymbolName, MatchTemplate::ElementUse];
}

/// Closed category sets a drag-sort question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortTheme {
    Category,
    Block,
    State,
}

impl SortTheme {
    pub const ALL: [SortTheme; 3] = [SortTheme::Category, SortTheme::Block, SortTheme::State];

    pub fn prompt(self) -> &'static str {
        match self {
            SortTheme::Category => "Drag each element to its correct category:",
            SortTheme::Block => "Drag each element to its correct electron block:",
            SortTheme::State => "Drag each element to its physical state at room temperature:",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            SortTheme::Category => "Consider the position of elements in the periodic table.",
            SortTheme::Block => {
                "The block depends on which subshell the outermost electrons occupy."
            }
            SortTheme::State => "Consider the melting and boiling points of the elements.",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            SortTheme::Category => {
                "Elements are classified based on their electron configuration and properties."
            }
            SortTheme::Block => {
                "Electron blocks are determined by the highest energy subshell being filled."
            }
            SortTheme::State => {
                "Physical state depends on the element's melting and boiling points relative to room temperature."
            }
        }
    }

    /// Full closed category set with accepted symbols taken from `selected`.
    pub fn categories(self, selected: &[&Element]) -> Vec<SortCategory> {
        match self {
            SortTheme::Category => ElementCategory::ALL
                .iter()
                .map(|&c| bucket(c.id(), c.display_name(), selected, |el| el.category == c))
                .collect(),
            SortTheme::Block => Block::ALL
                .iter()
                .map(|&b| bucket(b.id(), b.display_name(), selected, |el| el.block == b))
                .collect(),
            SortTheme::State => PhysicalState::ALL
                .iter()
                .map(|&s| bucket(s.id(), s.display_name(), selected, |el| el.state == s))
                .collect(),
        }
    }
}

fn bucket(
    id: &str,
    name: &str,
    selected: &[&Element],
    member: impl Fn(&Element) -> bool,
) -> SortCategory {
    SortCategory {
        id: id.to_string(),
        name: name.to_string(),
        accepted_elements: selected
            .iter()
            .filter(|el| member(**el))
            .map(|el| el.symbol.clone())
            .collect(),
    }
}

/// Prompt, hint, explanation and expected answer for a single-element template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub prompt: String,
    pub hint: String,
    pub explanation: String,
    pub correct_answer: String,
}

/// Renders a multiple-choice template, or `None` when the element lacks the data.
pub fn render_choice(template: ChoiceTemplate, el: &Element) -> Option<RenderedPrompt> {
    let rendered = match template {
        ChoiceTemplate::SymbolToName => RenderedPrompt {
            prompt: format!("What is the name of the element with symbol \"{}\"?", el.symbol),
            hint: format!(
                "This element is in group {} and period {}.",
                el.group, el.period
            ),
            explanation: match el.primary_use() {
                Some(usage) => format!(
                    "{} is the symbol for {}, commonly used for {}.",
                    el.symbol,
                    el.name,
                    usage.to_lowercase()
                ),
                None => format!("{} is the symbol for {}.", el.symbol, el.name),
            },
            correct_answer: el.name.clone(),
        },
        ChoiceTemplate::NameToSymbol => RenderedPrompt {
            prompt: format!("What is the chemical symbol for {}?", el.name),
            hint: "The symbol often comes from the element's name or its Latin name.".into(),
            explanation: format!("The symbol for {} is {}.", el.name, el.symbol),
            correct_answer: el.symbol.clone(),
        },
        ChoiceTemplate::AtomicNumber => RenderedPrompt {
            prompt: format!("What is the atomic number of {}?", el.name),
            hint: "The atomic number equals the number of protons in the nucleus.".into(),
            explanation: format!(
                "{} has {} protons, so its atomic number is {}.",
                el.name, el.atomic_number, el.atomic_number
            ),
            correct_answer: el.atomic_number.to_string(),
        },
        ChoiceTemplate::Group => RenderedPrompt {
            prompt: format!("In which group is {} located?", el.name),
            hint: "Groups are the vertical columns in the periodic table.".into(),
            explanation: format!("{} is in group {} of the periodic table.", el.name, el.group),
            correct_answer: el.group.to_string(),
        },
        ChoiceTemplate::Period => RenderedPrompt {
            prompt: format!("In which period is {} located?", el.name),
            hint: "Periods are the horizontal rows in the periodic table.".into(),
            explanation: format!("{} is in period {} of the periodic table.", el.name, el.period),
            correct_answer: el.period.to_string(),
        },
        ChoiceTemplate::Category => RenderedPrompt {
            prompt: format!("What category does {} belong to?", el.name),
            hint: "Consider the element's position and properties.".into(),
            explanation: format!(
                "{} is classified as {}.",
                el.name,
                el.category.display_name()
            ),
            correct_answer: el.category.display_name().to_string(),
        },
        ChoiceTemplate::State => RenderedPrompt {
            prompt: format!(
                "What is the physical state of {} at room temperature?",
                el.name
            ),
            hint: "Consider the element's melting and boiling points.".into(),
            explanation: format!(
                "{} is a {} at room temperature.",
                el.name,
                el.state.id()
            ),
            correct_answer: el.state.display_name().to_string(),
        },
        ChoiceTemplate::Discoverer => {
            let discoverer = el.named_discoverer()?;
            RenderedPrompt {
                prompt: format!("Who discovered {}?", el.name),
                hint: format!("This scientist made the discovery in the {}.", century(el)),
                explanation: discovery_sentence(el, discoverer),
                correct_answer: discoverer.to_string(),
            }
        }
        ChoiceTemplate::Uses => {
            let usage = el.primary_use()?;
            RenderedPrompt {
                prompt: format!("What is {} primarily used for?", el.name),
                hint: "Think about common applications of this element.".into(),
                explanation: format!("{} is primarily used for {}.", el.name, usage.to_lowercase()),
                correct_answer: usage.to_string(),
            }
        }
    };
    Some(rendered)
}

/// Renders a fill-in-the-blank template, or `None` when the element lacks the data.
pub fn render_blank(template: BlankTemplate, el: &Element) -> Option<RenderedPrompt> {
    let rendered = match template {
        BlankTemplate::ElectronConfig => {
            if el.electron_config.trim().is_empty() {
                return None;
            }
            RenderedPrompt {
                prompt: format!("The electron configuration of {} is ______.", el.name),
                hint: "Follow the aufbau principle for electron filling.".into(),
                explanation: format!(
                    "{} has the electron configuration {}.",
                    el.name, el.electron_config
                ),
                correct_answer: el.electron_config.clone(),
            }
        }
        BlankTemplate::AtomicMass => RenderedPrompt {
            prompt: format!("The atomic mass of {} is ______ u.", el.name),
            hint: "Atomic mass is usually close to the mass number.".into(),
            explanation: format!("{} has an atomic mass of {} u.", el.name, el.atomic_mass),
            correct_answer: el.atomic_mass.to_string(),
        },
        BlankTemplate::Discoverer => {
            let discoverer = el.named_discoverer()?;
            RenderedPrompt {
                prompt: format!("{} was discovered by ______.", el.name),
                hint: format!("This scientist made the discovery in the {}.", century(el)),
                explanation: discovery_sentence(el, discoverer),
                correct_answer: discoverer.to_string(),
            }
        }
    };
    Some(rendered)
}

impl MatchTemplate {
    pub fn prompt(self) -> &'static str {
        match self {
            MatchTemplate::SymbolName => "Match each symbol with its element name:",
            MatchTemplate::ElementUse => "Match each element with its primary use:",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            MatchTemplate::SymbolName => "Some symbols come from Latin names.",
            MatchTemplate::ElementUse => "Think about common applications of these elements.",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            MatchTemplate::SymbolName => {
                "Chemical symbols are standardized abbreviations for element names."
            }
            MatchTemplate::ElementUse => {
                "Elements have various industrial and biological applications."
            }
        }
    }

    /// Left and right text for one element, or `None` if it cannot take part.
    pub fn pair_text(self, el: &Element) -> Option<(String, String)> {
        match self {
            MatchTemplate::SymbolName => Some((el.symbol.clone(), el.name.clone())),
            MatchTemplate::ElementUse => el
                .primary_use()
                .map(|usage| (el.name.clone(), usage.to_string())),
        }
    }
}

fn century(el: &Element) -> String {
    match el.discovery_year {
        Some(year) => format!("{}s", (year / 100) * 100),
        None => "past".to_string(),
    }
}

fn discovery_sentence(el: &Element, discoverer: &str) -> String {
    match el.discovery_year {
        Some(year) => format!("{} was discovered by {} in {}.", el.name, discoverer, year),
        None => format!("{} was discovered by {}.", el.name, discoverer),
    }
}

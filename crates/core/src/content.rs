use crate::{CardDef, CardType, FaintMemoryRules, GodType, JobType, Scope};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub rarity: String,
    pub job: JobType,
    #[serde(default)]
    pub starting_cards: Vec<String>,
    #[serde(default)]
    pub hirameki_cards: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Weapon,
    Armor,
    Pendant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EquipmentType,
    pub rarity: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HiddenHiramekiEffect {
    pub id: String,
    pub additional_effect: String,
    #[serde(default)]
    pub cost_modifier: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GodHiramekiEffect {
    pub id: String,
    pub gods: Scope<GodType>,
    pub additional_effect: String,
    #[serde(default)]
    pub cost_modifier: Option<i32>,
}

/// Read-only reference data shared by the resolver, the scorer and deck editing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub characters: Vec<Character>,
    pub cards: Vec<CardDef>,
    pub equipment: Vec<Equipment>,
    pub hidden_effects: Vec<HiddenHiramekiEffect>,
    pub god_effects: Vec<GodHiramekiEffect>,
    pub rules: FaintMemoryRules,
}

impl Catalog {
    pub fn find_card(&self, id: &str) -> Option<&CardDef> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn find_character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    pub fn find_equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|item| item.id == id)
    }

    pub fn hidden_effect(&self, id: &str) -> Option<&HiddenHiramekiEffect> {
        self.hidden_effects.iter().find(|effect| effect.id == id)
    }

    pub fn god_effect(&self, id: &str) -> Option<&GodHiramekiEffect> {
        self.god_effects.iter().find(|effect| effect.id == id)
    }

    pub fn starting_cards_for(&self, character: &Character) -> Vec<&CardDef> {
        self.cards_by_ids(&character.starting_cards)
    }

    pub fn hirameki_cards_for(&self, character: &Character) -> Vec<&CardDef> {
        self.cards_by_ids(&character.hirameki_cards)
    }

    /// Non-character cards a deck may take. Without a job every one of them is offered.
    pub fn addable_cards_for(&self, job: Option<JobType>) -> Vec<&CardDef> {
        self.cards
            .iter()
            .filter(|card| card.kind != CardType::Character)
            .filter(|card| match job {
                None => true,
                Some(job) => card.allowed_jobs.contains(&job),
            })
            .collect()
    }

    pub fn conversion_targets_for(&self, job: Option<JobType>) -> Vec<&CardDef> {
        self.addable_cards_for(job)
            .into_iter()
            .filter(|card| matches!(card.kind, CardType::Shared | CardType::Forbidden))
            .collect()
    }

    pub fn god_effects_for(&self, god: GodType) -> Vec<&GodHiramekiEffect> {
        self.god_effects
            .iter()
            .filter(|effect| effect.gods.contains(&god))
            .collect()
    }

    pub fn equipment_of(&self, kind: EquipmentType) -> Vec<&Equipment> {
        self.equipment.iter().filter(|item| item.kind == kind).collect()
    }

    fn cards_by_ids(&self, ids: &[String]) -> Vec<&CardDef> {
        ids.iter().filter_map(|id| self.find_card(id)).collect()
    }
}

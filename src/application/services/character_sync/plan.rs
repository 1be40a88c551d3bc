//! Synchronization plan - the ordered operations of one pass
//!
//! Every managed section is fully replaced: each key currently under the
//! section is deleted before the curated entries are inserted. Currency
//! totals are zeroed before any amount is added.

use serde::Serialize;
use serde_json::{Map, Value};

use super::record::{ally_record, item_record, skill_record};
use crate::domain::entities::CharacterDraft;
use crate::domain::value_objects::{
    CurrencyAmount, SchemaVersion, StoreLayout, StoreOp, VariableTree,
};

/// Counts describing what a pass wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub version: Option<SchemaVersion>,
    pub skills: usize,
    pub items: usize,
    pub allies: usize,
    pub removed_keys: usize,
    pub currency: CurrencyAmount,
}

#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub ops: Vec<StoreOp>,
    pub summary: SyncSummary,
}

impl SyncPlan {
    /// Plan the pass for `draft` against the store's current contents
    pub fn build(current: &VariableTree, version: SchemaVersion, draft: &CharacterDraft) -> Self {
        let layout = version.layout();
        let mut builder = PlanBuilder {
            current,
            ops: Vec::new(),
            summary: SyncSummary {
                version: Some(version),
                ..Default::default()
            },
        };

        builder.ops.push(StoreOp::set(
            layout.destiny_points,
            draft.character.destiny_points,
        ));

        let skills: Vec<(String, Value)> = draft
            .skills
            .iter()
            .filter(|skill| !skill.entry.is_custom)
            .map(|skill| (skill.entry.name.clone(), skill_record(skill)))
            .collect();
        builder.summary.skills = skills.len();
        builder.replace_section(layout.skills, skills);

        let mut currency_deltas = Vec::new();
        let mut inventory = Vec::new();
        for item in draft.items.iter().filter(|item| !item.entry.is_custom) {
            if item.is_currency() {
                currency_deltas.push(CurrencyAmount::parse(&item.entry.description));
            } else {
                inventory.push((item.entry.name.clone(), item_record(item)));
            }
        }
        builder.summary.items = inventory.len();
        builder.replace_section(layout.inventory, inventory);
        builder.reset_currency(&layout, &currency_deltas);

        let allies: Vec<(String, Value)> = draft
            .partners
            .iter()
            .filter(|ally| !ally.is_custom)
            .map(|ally| (ally.name.clone(), ally_record(ally)))
            .collect();
        builder.summary.allies = allies.len();
        builder.replace_section(layout.allies, allies);

        SyncPlan {
            ops: builder.ops,
            summary: builder.summary,
        }
    }
}

struct PlanBuilder<'a> {
    current: &'a VariableTree,
    ops: Vec<StoreOp>,
    summary: SyncSummary,
}

impl PlanBuilder<'_> {
    fn replace_section(&mut self, path: &str, entries: Vec<(String, Value)>) {
        match self.current.get(path) {
            Some(Value::Object(existing)) => {
                for key in existing.keys() {
                    self.ops.push(StoreOp::delete(path, key.clone()));
                }
                self.summary.removed_keys += existing.len();
            }
            // Missing, null or not an object: start the section afresh
            _ => self.ops.push(StoreOp::set(path, Value::Object(Map::new()))),
        }

        for (key, value) in entries {
            self.ops.push(StoreOp::insert(path, key, value));
        }
    }

    fn reset_currency(&mut self, layout: &StoreLayout, deltas: &[CurrencyAmount]) {
        let paths = [layout.gold(), layout.silver(), layout.copper()];
        for path in &paths {
            self.ops.push(StoreOp::set(path.clone(), 0));
        }

        for delta in deltas.iter().filter(|delta| !delta.is_zero()) {
            let amounts = [delta.gold, delta.silver, delta.copper];
            for (path, amount) in paths.iter().zip(amounts) {
                if amount > 0 {
                    self.ops
                        .push(StoreOp::add(path.clone(), i64::try_from(amount).unwrap_or(i64::MAX)));
                }
            }
            self.summary.currency += *delta;
        }
    }
}

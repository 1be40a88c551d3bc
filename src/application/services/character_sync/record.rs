//! Translation of catalog entries into external store records
//!
//! The store's consumer reads Chinese field names and expects boolean-ish
//! flags as the tokens `是` / `否` rather than JSON booleans.

use serde_json::{json, Map, Value};

use crate::domain::entities::{Ally, AllyEquipment, Item, Skill};
use crate::domain::value_objects::Rarity;

pub const YES_TOKEN: &str = "是";
pub const NO_TOKEN: &str = "否";

fn flag(value: bool) -> &'static str {
    if value {
        YES_TOKEN
    } else {
        NO_TOKEN
    }
}

pub fn skill_record(skill: &Skill) -> Value {
    json!({
        "品质": skill.entry.rarity.label(),
        "类型": skill.skill_type,
        "消耗": skill.consume.as_deref().unwrap_or(""),
        "标签": skill.entry.tag,
        "效果": skill.entry.effect,
        "描述": skill.entry.description,
    })
}

pub fn item_record(item: &Item) -> Value {
    json!({
        "品质": item.entry.rarity.label(),
        "数量": item.quantity.filter(|q| *q > 0).unwrap_or(1),
        "类型": item.item_type,
        "标签": item.entry.tag,
        "效果": item.entry.effect,
        "描述": item.entry.description,
    })
}

pub fn ally_equipment_record(equipment: &AllyEquipment) -> Value {
    let quality = equipment
        .rarity
        .as_ref()
        .map(|rarity| rarity.label())
        .unwrap_or(Rarity::Common.label());
    json!({
        "品质": quality,
        "类型": equipment.equipment_type,
        "标签": equipment.tag,
        "效果": equipment.effect,
        "描述": equipment.description,
    })
}

pub fn ally_record(ally: &Ally) -> Value {
    let equipment: Map<String, Value> = ally
        .named_equipment()
        .map(|eq| (eq.name.clone(), ally_equipment_record(eq)))
        .collect();
    let skills: Map<String, Value> = ally
        .skills
        .iter()
        .map(|skill| (skill.entry.name.clone(), skill_record(skill)))
        .collect();

    let mut ascension = Map::new();
    ascension.insert("是否开启".to_string(), Value::from(flag(ally.stairway.is_open)));
    let elements = ally.ascension_elements();
    if ally.stairway.is_open && !elements.is_empty() {
        ascension.insert("要素".to_string(), Value::Object(elements));
    }

    json!({
        "是否在场": YES_TOKEN,
        "生命层级": ally.life_level,
        "等级": ally.level,
        "种族": ally.race,
        "身份": ally.identity,
        "职业": ally.career,
        "性格": ally.personality,
        "喜爱": ally.like,
        "外貌特质": ally.app,
        "衣物装饰": ally.cloth,
        "属性": {
            "力量": ally.attributes.strength,
            "敏捷": ally.attributes.dexterity,
            "体质": ally.attributes.constitution,
            "智力": ally.attributes.intelligence,
            "精神": ally.attributes.mind,
        },
        "登神长阶": ascension,
        "是否缔结契约": flag(ally.is_contract),
        "好感度": ally.affinity,
        "评价": ally.comment.as_deref().unwrap_or(""),
        "背景故事": ally.background_info.as_deref().unwrap_or(""),
        "装备": equipment,
        "技能": skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Ascension;

    #[test]
    fn test_skill_record_fields() {
        let mut skill = Skill::new("疾风步", Rarity::Rare, "主动");
        skill.entry.tag = "身法".to_string();
        skill.entry.effect = "移动速度提升".to_string();
        let record = skill_record(&skill);
        assert_eq!(record["品质"], "稀有");
        assert_eq!(record["类型"], "主动");
        assert_eq!(record["消耗"], "");
        assert_eq!(record["标签"], "身法");
    }

    #[test]
    fn test_unknown_rarity_written_as_common() {
        let mut item = Item::new("怪石", Rarity::Unknown("shiny".to_string()), "杂物");
        item.quantity = Some(0);
        let record = item_record(&item);
        assert_eq!(record["品质"], "普通");
        assert_eq!(record["数量"], 1);
    }

    #[test]
    fn test_ally_record_tokens_and_nested_maps() {
        let mut ally = Ally::new("莉娅", "精灵");
        ally.is_contract = true;
        ally.stairway = Ascension {
            is_open: false,
            elements: None,
        };
        ally.equip = vec![
            AllyEquipment {
                name: "短弓".to_string(),
                rarity: Some(Rarity::Epic),
                ..Default::default()
            },
            AllyEquipment::default(),
        ];
        ally.skills = vec![Skill::new("鹰眼", Rarity::Uncommon, "被动")];

        let record = ally_record(&ally);
        assert_eq!(record["是否在场"], "是");
        assert_eq!(record["是否缔结契约"], "是");
        assert_eq!(record["登神长阶"]["是否开启"], "否");
        assert!(record["登神长阶"].get("要素").is_none());
        assert_eq!(record["装备"].as_object().unwrap().len(), 1);
        assert_eq!(record["装备"]["短弓"]["品质"], "史诗");
        assert_eq!(record["技能"]["鹰眼"]["品质"], "优秀");
        assert_eq!(record["评价"], "");
    }
}

//! Prompt building for the opening-scene narrative request
//!
//! Curated items, skills and allies are already in the structured store, so
//! only custom entries are described here. Equipment is always described.

use crate::domain::entities::{
    Ally, AllyEquipment, Background, CharacterConfig, CharacterDraft, Equipment, Item, Skill,
};
use crate::domain::value_objects::{tier_attribute_bonus, tier_name, BASE_STAT};

const UNNAMED: &str = "未命名";

/// Appended after the fenced character block
pub const GENERATION_INSTRUCTIONS: &str = "---
根据<status_current_variables>和以上内容，生成一个符合描述和情景的初始剧情！
（注意：生成初始剧情时，先检查上述内容是否完整，如不完整，必须参考相关设定进行完善，然后再根据内容，在<UpdateVariable>内更新数据。除非有特殊要求，更新的数据不要有任何修改和省略。）
（IMPORTANT: 已在<status_current_variables>内的数据，不得修改和删除）";

/// Build the full prompt for a draft
pub fn build_character_prompt(draft: &CharacterDraft) -> String {
    let mut lines: Vec<String> = Vec::new();

    push_character(&mut lines, &draft.character);
    push_equipment(&mut lines, &draft.equipments);

    let custom_items: Vec<&Item> = draft.items.iter().filter(|i| i.entry.is_custom).collect();
    push_custom_items(&mut lines, &custom_items);

    let custom_skills: Vec<&Skill> = draft.skills.iter().filter(|s| s.entry.is_custom).collect();
    push_custom_skills(&mut lines, &custom_skills);

    let custom_allies: Vec<&Ally> = draft.partners.iter().filter(|a| a.is_custom).collect();
    push_custom_allies(&mut lines, &custom_allies);

    if let Some(background) = &draft.background {
        push_background(&mut lines, background);
    }

    format!("```text\n{}\n```\n\n{}", lines.join("\n"), GENERATION_INSTRUCTIONS)
}

fn push_character(lines: &mut Vec<String>, character: &CharacterConfig) {
    lines.push("【角色信息】".to_string());
    lines.push(format!("姓名: {}", character.name));
    lines.push(format!("性别: {}", character.display_gender()));
    lines.push(format!("年龄: {}岁", character.age));
    lines.push(format!("种族: {}", character.display_race()));
    lines.push(format!("身份: {}", character.display_identity()));
    lines.push(format!("出生地: {}", character.display_start_location()));
    lines.push(format!("生命层级: {}", tier_name(character.level)));
    lines.push(format!("等级: Lv.{}", character.level));

    lines.push(String::new());
    lines.push("【角色属性】".to_string());
    let tier = tier_attribute_bonus(character.level);
    let base = character.base_points.values();
    let extra = character.attribute_points.values();
    for (index, label) in ["力量", "敏捷", "体质", "智力", "精神"].iter().enumerate() {
        let spent = base[index] + extra[index];
        lines.push(format!(
            "{}: {}(基础) + {}(层级) + {}(额外) = {}",
            label,
            BASE_STAT,
            tier,
            spent,
            BASE_STAT + tier + spent
        ));
    }
}

fn push_equipment(lines: &mut Vec<String>, equipments: &[Equipment]) {
    if equipments.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("【装备列表】".to_string());
    for (index, equipment) in equipments.iter().enumerate() {
        let entry = &equipment.entry;
        lines.push(format!("- 名称: {}", entry.name));
        lines.push(format!("  类型: {}", equipment.slot));
        lines.push(format!("  品质: {}", entry.rarity.label()));
        push_optional(lines, "  标签", &entry.tag);
        lines.push(format!("  效果: {}", entry.effect));
        push_optional(lines, "  描述", &entry.description);
        separate(lines, index, equipments.len());
    }
}

fn push_custom_items(lines: &mut Vec<String>, items: &[&Item]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("【自定义道具】".to_string());
    for (index, item) in items.iter().enumerate() {
        let entry = &item.entry;
        lines.push(format!("- 名称: {}", or_unnamed(&entry.name)));
        push_optional(lines, "  类型", &item.item_type);
        lines.push(format!("  品质: {}", entry.rarity.label()));
        if let Some(quantity) = item.quantity.filter(|q| *q > 0) {
            lines.push(format!("  数量: {}", quantity));
        }
        push_optional(lines, "  标签", &entry.tag);
        push_optional(lines, "  效果", &entry.effect);
        push_optional(lines, "  描述", &entry.description);
        separate(lines, index, items.len());
    }
}

fn push_custom_skills(lines: &mut Vec<String>, skills: &[&Skill]) {
    if skills.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("【自定义技能】".to_string());
    for (index, skill) in skills.iter().enumerate() {
        push_skill(lines, skill, "- ", "  ");
        separate(lines, index, skills.len());
    }
}

fn push_skill(lines: &mut Vec<String>, skill: &Skill, head: &str, indent: &str) {
    let entry = &skill.entry;
    lines.push(format!("{}名称: {}", head, or_unnamed(&entry.name)));
    push_optional(lines, &format!("{indent}类型"), &skill.skill_type);
    lines.push(format!("{}品质: {}", indent, entry.rarity.label()));
    push_optional(lines, &format!("{indent}标签"), &entry.tag);
    push_optional(
        lines,
        &format!("{indent}消耗"),
        skill.consume.as_deref().unwrap_or_default(),
    );
    push_optional(lines, &format!("{indent}效果"), &entry.effect);
    push_optional(lines, &format!("{indent}描述"), &entry.description);
}

fn push_custom_allies(lines: &mut Vec<String>, allies: &[&Ally]) {
    if allies.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("【命定之人】".to_string());
    for ally in allies {
        lines.push(format!("◆ 名称: {}", ally.name));
        lines.push(format!("  种族: {}", ally.race));
        lines.push(format!("  身份: {}", ally.identity.join("、")));
        if !ally.career.is_empty() {
            lines.push(format!("  职业: {}", ally.career.join("、")));
        }
        lines.push(format!("  生命层级: {}", ally.life_level));
        lines.push(format!("  等级: {}", ally.level));
        lines.push(format!("  性格: {}", ally.personality));
        lines.push(format!("  喜爱: {}", ally.like));
        lines.push(format!("  外貌: {}", ally.app));
        lines.push(format!("  衣着: {}", ally.cloth));
        lines.push("  属性:".to_string());
        let attrs = &ally.attributes;
        lines.push(format!("    力量: {}", attrs.strength));
        lines.push(format!("    敏捷: {}", attrs.dexterity));
        lines.push(format!("    体质: {}", attrs.constitution));
        lines.push(format!("    智力: {}", attrs.intelligence));
        lines.push(format!("    精神: {}", attrs.mind));
        lines.push(format!(
            "  是否缔结契约: {}",
            if ally.is_contract { "是" } else { "否" }
        ));
        lines.push(format!("  好感度: {}", ally.affinity));

        let equipment: Vec<&AllyEquipment> = ally.named_equipment().collect();
        if !equipment.is_empty() {
            lines.push("  装备:".to_string());
            for (index, eq) in equipment.iter().enumerate() {
                lines.push(format!("    - 名称: {}", eq.name));
                push_optional(lines, "      类型", &eq.equipment_type);
                if let Some(rarity) = &eq.rarity {
                    lines.push(format!("      品质: {}", rarity.label()));
                }
                push_optional(lines, "      标签", &eq.tag);
                push_optional(lines, "      效果", &eq.effect);
                push_optional(lines, "      描述", &eq.description);
                separate(lines, index, equipment.len());
            }
        }

        if ally.stairway.is_open {
            lines.push("  登神长阶: 已开启".to_string());
            let described = ally
                .stairway
                .elements
                .as_ref()
                .and_then(|elements| elements.get("描述"))
                .and_then(|value| value.as_str())
                .filter(|text| !text.is_empty());
            if let Some(text) = described {
                lines.push(format!("    描述: {}", text));
            }
        }
        push_optional(lines, "  评价", ally.comment.as_deref().unwrap_or_default());
        push_optional(
            lines,
            "  背景",
            ally.background_info.as_deref().unwrap_or_default(),
        );

        if !ally.skills.is_empty() {
            lines.push("  技能:".to_string());
            for (index, skill) in ally.skills.iter().enumerate() {
                push_skill(lines, skill, "    - ", "      ");
                separate(lines, index, ally.skills.len());
            }
        }
    }
}

fn push_background(lines: &mut Vec<String>, background: &Background) {
    lines.push(String::new());
    lines.push("【初始开局剧情】".to_string());
    lines.push(background.name.clone());
    lines.push(format!("描述: {}", background.description));
}

fn push_optional(lines: &mut Vec<String>, label: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("{}: {}", label, value));
    }
}

/// Blank line between entries, none after the last
fn separate(lines: &mut Vec<String>, index: usize, len: usize) {
    if index + 1 < len {
        lines.push(String::new());
    }
}

fn or_unnamed(name: &str) -> &str {
    if name.is_empty() {
        UNNAMED
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AttributeBlock;
    use crate::domain::value_objects::Rarity;

    fn draft() -> CharacterDraft {
        let mut custom_item = Item::new("祖传怀表", Rarity::Epic, "饰品");
        custom_item.entry.is_custom = true;
        custom_item.quantity = Some(1);
        let mut custom_skill = Skill::new("自创剑法", Rarity::Legendary, "主动");
        custom_skill.entry.is_custom = true;
        custom_skill.consume = Some("10法力".to_string());
        let mut custom_ally = Ally::new("影", "暗精灵");
        custom_ally.is_custom = true;
        custom_ally.identity = vec!["刺客".to_string(), "向导".to_string()];
        custom_ally.stairway.is_open = true;

        CharacterDraft {
            character: CharacterConfig {
                name: "艾琳".to_string(),
                gender: "自定义".to_string(),
                custom_gender: "未知".to_string(),
                level: 5,
                base_points: AttributeBlock::new(1, 0, 0, 0, 0),
                attribute_points: AttributeBlock::new(2, 0, 0, 0, 3),
                ..Default::default()
            },
            equipments: vec![Equipment::new("铁剑", Rarity::Common, "武器")],
            items: vec![Item::new("面包", Rarity::Common, "食物"), custom_item],
            skills: vec![Skill::new("疾风步", Rarity::Rare, "主动"), custom_skill],
            partners: vec![Ally::new("莉娅", "精灵"), custom_ally],
            background: Some(Background::new("流浪者", "在雨夜醒来")),
        }
    }

    #[test]
    fn test_character_and_attribute_blocks() {
        let prompt = build_character_prompt(&draft());
        assert!(prompt.starts_with("```text\n【角色信息】\n姓名: 艾琳\n性别: 未知\n"));
        assert!(prompt.contains("生命层级: 第二层级"));
        assert!(prompt.contains("等级: Lv.5"));
        assert!(prompt.contains("力量: 4(基础) + 1(层级) + 3(额外) = 8"));
        assert!(prompt.contains("敏捷: 4(基础) + 1(层级) + 0(额外) = 5"));
        assert!(prompt.contains("精神: 4(基础) + 1(层级) + 3(额外) = 8"));
    }

    #[test]
    fn test_only_custom_entries_are_described() {
        let prompt = build_character_prompt(&draft());
        assert!(prompt.contains("【装备列表】\n- 名称: 铁剑\n  类型: 武器\n  品质: 普通"));
        assert!(prompt.contains("祖传怀表"));
        assert!(!prompt.contains("面包"));
        assert!(prompt.contains("自创剑法"));
        assert!(prompt.contains("  消耗: 10法力"));
        assert!(!prompt.contains("疾风步"));
        assert!(prompt.contains("◆ 名称: 影"));
        assert!(prompt.contains("  身份: 刺客、向导"));
        assert!(prompt.contains("  登神长阶: 已开启"));
        assert!(!prompt.contains("莉娅"));
    }

    #[test]
    fn test_background_and_instructions_close_the_prompt() {
        let prompt = build_character_prompt(&draft());
        assert!(prompt.contains("【初始开局剧情】\n流浪者\n描述: 在雨夜醒来\n```\n\n---"));
        assert!(prompt.ends_with(GENERATION_INSTRUCTIONS));
    }

    #[test]
    fn test_empty_draft_has_no_optional_sections() {
        let prompt = build_character_prompt(&CharacterDraft::default());
        for heading in ["【装备列表】", "【自定义道具】", "【自定义技能】", "【命定之人】", "【初始开局剧情】"] {
            assert!(!prompt.contains(heading));
        }
    }
}

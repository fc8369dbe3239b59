// src/hero/src/bag/inventory.rs
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use items::{Item, consumable, equipment};

/// 默认背包槽位
pub const DEFAULT_MAX_SLOTS: usize = 20;

/// 库存系统错误类型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("背包已满 ({max_slots} slots)")]
    Full { max_slots: usize },
    #[error("物品不存在: {0}")]
    ItemNotFound(String),
    #[error("物品数量不足: {name} (requested {requested}, have {available})")]
    NotEnough {
        name: String,
        requested: usize,
        available: usize,
    },
    #[error("金币不足 (requested {requested}, have {available})")]
    InsufficientGold { requested: u32, available: u32 },
    #[error("库存数据不一致: {0}")]
    Inconsistent(String),
}

/// 按首次加入顺序排列的同名堆叠
///
/// Serialized as a JSON object keyed by item name, in the same order.
#[derive(Clone, Debug, Default, PartialEq)]
struct Stacks(Vec<(String, Vec<Item>)>);

impl Stacks {
    fn get(&self, name: &str) -> Option<&Vec<Item>> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, stack)| stack)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Item>> {
        self.0
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, stack)| stack)
    }

    /// 同名堆叠，不存在时追加到末尾
    fn entry(&mut self, name: &str) -> &mut Vec<Item> {
        let index = match self.0.iter().position(|(key, _)| key == name) {
            Some(index) => index,
            None => {
                self.0.push((name.to_string(), Vec::new()));
                self.0.len() - 1
            }
        };
        &mut self.0[index].1
    }

    fn remove(&mut self, name: &str) {
        self.0.retain(|(key, _)| key != name);
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Item>)> {
        self.0.iter().map(|(name, stack)| (name, stack))
    }

    fn values(&self) -> impl Iterator<Item = &Vec<Item>> {
        self.0.iter().map(|(_, stack)| stack)
    }
}

impl Serialize for Stacks {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, stack) in &self.0 {
            map.serialize_entry(name, stack)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Stacks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct StacksVisitor;

        impl<'de> Visitor<'de> for StacksVisitor {
            type Value = Stacks;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from item name to item stack")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Stacks, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut stacks = Stacks::default();
                while let Some((name, stack)) = access.next_entry::<String, Vec<Item>>()? {
                    if stacks.get(&name).is_some() {
                        return Err(de::Error::custom(format!("duplicate stack {name}")));
                    }
                    stacks.0.push((name, stack));
                }
                Ok(stacks)
            }
        }

        deserializer.deserialize_map(StacksVisitor)
    }
}

/// 按名称分组的有限槽位库存
///
/// 每个实例占用一个槽位；同名物品堆叠在同一个名称下，
/// 但仍按实例计数。堆叠保持首次加入的顺序。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    max_slots: usize,
    gold: u32,
    items: Stacks,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SLOTS)
    }
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            max_slots,
            gold: 0,
            items: Stacks::default(),
        }
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// 已占用槽位（所有实例总数）
    pub fn total_slots_used(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    pub fn is_full(&self) -> bool {
        self.total_slots_used() >= self.max_slots
    }

    /// 添加物品，背包已满时不做任何修改
    pub fn add_item(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                max_slots: self.max_slots,
            });
        }
        self.items.entry(&item.name).push(item);
        Ok(())
    }

    /// 从同名堆叠的末尾移除 `quantity` 个实例
    ///
    /// Fails without mutation when fewer than `quantity` instances exist.
    pub fn remove_item(&mut self, name: &str, quantity: usize) -> Result<Vec<Item>, InventoryError> {
        let available = self.quantity(name);
        if !self.has_item(name, 1) {
            return Err(InventoryError::ItemNotFound(name.to_string()));
        }
        if available < quantity {
            return Err(InventoryError::NotEnough {
                name: name.to_string(),
                requested: quantity,
                available,
            });
        }

        let Some(stack) = self.items.get_mut(name) else {
            return Err(InventoryError::ItemNotFound(name.to_string()));
        };
        let removed: Vec<Item> = stack.drain(available - quantity..).rev().collect();
        if stack.is_empty() {
            self.items.remove(name);
        }
        Ok(removed)
    }

    /// 第一个同名实例
    pub fn get_item(&self, name: &str) -> Option<&Item> {
        self.items.get(name).and_then(|stack| stack.first())
    }

    pub fn get_item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.get_mut(name).and_then(|stack| stack.first_mut())
    }

    /// 取出第一个同名实例（供使用物品时暂时移出背包）
    ///
    /// The stack keeps its place even when emptied; call `reattach` or
    /// `settle` afterwards.
    pub(crate) fn detach(&mut self, name: &str) -> Option<Item> {
        let stack = self.items.get_mut(name)?;
        if stack.is_empty() {
            return None;
        }
        Some(stack.remove(0))
    }

    /// 放回先前取出的实例，恢复其原有位置
    pub(crate) fn reattach(&mut self, item: Item) {
        self.items.entry(&item.name).insert(0, item);
    }

    /// 清除取出后留下的空堆叠
    pub(crate) fn settle(&mut self, name: &str) {
        if self.items.get(name).is_some_and(Vec::is_empty) {
            self.items.remove(name);
        }
    }

    /// 是否至少持有 `quantity` 个同名物品
    pub fn has_item(&self, name: &str, quantity: usize) -> bool {
        self.quantity(name) >= quantity.max(1)
    }

    pub fn quantity(&self, name: &str) -> usize {
        self.items.get(name).map_or(0, Vec::len)
    }

    /// 每个名称及其数量
    pub fn unique_items(&self) -> Vec<(&str, usize)> {
        self.items
            .iter()
            .map(|(name, stack)| (name.as_str(), stack.len()))
            .collect()
    }

    pub fn all_items(&self) -> Vec<&Item> {
        self.items.values().flatten().collect()
    }

    pub fn consumables(&self) -> Vec<&Item> {
        self.items
            .values()
            .flatten()
            .filter(|item| item.is_consumable())
            .collect()
    }

    pub fn equipment(&self) -> Vec<&Item> {
        self.items
            .values()
            .flatten()
            .filter(|item| item.is_equipment())
            .collect()
    }

    pub fn equipped_items(&self) -> Vec<&Item> {
        self.items
            .values()
            .flatten()
            .filter(|item| item.is_equipped())
            .collect()
    }

    /// 按名称遍历所有堆叠
    pub fn stacks(&self) -> impl Iterator<Item = (&str, &[Item])> {
        self.items
            .iter()
            .map(|(name, stack)| (name.as_str(), stack.as_slice()))
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn remove_gold(&mut self, amount: u32) -> Result<(), InventoryError> {
        if amount > self.gold {
            return Err(InventoryError::InsufficientGold {
                requested: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// 初始装备：铁剑、皮甲、生命药水、面包（均未装备）
    pub fn initialize_starter_gear(&mut self) -> Result<(), InventoryError> {
        let gear = [
            equipment::iron_sword(),
            equipment::leather_armor(),
            consumable::health_potion(),
            consumable::bread(),
        ];
        if self.total_slots_used() + gear.len() > self.max_slots {
            return Err(InventoryError::Full {
                max_slots: self.max_slots,
            });
        }
        for item in gear {
            self.add_item(item)?;
        }
        Ok(())
    }

    /// 校验反序列化得到的库存
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.max_slots == 0 {
            return Err(InventoryError::Inconsistent("zero slots".into()));
        }
        let used = self.total_slots_used();
        if used > self.max_slots {
            return Err(InventoryError::Inconsistent(format!(
                "{used} items exceed {} slots",
                self.max_slots
            )));
        }
        for (name, stack) in self.items.iter() {
            if stack.is_empty() {
                return Err(InventoryError::Inconsistent(format!("empty stack {name}")));
            }
            if let Some(stray) = stack.iter().find(|item| &item.name != name) {
                return Err(InventoryError::Inconsistent(format!(
                    "{} filed under {name}",
                    stray.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::consumable::{bread, health_potion};
    use items::equipment::iron_sword;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_item_refuses_when_full() {
        let mut inventory = Inventory::new(2);
        inventory.add_item(health_potion()).unwrap();
        inventory.add_item(health_potion()).unwrap();
        assert!(inventory.is_full());

        let before = inventory.clone();
        assert_eq!(
            inventory.add_item(bread()),
            Err(InventoryError::Full { max_slots: 2 })
        );
        assert_eq!(inventory, before);
    }

    #[test]
    fn same_name_items_share_a_stack_but_each_uses_a_slot() {
        let mut inventory = Inventory::new(10);
        for _ in 0..3 {
            inventory.add_item(health_potion()).unwrap();
        }
        inventory.add_item(bread()).unwrap();

        assert_eq!(inventory.quantity("Health Potion"), 3);
        assert_eq!(inventory.total_slots_used(), 4);
        assert_eq!(inventory.unique_items(), vec![("Health Potion", 3), ("Bread", 1)]);
        assert!(inventory.has_item("Health Potion", 3));
        assert!(!inventory.has_item("Health Potion", 4));
        assert_eq!(inventory.all_items().len(), 4);
    }

    #[test]
    fn remove_item_is_all_or_nothing() {
        let mut inventory = Inventory::new(10);
        inventory.add_item(health_potion()).unwrap();
        inventory.add_item(health_potion()).unwrap();

        assert_eq!(
            inventory.remove_item("Health Potion", 3),
            Err(InventoryError::NotEnough {
                name: "Health Potion".into(),
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(inventory.quantity("Health Potion"), 2);

        assert_eq!(inventory.remove_item("Health Potion", 2).unwrap().len(), 2);
        assert!(!inventory.has_item("Health Potion", 1));
        assert!(inventory.get_item("Health Potion").is_none());
        assert_eq!(
            inventory.remove_item("Health Potion", 1),
            Err(InventoryError::ItemNotFound("Health Potion".into()))
        );
    }

    #[test]
    fn remove_item_takes_from_the_tail() {
        let mut inventory = Inventory::new(10);
        let mut worn = iron_sword();
        worn.as_equipment_mut().unwrap().equipped = true;
        inventory.add_item(worn).unwrap();
        inventory.add_item(iron_sword()).unwrap();

        let removed = inventory.remove_item("Iron Sword", 1).unwrap();
        assert!(!removed[0].is_equipped());
        assert!(inventory.get_item("Iron Sword").unwrap().is_equipped());
    }

    #[test]
    fn detach_and_reattach_preserve_order() {
        let mut inventory = Inventory::new(10);
        let mut worn = iron_sword();
        worn.as_equipment_mut().unwrap().equipped = true;
        inventory.add_item(worn).unwrap();
        inventory.add_item(iron_sword()).unwrap();

        let first = inventory.detach("Iron Sword").unwrap();
        assert!(first.is_equipped());
        assert_eq!(inventory.quantity("Iron Sword"), 1);
        inventory.reattach(first);
        assert!(inventory.get_item("Iron Sword").unwrap().is_equipped());
        assert_eq!(inventory.quantity("Iron Sword"), 2);
        assert!(inventory.detach("Nothing").is_none());
    }

    #[test]
    fn single_item_stack_keeps_its_place_while_detached() {
        let mut inventory = Inventory::new(10);
        inventory.initialize_starter_gear().unwrap();

        let sword = inventory.detach("Iron Sword").unwrap();
        inventory.settle("Leather Armor");
        inventory.reattach(sword);
        let names: Vec<&str> = inventory.stacks().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Iron Sword", "Leather Armor", "Health Potion", "Bread"]);

        inventory.detach("Bread").unwrap();
        inventory.settle("Bread");
        assert!(!inventory.has_item("Bread", 1));
        assert_eq!(inventory.unique_items().len(), 3);
        inventory.validate().unwrap();
    }

    #[test]
    fn category_queries() {
        let mut inventory = Inventory::new(10);
        inventory.initialize_starter_gear().unwrap();
        assert_eq!(inventory.consumables().len(), 2);
        assert_eq!(inventory.equipment().len(), 2);
        assert!(inventory.equipped_items().is_empty());
        assert_eq!(inventory.total_slots_used(), 4);
    }

    #[test]
    fn starter_gear_needs_four_free_slots() {
        let mut inventory = Inventory::new(3);
        assert!(inventory.initialize_starter_gear().is_err());
        assert_eq!(inventory.total_slots_used(), 0);
    }

    #[test]
    fn gold_cannot_go_negative() {
        let mut inventory = Inventory::default();
        inventory.add_gold(30);
        assert_eq!(
            inventory.remove_gold(31),
            Err(InventoryError::InsufficientGold {
                requested: 31,
                available: 30
            })
        );
        inventory.remove_gold(30).unwrap();
        assert_eq!(inventory.gold(), 0);
    }

    #[test]
    fn record_uses_camel_case_and_round_trips() {
        let mut inventory = Inventory::new(8);
        inventory.initialize_starter_gear().unwrap();
        inventory.add_gold(12);

        let value = serde_json::to_value(&inventory).unwrap();
        assert_eq!(value["maxSlots"], 8);
        assert_eq!(value["gold"], 12);
        assert!(value["items"]["Bread"].is_array());

        let json = serde_json::to_string(&inventory).unwrap();
        let back: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inventory);
        back.validate().unwrap();
    }

    #[test]
    fn stacks_keep_first_insertion_order() {
        let mut inventory = Inventory::new(8);
        inventory.initialize_starter_gear().unwrap();
        inventory.add_item(iron_sword()).unwrap();

        let names: Vec<&str> = inventory.stacks().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Iron Sword", "Leather Armor", "Health Potion", "Bread"]);

        // 清空后重新加入的堆叠排到末尾
        inventory.remove_item("Health Potion", 1).unwrap();
        inventory.add_item(health_potion()).unwrap();
        let names: Vec<&str> = inventory.stacks().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Iron Sword", "Leather Armor", "Bread", "Health Potion"]);

        let json = serde_json::to_string(&inventory).unwrap();
        let back: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.unique_items(), inventory.unique_items());
    }

    #[test]
    fn duplicate_stack_names_are_rejected() {
        let raw = r#"{"maxSlots":5,"gold":0,"items":{"Bread":[],"Bread":[]}}"#;
        assert!(serde_json::from_str::<Inventory>(raw).is_err());
    }

    #[test]
    fn validate_rejects_overfull_or_misfiled_records() {
        let raw = r#"{"maxSlots":1,"gold":0,"items":{"Bread":[
            {"name":"Bread","description":"","value":5,"rarity":"common",
             "kind":{"type":"Consumable","kind":"food","potency":20}},
            {"name":"Bread","description":"","value":5,"rarity":"common",
             "kind":{"type":"Consumable","kind":"food","potency":20}}]}}"#;
        let inventory: Inventory = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            inventory.validate(),
            Err(InventoryError::Inconsistent(_))
        ));

        let raw = r#"{"maxSlots":5,"gold":0,"items":{"Cake":[
            {"name":"Bread","description":"","value":5,"rarity":"common",
             "kind":{"type":"Consumable","kind":"food","potency":20}}]}}"#;
        let inventory: Inventory = serde_json::from_str(raw).unwrap();
        assert!(inventory.validate().is_err());
    }
}

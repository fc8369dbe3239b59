// src/combat/src/combatant.rs

/// 表示可以参加战斗的活体
///
/// Health is unsigned and damage saturates, so a combatant can never drop
/// below zero no matter how large the hit.
pub trait Combatant {
    /// 获取名称
    fn name(&self) -> &str;

    /// 获取当前生命值
    fn health(&self) -> u32;

    /// 本次攻击造成的伤害（英雄包含装备加成，怪物使用原始攻击力）
    fn attack_power(&self) -> u32;

    /// 是否处于防御姿态
    fn is_defending(&self) -> bool;

    /// 进入防御姿态
    fn defend(&mut self);

    /// 解除防御姿态
    fn reset_defense(&mut self);

    /// 承受伤害，生命值最低为0
    fn take_damage(&mut self, amount: u32);

    /// 是否存活
    fn is_alive(&self) -> bool {
        self.health() > 0
    }

    /// 攻击目标，返回造成的伤害
    fn attack(&self, target: &mut dyn Combatant) -> u32 {
        let damage = self.attack_power();
        target.take_damage(damage);
        damage
    }
}

/// 可以参与回合制战斗的英雄一方：除了战斗能力外还能在战斗中使用背包物品
pub trait Champion: Combatant {
    /// 战斗中可用的消耗品名称（去重，按背包顺序）
    fn usable_items(&self) -> Vec<String>;

    /// 使用一件消耗品，成功时从背包中移除
    fn consume_item(&mut self, name: &str) -> bool;
}

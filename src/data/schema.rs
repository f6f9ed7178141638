use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;

/// 物品大类，决定挂在背包哪个挂点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum ItemCategory {
    Food,
    Weapon,
    #[default]
    Common,
}

/// 静态物品模板（items.ron 中的一条）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weight: f32,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    /// 丢到世界里时使用的模板名
    #[serde(default)]
    pub prefab: String,
    #[serde(default)]
    pub icon: String,
}

fn default_max_stack() -> u32 {
    1
}

impl ItemDefinition {
    /// 同一模板才能堆叠 / 合并
    pub fn same_kind(&self, other: &ItemDefinition) -> bool {
        self.id == other.id
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// 按 id 或名称匹配（忽略大小写）
    pub fn matches(&self, token: &str) -> bool {
        self.id.eq_ignore_ascii_case(token) || self.name.eq_ignore_ascii_case(token)
    }
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemDefinition>,
}

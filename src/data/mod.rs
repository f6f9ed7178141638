pub mod loader;
pub mod schema;

use bevy::prelude::*;
use schema::{ItemDefinition, ItemList};
use crate::core::events::LogEvent;
use crate::core::states::AppState;

pub const ITEMS_PATH: &str = "data/items.ron";

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    handle: Option<Handle<ItemList>>,
}

/// 加载完成后的物品表快照，供各系统直接查询
#[derive(Resource, Default, Debug, Clone)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    pub fn find(&self, token: &str) -> Option<&ItemDefinition> {
        self.items.iter().find(|e| e.matches(token))
    }
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .register_asset_loader(loader::RonItemLoader)
            .init_resource::<ItemAssets>()
            .init_resource::<ItemCatalog>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(Update, check_loaded.run_if(in_state(AppState::Loading)));
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(mut item_assets: ResMut<ItemAssets>, asset_server: Res<AssetServer>) {
    let handle: Handle<ItemList> = asset_server.load(ITEMS_PATH);
    item_assets.handle = Some(handle);
}

fn check_loaded(
    mut next: ResMut<NextState<AppState>>,
    mut catalog: ResMut<ItemCatalog>,
    mut log: EventWriter<LogEvent>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    let Some(list) = item_assets.handle.as_ref().and_then(|h| lists.get(h)) else {
        return;
    };
    catalog.items = list.items.clone();
    info!("item catalog ready: {} entries", catalog.items.len());
    log.write(LogEvent(format!("✔ Items loaded: {}", catalog.items.len())));
    next.set(AppState::InGame);
}

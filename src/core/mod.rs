use bevy::prelude::*;

pub mod config;
pub mod events;
pub mod states;

use config::GameConfig;

/// 每帧的执行顺序：输入 → 玩家动作 → 结算 → 运动
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Act,
    Resolve,
    Motion,
}

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin {
    pub config: GameConfig,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        app.init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .insert_resource(self.config.clone())
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Act, GameSet::Resolve, GameSet::Motion).chain(),
            )
            .add_systems(Startup, begin_loading)
            .add_systems(Update, events::forward_log_event);
    }
}

fn begin_loading(mut next: ResMut<NextState<states::AppState>>) {
    next.set(states::AppState::Loading);
}

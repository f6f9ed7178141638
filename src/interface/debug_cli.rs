//! 文字 CLI：读取 stdin → 解析命令 → 转成游戏事件

use bevy::app::AppExit;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::{events::LogEvent, states::AppState};
use crate::data::ItemCatalog;
use crate::inventory::components::Inventory;
use crate::inventory::events::{GiveItemEvent, ListInventoryEvent, SlotReleased, TakeItemEvent};
use crate::inventory::transfer::{ReleaseTarget, SplitRequest};
use crate::pickup::{
    components::Hands,
    events::{GrabOrThrow, Interact},
};
use crate::ui::{
    events::ToggleInventoryEvent,
    state::{BackpackScreen, HeldButtons, InventoryScreen},
};
use crate::world::events::{ListWorldEvent, LookAtEvent};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let Ok(mut buf) = buffer.lock() else {
                        break;
                    };
                    buf.push_back(line.to_string());
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin.in_set(crate::core::GameSet::Input))
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands
                    .in_set(crate::core::GameSet::Input)
                    .after(read_stdin)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Give { id: String, count: u32 },
    Take(String),
    Inventory,
    Move { from: usize, to: usize, split: SplitRequest },
    Drop { slot: usize, split: SplitRequest },
    Grab,
    Use,
    Tab,
    Peek(bool),
    Hold(bool),
    Look(String),
    World,
    Invalid(String),
    Unsupported(String),
}

/// 命令转发出去的所有游戏事件
#[derive(SystemParam)]
struct CliWriters<'w> {
    give: EventWriter<'w, GiveItemEvent>,
    take: EventWriter<'w, TakeItemEvent>,
    list: EventWriter<'w, ListInventoryEvent>,
    release: EventWriter<'w, SlotReleased>,
    grab: EventWriter<'w, GrabOrThrow>,
    interact: EventWriter<'w, Interact>,
    toggle: EventWriter<'w, ToggleInventoryEvent>,
    look: EventWriter<'w, LookAtEvent>,
    world: EventWriter<'w, ListWorldEvent>,
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

const HELP: &str = "命令列表:
  help                        查看帮助
  status                      查看当前状态
  exit / quit                 退出程序
  items                       列出所有物品
  items <token>               用 id / uuid / 名称 查询单个物品
  give <id> [count]           给予物品
  take <name>                 按名称移除整格物品
  inventory                   查看物品栏
  move <from> <to> [half|one] 拖拽格子到另一格
  drop <slot> [half|one]      把格子里的物品丢到世界
  grab                        拿起 / 扔出（右键）
  use                         挂到背包 / 直接收取（E）
  tab                         开关物品栏（Tab）
  peek on|off                 按住 / 松开 Q
  hold on|off                 按住 / 松开左键
  look <object>               视线对准某个物体
  world                       列出场景物体
";

#[allow(clippy::too_many_arguments)]
fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    mut out: CliWriters,
    mut buttons: ResMut<HeldButtons>,
    state: Res<State<AppState>>,
    catalog: Res<ItemCatalog>,
    inventory: Res<Inventory>,
    hands: Res<Hands>,
    screen: Res<InventoryScreen>,
    panel: Res<BackpackScreen>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(HELP.into()));
            }

            Command::Status => {
                log.write(LogEvent(format!(
                    "State: {:?}, Items Loaded: {}, Slots: {}/{} free, Holding: {}",
                    state.get(),
                    catalog.items.len(),
                    inventory.empty_slots(),
                    inventory.capacity(),
                    hands.held.is_some(),
                )));
                log.write(LogEvent(format!(
                    "Inventory: {}, Camera frozen: {}, Crosshair: {}, Backpack panel: {} (aimed: {})",
                    screen.open,
                    screen.camera_frozen,
                    screen.crosshair_visible,
                    panel.open,
                    panel.from_backpack,
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Items(None) => {
                for entry in &catalog.items {
                    let uuid = uuid_from_id(&entry.id);
                    log.write(LogEvent(format!("{} | {} | {}", uuid, entry.id, entry.name)));
                }
            }

            Command::Items(Some(token)) => {
                let found = catalog
                    .find(&token)
                    .or_else(|| catalog.items.iter().find(|e| uuid_from_id(&e.id).to_string() == token));
                match found {
                    Some(e) => {
                        let uuid = uuid_from_id(&e.id);
                        log.write(LogEvent(format!(
                            "==================================================
UUID     : {uuid}
ID       : {}
Name     : {}
Category : {:?}
Weight   : {}
Stack    : {}
==================================================",
                            e.id, e.name, e.category, e.weight, e.max_stack
                        )));
                    }
                    None => {
                        log.write(LogEvent("未找到匹配物品".into()));
                    }
                }
            }

            Command::Give { id, count } => {
                out.give.write(GiveItemEvent { id, count });
            }

            Command::Take(name) => {
                out.take.write(TakeItemEvent { name });
            }

            Command::Inventory => {
                out.list.write(ListInventoryEvent);
            }

            Command::Move { from, to, split } => {
                out.release.write(SlotReleased {
                    source: from,
                    target: ReleaseTarget::Slot(to),
                    split,
                });
            }

            Command::Drop { slot, split } => {
                out.release.write(SlotReleased {
                    source: slot,
                    target: ReleaseTarget::World,
                    split,
                });
            }

            Command::Grab => {
                out.grab.write(GrabOrThrow);
            }

            Command::Use => {
                out.interact.write(Interact);
            }

            Command::Tab => {
                out.toggle.write(ToggleInventoryEvent);
            }

            Command::Peek(on) => {
                buttons.peek = on;
            }

            Command::Hold(on) => {
                buttons.primary = on;
            }

            Command::Look(target) => {
                out.look.write(LookAtEvent { target });
            }

            Command::World => {
                out.world.write(ListWorldEvent);
            }

            Command::Invalid(usage) => {
                log.write(LogEvent(format!("用法: {usage}")));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_split(token: Option<&str>) -> Option<SplitRequest> {
    match token.map(str::to_lowercase).as_deref() {
        None | Some("all") => Some(SplitRequest::Whole),
        Some("half" | "shift") => Some(SplitRequest::Half),
        Some("one" | "ctrl") => Some(SplitRequest::Single),
        Some(_) => None,
    }
}

fn parse_switch(token: Option<&str>) -> Option<bool> {
    match token.map(str::to_lowercase).as_deref() {
        Some("on" | "down" | "1") => Some(true),
        Some("off" | "up" | "0") => Some(false),
        _ => None,
    }
}

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "give" => {
            let id = parts.next().unwrap_or("").to_string();
            let cnt = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Give { id, count: cnt }
        }
        "take" => {
            // 名称可能带空格
            let name = parts.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                Command::Invalid("take <name>".into())
            } else {
                Command::Take(name)
            }
        }
        "inventory" | "inv" => Command::Inventory,
        "move" | "mv" => {
            let from = parts.next().and_then(|s| s.parse().ok());
            let to = parts.next().and_then(|s| s.parse().ok());
            match (from, to, parse_split(parts.next())) {
                (Some(from), Some(to), Some(split)) => Command::Move { from, to, split },
                _ => Command::Invalid("move <from> <to> [half|one]".into()),
            }
        }
        "drop" => {
            let slot = parts.next().and_then(|s| s.parse().ok());
            match (slot, parse_split(parts.next())) {
                (Some(slot), Some(split)) => Command::Drop { slot, split },
                _ => Command::Invalid("drop <slot> [half|one]".into()),
            }
        }
        "grab" | "throw" => Command::Grab,
        "use" | "e" => Command::Use,
        "tab" => Command::Tab,
        "peek" => match parse_switch(parts.next()) {
            Some(on) => Command::Peek(on),
            None => Command::Invalid("peek on|off".into()),
        },
        "hold" => match parse_switch(parts.next()) {
            Some(on) => Command::Hold(on),
            None => Command::Invalid("hold on|off".into()),
        },
        "look" => match parts.next() {
            Some(target) => Command::Look(target.to_string()),
            None => Command::Invalid("look <object>".into()),
        },
        "world" | "w" => Command::World,
        other => Command::Unsupported(other.into()),
    }
}

fn uuid_from_id(id: &str) -> Uuid {
    // 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_parses_modifiers() {
        assert_eq!(
            parse_command("move 0 3"),
            Command::Move { from: 0, to: 3, split: SplitRequest::Whole }
        );
        assert_eq!(
            parse_command("mv 1 2 shift"),
            Command::Move { from: 1, to: 2, split: SplitRequest::Half }
        );
        assert_eq!(
            parse_command("move 1 2 ONE"),
            Command::Move { from: 1, to: 2, split: SplitRequest::Single }
        );
        assert!(matches!(parse_command("move 1 x"), Command::Invalid(_)));
        assert!(matches!(parse_command("move 1 2 most"), Command::Invalid(_)));
    }

    #[test]
    fn drop_defaults_to_whole_stack() {
        assert_eq!(
            parse_command("drop 4"),
            Command::Drop { slot: 4, split: SplitRequest::Whole }
        );
        assert_eq!(
            parse_command("drop 4 half"),
            Command::Drop { slot: 4, split: SplitRequest::Half }
        );
        assert!(matches!(parse_command("drop"), Command::Invalid(_)));
    }

    #[test]
    fn give_defaults_to_one() {
        assert_eq!(
            parse_command("give apple"),
            Command::Give { id: "apple".into(), count: 1 }
        );
        assert_eq!(
            parse_command("give rope 3"),
            Command::Give { id: "rope".into(), count: 3 }
        );
    }

    #[test]
    fn take_keeps_names_with_spaces() {
        assert_eq!(parse_command("take Old Rope"), Command::Take("Old Rope".into()));
        assert!(matches!(parse_command("take"), Command::Invalid(_)));
    }

    #[test]
    fn switches_and_simple_commands() {
        assert_eq!(parse_command("peek on"), Command::Peek(true));
        assert_eq!(parse_command("hold off"), Command::Hold(false));
        assert!(matches!(parse_command("peek maybe"), Command::Invalid(_)));
        assert_eq!(parse_command("tab"), Command::Tab);
        assert_eq!(parse_command("grab"), Command::Grab);
        assert_eq!(parse_command("use"), Command::Use);
        assert_eq!(parse_command("look backpack"), Command::Look("backpack".into()));
        assert_eq!(parse_command("dance"), Command::Unsupported("dance".into()));
    }

    #[test]
    fn uuid_is_stable_per_id() {
        assert_eq!(uuid_from_id("apple"), uuid_from_id("apple"));
        assert_ne!(uuid_from_id("apple"), uuid_from_id("rope"));
        assert_eq!(uuid_from_id("apple").get_version_num(), 5);
    }
}

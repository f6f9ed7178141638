use bevy::prelude::*;

/// 控制台输出：所有面向玩家的文字都走这里
#[derive(Event, Debug, Clone)]
pub struct LogEvent(pub String);

/// 统一打印，避免各系统直接 println
pub fn forward_log_event(mut reader: EventReader<LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}

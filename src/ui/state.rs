use bevy::prelude::*;

/// 鼠标光标状态，apply_cursor 负责同步到窗口
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub locked: bool,
    pub visible: bool,
}

impl CursorState {
    pub const LOCKED: Self = Self {
        locked: true,
        visible: false,
    };
}

impl Default for CursorState {
    fn default() -> Self {
        Self::LOCKED
    }
}

/// 仍被按住的按键（设备或 CLI 都可以改）
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct HeldButtons {
    /// Q：偷看背包
    pub peek: bool,
    /// 鼠标左键
    pub primary: bool,
}

/// 物品栏面板
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InventoryScreen {
    pub open: bool,
    pub camera_frozen: bool,
    pub crosshair_visible: bool,
}

impl Default for InventoryScreen {
    fn default() -> Self {
        Self {
            open: false,
            camera_frozen: false,
            crosshair_visible: true,
        }
    }
}

impl InventoryScreen {
    pub fn open(&mut self, freeze_camera: bool, wanted: CursorState, cursor: &mut CursorState) {
        self.open = true;
        self.crosshair_visible = false;
        self.camera_frozen = freeze_camera;
        *cursor = wanted;
    }

    pub fn close(&mut self, cursor: &mut CursorState) {
        self.open = false;
        self.crosshair_visible = true;
        self.camera_frozen = false;
        *cursor = CursorState::LOCKED;
    }

    /// Tab：打开时冻结视角、显示光标
    pub fn toggle(&mut self, cursor: &mut CursorState) {
        if self.open {
            self.close(cursor);
        } else {
            self.open(
                true,
                CursorState {
                    locked: true,
                    visible: true,
                },
                cursor,
            );
        }
    }

    /// 按住 Q 时每帧调用：看着背包就打开（不冻结视角），否则关闭
    pub fn peek(&mut self, aiming_at_backpack: bool, cursor: &mut CursorState) {
        if aiming_at_backpack {
            self.open(
                false,
                CursorState {
                    locked: false,
                    visible: false,
                },
                cursor,
            );
        } else {
            self.close(cursor);
        }
    }
}

/// 看着背包并按住左键时显示的背包面板
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct BackpackScreen {
    pub open: bool,
    pub from_backpack: bool,
}

impl BackpackScreen {
    pub fn update(
        &mut self,
        inventory_open: bool,
        aiming_at_backpack: bool,
        primary_held: bool,
        cursor: &mut CursorState,
    ) {
        if !inventory_open && aiming_at_backpack && primary_held {
            self.from_backpack = true;
            if !self.open {
                self.open = true;
                *cursor = CursorState {
                    locked: false,
                    visible: true,
                };
            }
            return;
        }

        self.from_backpack = false;
        if self.open {
            self.open = false;
            // 物品栏开着时光标归它管
            if !inventory_open {
                *cursor = CursorState::LOCKED;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_frozen_then_closes_locked() {
        let mut screen = InventoryScreen::default();
        let mut cursor = CursorState::default();
        screen.toggle(&mut cursor);
        assert!(screen.open && screen.camera_frozen && !screen.crosshair_visible);
        assert!(cursor.visible);

        screen.toggle(&mut cursor);
        assert_eq!(screen, InventoryScreen::default());
        assert_eq!(cursor, CursorState::LOCKED);
    }

    #[test]
    fn peek_opens_without_freezing_and_closes_when_looking_away() {
        let mut screen = InventoryScreen::default();
        let mut cursor = CursorState::default();
        screen.peek(true, &mut cursor);
        assert!(screen.open);
        assert!(!screen.camera_frozen);
        assert!(!cursor.locked);

        screen.peek(false, &mut cursor);
        assert!(!screen.open);
        assert_eq!(cursor, CursorState::LOCKED);
    }

    #[test]
    fn backpack_panel_needs_aim_and_button() {
        let mut panel = BackpackScreen::default();
        let mut cursor = CursorState::default();
        panel.update(false, true, false, &mut cursor);
        assert!(!panel.open);

        panel.update(false, true, true, &mut cursor);
        assert!(panel.open && panel.from_backpack);
        assert!(cursor.visible && !cursor.locked);

        panel.update(false, false, true, &mut cursor);
        assert!(!panel.open);
        assert_eq!(cursor, CursorState::LOCKED);
    }

    #[test]
    fn inventory_panel_closes_backpack_panel_and_keeps_cursor() {
        let mut panel = BackpackScreen::default();
        let mut cursor = CursorState::default();
        panel.update(false, true, true, &mut cursor);

        let inventory_cursor = CursorState {
            locked: true,
            visible: true,
        };
        cursor = inventory_cursor;
        panel.update(true, true, true, &mut cursor);
        assert!(!panel.open);
        assert_eq!(cursor, inventory_cursor);
    }
}

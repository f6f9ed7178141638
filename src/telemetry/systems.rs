use bevy::prelude::*;
use bevy::tasks::IoTaskPool;

use super::client::{InventoryReport, ReportAction, TelemetryClient};
use crate::inventory::events::{ItemAdded, ItemRemoved};

/// 收集本帧的增删事件
pub fn collect_reports(
    added: &mut EventReader<ItemAdded>,
    removed: &mut EventReader<ItemRemoved>,
) -> Vec<InventoryReport> {
    let adds = added.read().map(|e| {
        debug!("report add {} ×{}", e.item_id, e.count);
        InventoryReport {
            item_id: e.item_id.clone(),
            action: ReportAction::Add,
        }
    });
    let removes = removed.read().map(|e| {
        debug!("report remove {} ×{}", e.item_id, e.count);
        InventoryReport {
            item_id: e.item_id.clone(),
            action: ReportAction::Remove,
        }
    });
    adds.chain(removes).collect()
}

/// 每条变更起一个后台任务，结果只写日志
pub fn report_inventory_changes(
    mut added: EventReader<ItemAdded>,
    mut removed: EventReader<ItemRemoved>,
    client: Res<TelemetryClient>,
) {
    for report in collect_reports(&mut added, &mut removed) {
        let client = client.clone();
        IoTaskPool::get()
            .spawn(async move {
                match client.submit(&report) {
                    Ok(resp) => info!(
                        "上报成功: {} {:?} (status {}, data {})",
                        report.item_id, report.action, resp.status, resp.data_submitted
                    ),
                    Err(err) => warn!("上报失败 ({} {:?}): {err}", report.item_id, report.action),
                }
            })
            .detach();
    }
}

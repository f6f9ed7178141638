use bevy::prelude::*;
use thiserror::Error;

use crate::data::schema::ItemCategory;

/// 背包上的一个挂点：一个大类对应一个挂点，同时只挂一个物体
#[derive(Debug, Clone, PartialEq)]
pub struct Mount {
    pub category: ItemCategory,
    pub point: Entity,
    pub occupant: Option<Entity>,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Backpack {
    pub mounts: Vec<Mount>,
}

/// 挂在背包上的物体
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AttachedTo {
    pub backpack: Entity,
    pub point: Entity,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachError {
    #[error("{0} is not a backpack")]
    NoBackpack(Entity),
    #[error("object {0} carries no item")]
    NotAnItem(Entity),
    #[error("backpack has no mount for {0:?} items")]
    NoMount(ItemCategory),
    #[error("{category:?} mount is already holding {occupant}")]
    Occupied { category: ItemCategory, occupant: Entity },
    #[error("inventory has no room for {0}")]
    InventoryFull(String),
}

impl Backpack {
    /// 为物体占用对应大类的挂点，返回挂点实体
    pub fn claim(&mut self, category: ItemCategory, object: Entity) -> Result<Entity, AttachError> {
        let mount = self
            .mounts
            .iter_mut()
            .find(|m| m.category == category)
            .ok_or(AttachError::NoMount(category))?;
        match mount.occupant {
            Some(occupant) if occupant != object => Err(AttachError::Occupied { category, occupant }),
            _ => {
                mount.occupant = Some(object);
                Ok(mount.point)
            }
        }
    }

    /// 释放物体占用的挂点
    pub fn release(&mut self, object: Entity) -> Option<Entity> {
        let mount = self.mounts.iter_mut().find(|m| m.occupant == Some(object))?;
        mount.occupant = None;
        Some(mount.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backpack() -> Backpack {
        Backpack {
            mounts: vec![
                Mount {
                    category: ItemCategory::Food,
                    point: Entity::from_raw(10),
                    occupant: None,
                },
                Mount {
                    category: ItemCategory::Weapon,
                    point: Entity::from_raw(11),
                    occupant: None,
                },
            ],
        }
    }

    #[test]
    fn claim_picks_mount_by_category() {
        let mut bp = backpack();
        let apple = Entity::from_raw(1);
        assert_eq!(bp.claim(ItemCategory::Food, apple), Ok(Entity::from_raw(10)));
        assert_eq!(bp.mounts[0].occupant, Some(apple));
    }

    #[test]
    fn missing_category_is_rejected() {
        let mut bp = backpack();
        assert_eq!(
            bp.claim(ItemCategory::Common, Entity::from_raw(1)),
            Err(AttachError::NoMount(ItemCategory::Common))
        );
    }

    #[test]
    fn one_object_per_mount() {
        let mut bp = backpack();
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        bp.claim(ItemCategory::Food, first).unwrap();
        assert_eq!(
            bp.claim(ItemCategory::Food, second),
            Err(AttachError::Occupied {
                category: ItemCategory::Food,
                occupant: first
            })
        );
        assert_eq!(bp.release(first), Some(Entity::from_raw(10)));
        assert!(bp.claim(ItemCategory::Food, second).is_ok());
    }

    #[test]
    fn release_unknown_object_is_none() {
        let mut bp = backpack();
        assert_eq!(bp.release(Entity::from_raw(7)), None);
    }
}

use bevy_rapier2d::prelude::*;

pub const CAR_GROUP: Group = Group::GROUP_1;
pub const WHEEL_GROUP: Group = Group::GROUP_2;
pub const GROUND_GROUP: Group = Group::GROUP_3;
pub const PICKUP_GROUP: Group = Group::GROUP_4;
pub const TRAIL_GROUP: Group = Group::GROUP_5;

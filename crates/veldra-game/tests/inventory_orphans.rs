// Copyright 2025 veldra contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pins the orphaning behavior for items whose container is destroyed:
//! they are relocated to the container's world position and dropped from
//! container bookkeeping, but never destroyed and their show state is
//! left as-is. Any future change to this must be deliberate.

use veldra_core::math::Vec3;
use veldra_game::entity::ItemData;
use veldra_game::{EntityKind, ShowState, World};

#[test]
fn destroying_a_container_orphans_its_items() {
    let mut world = World::new();

    let bag = world.spawn("items/containers/bag/bag", 1);
    world.entities.get_mut(bag).unwrap().pos = Vec3::new(100.0, 0.0, 50.0);
    world.create_inventory(bag, 4);

    let ring = world.spawn("items/magic/ring/ring", 1);
    world.entities.get_mut(ring).unwrap().kind = EntityKind::Item(ItemData::default());
    assert!(world.give_item(bag, ring));
    assert_eq!(world.find_container(ring), Some(bag));

    assert!(world.destroy(bag));

    // The item survives at the container's last world position.
    let orphan = world.entities.get(ring).expect("orphan stays alive");
    assert_eq!(orphan.pos, Vec3::new(100.0, 0.0, 50.0));
    assert_eq!(world.find_container(ring), None);

    // Show state is untouched: the orphan still claims to be carried.
    assert_eq!(orphan.show, ShowState::InInventory);
}

#[test]
fn nested_container_items_land_on_the_middle_containers_position() {
    let mut world = World::new();

    let chest = world.spawn("fix_inter/chest/chest", 1);
    world.entities.get_mut(chest).unwrap().pos = Vec3::new(-20.0, 0.0, 8.0);
    world.create_inventory(chest, 4);

    let bag = world.spawn("items/containers/bag/bag", 1);
    world.entities.get_mut(bag).unwrap().pos = Vec3::new(5.0, 0.0, 5.0);
    world.create_inventory(bag, 2);
    world.entities.get_mut(bag).unwrap().kind = EntityKind::Item(ItemData::default());

    let ring = world.spawn("items/magic/ring/ring", 1);
    world.entities.get_mut(ring).unwrap().kind = EntityKind::Item(ItemData::default());

    assert!(world.give_item(chest, bag));
    assert!(world.give_item(bag, ring));

    // While the chain is intact, the ring's world position is the
    // outermost container's.
    assert_eq!(world.item_world_position(ring), Vec3::new(-20.0, 0.0, 8.0));

    assert!(world.destroy(bag));

    // The bag was pulled out of the chest before its inventory flushed,
    // so the ring lands on the bag's own last world position.
    let orphan = world.entities.get(ring).expect("orphan stays alive");
    assert_eq!(orphan.pos, Vec3::new(5.0, 0.0, 5.0));
    assert_eq!(world.find_container(ring), None);
    assert!(world
        .entities
        .get(chest)
        .unwrap()
        .inventory
        .as_ref()
        .unwrap()
        .is_empty());
}

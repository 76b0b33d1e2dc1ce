// Property tests (consolidated).
//
// Differential testing: drive each map variant with an arbitrary
// operation sequence and mirror every step in a hashbrown::HashMap
// model. After each operation the observable outcome must match the
// model's; at the end, length and full content must agree.
//
// Ops: 0 = put, 1 = get, 2 = remove, 3 = contains, 4 = clear (rare).
// Small key spaces force collisions, replacements, and removals to
// actually occur; tiny initial capacities force repeated growth.
use hashbrown::HashMap;
use proptest::prelude::*;

use pooled_collections::{BytesMap, IntMap, Map};

fn op_strategy() -> impl Strategy<Value = Vec<(u8, u16, i32)>> {
    proptest::collection::vec((0u8..=4u8, 0u16..48u16, any::<i32>()), 1..200)
}

proptest! {
    // Property: Map<String, i32> agrees with the model under arbitrary
    // put/get/remove/contains/clear sequences, across growth.
    #[test]
    fn prop_map_matches_model(ops in op_strategy()) {
        let mut map: Map<String, i32> = Map::with_capacity_and_load_factor(2, 0.8);
        let mut model: HashMap<String, i32> = HashMap::new();

        for (op, raw_key, value) in ops {
            let key = format!("k{}", raw_key);
            match op {
                0 => prop_assert_eq!(map.put(key.clone(), value), model.insert(key, value)),
                1 => prop_assert_eq!(map.get(&key), model.get(&key)),
                2 => prop_assert_eq!(map.remove(&key), model.remove(&key)),
                3 => prop_assert_eq!(map.contains_key(&key), model.contains_key(&key)),
                4 => {
                    // Clear rarely; only when the roll lands on a small slice.
                    if raw_key < 4 {
                        map.clear();
                        model.clear();
                    }
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(map.len(), model.len());
        }

        // Final content agreement, both by lookup and by iteration.
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
        let mut mine: Vec<(String, i32)> = map.iter().map(|(k, &v)| (k.clone(), v)).collect();
        let mut theirs: Vec<(String, i32)> = model.iter().map(|(k, &v)| (k.clone(), v)).collect();
        mine.sort();
        theirs.sort();
        prop_assert_eq!(mine, theirs);
    }

    // Property: IntMap agrees with the model; the identity hash makes
    // the key space itself drive bucket collisions.
    #[test]
    fn prop_int_map_matches_model(ops in op_strategy()) {
        let mut map: IntMap<i32> = IntMap::with_capacity_and_load_factor(2, 0.8);
        let mut model: HashMap<i32, i32> = HashMap::new();

        for (op, raw_key, value) in ops {
            // Spread keys so some pairs collide at small capacities.
            let key = (raw_key as i32) * 3 - 64;
            match op {
                0 => prop_assert_eq!(map.put(key, value), model.insert(key, value)),
                1 => prop_assert_eq!(map.get(key), model.get(&key)),
                2 => prop_assert_eq!(map.remove(key), model.remove(&key)),
                3 => prop_assert_eq!(map.contains_key(key), model.contains_key(&key)),
                4 => {
                    if raw_key < 4 {
                        map.clear();
                        model.clear();
                    }
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(map.len(), model.len());
        }

        for (&k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }

    // Property: BytesMap agrees with the model while key buffers are
    // pooled and recycled underneath.
    #[test]
    fn prop_bytes_map_matches_model(ops in op_strategy()) {
        let mut map: BytesMap<i32> = BytesMap::with_parameters(2, 8, 0.8);
        let mut model: HashMap<Vec<u8>, i32> = HashMap::new();

        for (op, raw_key, value) in ops {
            let key = format!("b{}", raw_key).into_bytes();
            match op {
                0 => {
                    let put = map.put(&key, value);
                    prop_assert!(put.is_ok());
                    prop_assert_eq!(put.unwrap(), model.insert(key, value));
                }
                1 => prop_assert_eq!(map.get(&key), model.get(&key)),
                2 => prop_assert_eq!(map.remove(&key), model.remove(&key)),
                3 => prop_assert_eq!(map.contains_key(&key), model.contains_key(&key)),
                4 => {
                    if raw_key < 4 {
                        map.clear();
                        model.clear();
                    }
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(map.len(), model.len());
        }

        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
        let mut mine: Vec<(Vec<u8>, i32)> = map.iter().map(|(k, &v)| (k.to_vec(), v)).collect();
        let mut theirs: Vec<(Vec<u8>, i32)> = model.iter().map(|(k, &v)| (k.clone(), v)).collect();
        mine.sort();
        theirs.sort();
        prop_assert_eq!(mine, theirs);
    }

    // Property: a cursor pass that removes a random subset leaves the
    // map holding exactly the complement, verified by a second pass.
    #[test]
    fn prop_cursor_removal_subset(
        keys in proptest::collection::btree_set(0i32..256, 1..64),
        selector in any::<u32>(),
    ) {
        let mut map: IntMap<i32> = IntMap::with_capacity_and_load_factor(4, 0.8);
        for &k in &keys {
            map.put(k, k);
        }

        let keep = |k: i32| (k as u32).wrapping_mul(selector | 1) % 3 != 0;

        let mut cursor = map.cursor();
        while let Some(&v) = cursor.next() {
            if !keep(v) {
                prop_assert_eq!(cursor.remove(), Some(v));
            }
        }
        drop(cursor);

        let expected: Vec<i32> = keys.iter().copied().filter(|&k| keep(k)).collect();
        prop_assert_eq!(map.len(), expected.len());

        let mut second_pass = Vec::new();
        let mut cursor = map.cursor();
        while cursor.next().is_some() {
            second_pass.push(cursor.key().unwrap());
        }
        second_pass.sort_unstable();
        prop_assert_eq!(second_pass, expected);
    }
}

#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check chain
// placement against the crate-private bucket index.

use crate::hasher::{BucketHash, DefaultBucketHash};
use crate::{Attributes, HashTable, TableError};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Update(usize, String, i32),
    UpdateOrInsert(usize, i32),
    Remove(usize),
    Find(usize),
    Contains(String),
    Iterate,
}

fn attrs(v: i32) -> Attributes<i32> {
    let mut a = Attributes::new();
    a.insert("v".to_string(), v);
    a
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), "[vw]", any::<i32>()).prop_map(|(i, n, v)| OpI::Update(i, n, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::UpdateOrInsert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Find),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected and leave the stored attributes untouched.
// - `find`/`contains` parity with the model; `find` returns the right key.
// - `update` merges into present keys and never inserts absent ones.
// - `remove` returns the owned entry matching the model, or KeyNotFound.
// - keys/values/items agree pairwise; the key set equals the model's.
// - Every entry sits in the bucket its hash names.
fn run_state_machine<H: BucketHash>(
    mut sut: HashTable<i32, H>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, HashMap<String, i32>> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                match sut.insert(k.clone(), attrs(v)) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        model.insert(k.clone(), [("v".to_string(), v)].into_iter().collect());
                    }
                    Err(TableError::KeyAlreadyExists(dup)) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(&dup, k);
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {}", e),
                }
            }
            OpI::Update(i, name, v) => {
                let k = &pool[i];
                let mut change = Attributes::new();
                change.insert(name.clone(), v);
                let updated = sut.update(k, change).expect("default hash stays in range");
                match model.get_mut(k) {
                    Some(m) => {
                        prop_assert!(updated);
                        m.insert(name, v);
                    }
                    None => {
                        prop_assert!(!updated);
                        prop_assert!(!sut.contains(k), "update must not insert");
                    }
                }
            }
            OpI::UpdateOrInsert(i, v) => {
                let k = &pool[i];
                let updated = sut.update_or_insert(k.clone(), attrs(v)).expect("in range");
                prop_assert_eq!(updated, model.contains_key(k));
                model.entry(k.clone()).or_default().insert("v".to_string(), v);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                match (sut.remove(k), model.remove(k)) {
                    (Ok(entry), Some(m)) => {
                        prop_assert_eq!(entry.key(), k.as_str());
                        let got: HashMap<String, i32> = entry.into_parts().1.into_iter().collect();
                        prop_assert_eq!(got, m);
                    }
                    (Err(TableError::KeyNotFound(missing)), None) => prop_assert_eq!(&missing, k),
                    (r, m) => prop_assert!(false, "remove mismatch: {:?} vs {:?}", r.map(|e| e.key().to_string()), m),
                }
                prop_assert!(sut.find(k).is_err());
            }
            OpI::Find(i) => {
                let k = &pool[i];
                match sut.find(k) {
                    Ok(entry) => {
                        prop_assert_eq!(entry.key(), k.as_str());
                        let got: HashMap<String, i32> =
                            entry.attributes().iter().map(|(n, v)| (n.clone(), *v)).collect();
                        prop_assert_eq!(Some(&got), model.get(k));
                    }
                    Err(TableError::KeyNotFound(_)) => prop_assert!(!model.contains_key(k)),
                    Err(e) => prop_assert!(false, "unexpected error: {}", e),
                }
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
            OpI::Iterate => {
                let keys: Vec<&str> = sut.keys().collect();
                let values: Vec<_> = sut.values().collect();
                let items: Vec<_> = sut.items().collect();
                prop_assert_eq!(keys.len(), values.len());
                prop_assert_eq!(keys.len(), items.len());
                for (i, (k, v)) in items.iter().enumerate() {
                    prop_assert_eq!(*k, keys[i]);
                    prop_assert!(core::ptr::eq(*v, values[i]));
                }
                let s_keys: BTreeSet<String> = keys.iter().map(|k| k.to_string()).collect();
                let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.chain_lengths().iter().sum::<usize>(), model.len());
        for index in 0..sut.capacity() {
            for entry in sut.bucket(index).expect("index in range") {
                prop_assert_eq!(sut.index_for(entry.key()), Ok(index));
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), capacity in 1usize..=7) {
        let sut = HashTable::with_hash(capacity, DefaultBucketHash::new()).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}

// Same invariants under worst-case collisions: every key chains into bucket 0.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), capacity in 1usize..=4) {
        let sut = HashTable::with_hash(capacity, |_: &str, _: usize| 0usize).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}

// Round trip: inserting distinct keys then removing them all, in any
// order, empties the table.
proptest! {
    #[test]
    fn prop_insert_remove_round_trip(
        keys in proptest::collection::btree_set("[a-zA-Z]{1,6}", 0..40),
        capacity in 1usize..=9,
        seed in any::<u64>(),
    ) {
        let mut t: HashTable<i32> = HashTable::new(capacity).unwrap();
        let mut order: Vec<String> = keys.into_iter().collect();
        for (n, k) in order.iter().enumerate() {
            t.insert(k.clone(), attrs(n as i32)).unwrap();
        }
        prop_assert_eq!(t.len(), order.len());

        // Deterministic shuffle from the seed.
        let mut s = seed;
        for i in (1..order.len()).rev() {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            order.swap(i, (s >> 33) as usize % (i + 1));
        }
        for k in &order {
            let e = t.remove(k).unwrap();
            prop_assert_eq!(e.key(), k.as_str());
            prop_assert!(!t.contains(k));
        }
        prop_assert!(t.is_empty());
        prop_assert_eq!(t.keys().count(), 0);
    }
}

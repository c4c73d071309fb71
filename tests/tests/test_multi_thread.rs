// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bond::{Bond, BondType, StructValue, TypeCache};
use dashmap::DashMap;
use std::sync::Arc;
use std::thread;
use tests::{point, top, top_value};

#[test]
fn test_concurrent_construction_yields_equal_keys() {
    let table: Arc<DashMap<BondType, usize>> = Arc::new(DashMap::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                let ty = BondType::bonded_of(&point());
                *table.entry(ty.clone()).or_insert(0) += 1;
                ty
            })
        })
        .collect();
    let built: Vec<BondType> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for a in built.iter() {
        for b in built.iter() {
            assert_eq!(a, b);
        }
    }
    assert_eq!(table.len(), 1);
    assert_eq!(*table.get(&built[0]).unwrap(), 8);
}

#[test]
fn test_type_cache_interns_across_threads() {
    let cache = TypeCache::new();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || cache.bonded_of(&point()))
        })
        .collect();
    let built: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(built.iter().all(|b| *b == built[0]));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.struct_type(point()), point());
}

#[test]
fn test_shared_engine() {
    let bond = Arc::new(Bond::default());
    let handles: Vec<_> = (0..4i32)
        .map(|i| {
            let bond = Arc::clone(&bond);
            thread::spawn(move || {
                let value = StructValue::new().with(0, i).with(1, i * 10);
                let bytes = bond.serialize(&point(), &value).unwrap();
                assert_eq!(bond.deserialize(&point(), &bytes).unwrap(), value);
                let nested = bond.serialize(&top(), &top_value()).unwrap();
                bond.deserialize(&top(), &nested).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), top_value());
    }
}

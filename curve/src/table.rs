//! Precomputation tables and their memo caches.
//!
//! Three table shapes serve the engines: odd multiples for signed-digit
//! recodings, a full `0..2^w` table for unsigned chunks, and the per-window
//! layout of the offset engine. Tables are shared behind `Arc` and memoised
//! per curve in bounded LRU caches keyed by the point's coordinates.

use crate::batch::batch_inverse;
use crate::curves::CurveParams;
use crate::Group;
use log::trace;
use num_bigint::BigUint;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Tables kept per curve and table shape.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;
/// Cached `(point, scalar)` products for the recursive halving engines.
pub const DEFAULT_PRODUCT_CAPACITY: usize = 4096;

/// A table point with its lazily computed negation.
#[derive(Debug)]
pub struct Entry<P> {
    point: P,
    neg: OnceLock<P>,
}

impl<P: Group> Entry<P> {
    fn new(point: P) -> Self {
        Entry {
            point,
            neg: OnceLock::new(),
        }
    }

    #[inline]
    pub fn point(&self) -> &P {
        &self.point
    }

    /// The negated point, computed on first use.
    pub fn negated(&self, curve: &P::Curve) -> &P {
        self.neg.get_or_init(|| self.point.negate(curve))
    }

    #[inline]
    pub fn signed(&self, negative: bool, curve: &P::Curve) -> &P {
        if negative {
            self.negated(curve)
        } else {
            &self.point
        }
    }
}

/// Scale every point to `z = 1` with a single batch inversion.
pub fn normalize_all<P: Group>(points: &[P], curve: &P::Curve) -> Vec<P> {
    let zs: Vec<BigUint> = points.iter().map(|p| p.z().clone()).collect();
    let inverses = batch_inverse(curve.field(), &zs);
    points
        .iter()
        .zip(&inverses)
        .map(|(p, zi)| p.normalize(curve, Some(zi)))
        .collect()
}

/// Odd multiples `P, 3P, ..., (2^(w-1) - 1)P`, stored densely.
#[derive(Debug)]
pub struct OddTable<P> {
    w: u32,
    entries: Vec<Entry<P>>,
}

impl<P: Group> OddTable<P> {
    pub fn build(point: &P, w: u32, normalize: bool, curve: &P::Curve) -> Self {
        assert!(w >= 2, "odd table window must be at least 2");

        let count = 1usize << (w - 2);
        let mut points = Vec::with_capacity(count);
        points.push(point.clone());
        let two = point.double(curve);
        for i in 1..count {
            let next = points[i - 1].add(&two, curve);
            points.push(next);
        }
        if normalize {
            points = normalize_all(&points, curve);
        }
        trace!("built odd table: w = {w}, {count} points, normalized = {normalize}");

        OddTable {
            w,
            entries: points.into_iter().map(Entry::new).collect(),
        }
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for the odd multiple `|digit| * P`.
    #[inline]
    pub fn entry(&self, digit: i64) -> &Entry<P> {
        &self.entries[(digit.unsigned_abs() as usize - 1) / 2]
    }

    /// `digit * P` for a nonzero odd digit, negated for negative digits.
    #[inline]
    pub fn get(&self, digit: i64, curve: &P::Curve) -> &P {
        self.entry(digit).signed(digit < 0, curve)
    }

    pub fn points(&self) -> impl Iterator<Item = &P> {
        self.entries.iter().map(Entry::point)
    }
}

/// Every multiple `0P, 1P, ..., (2^w - 1)P`.
#[derive(Debug)]
pub struct BaseTable<P> {
    w: u32,
    entries: Vec<P>,
}

impl<P: Group> BaseTable<P> {
    /// Built by binary recursion: even indices double the entry at half the
    /// index, odd ones add the low bits to the top power of two.
    pub fn build(point: &P, w: u32, normalize: bool, curve: &P::Curve) -> Self {
        assert!(w >= 1, "base table window must be at least 1");

        let size = 1usize << w;
        let mut entries = vec![P::identity(); size];
        entries[1] = point.clone();
        for i in 1..w {
            let bit = 1usize << i;
            entries[bit] = entries[bit >> 1].double(curve);
            for j in 1..bit {
                let idx = bit + j;
                entries[idx] = if idx & 1 == 0 {
                    entries[idx >> 1].double(curve)
                } else {
                    entries[bit].add(&entries[j], curve)
                };
            }
        }
        if normalize {
            entries = normalize_all(&entries, curve);
        }
        trace!("built base table: w = {w}, {size} points, normalized = {normalize}");

        BaseTable { w, entries }
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, chunk: usize) -> &P {
        &self.entries[chunk]
    }
}

/// Per-window multiples for the offset engine: window `i` holds
/// `1..=2^(w-1)` times `2^(w*i) * P`.
#[derive(Debug)]
pub struct WindowTable<P> {
    w: u32,
    windows: usize,
    window_size: usize,
    entries: Vec<Entry<P>>,
}

impl<P: Group> WindowTable<P> {
    pub fn build(point: &P, w: u32, normalize: bool, curve: &P::Curve) -> Self {
        assert!(w >= 2, "window width must be at least 2");

        let (windows, window_size) = window_layout(w, curve.bits());
        let mut points = Vec::with_capacity(windows * window_size);
        let mut p = point.clone();
        for _ in 0..windows {
            let mut base = p.clone();
            points.push(base.clone());
            for _ in 1..window_size {
                base = base.add(&p, curve);
                points.push(base.clone());
            }
            p = base.double(curve);
        }
        if normalize {
            points = normalize_all(&points, curve);
        }
        trace!(
            "built window table: w = {w}, {windows} windows of {window_size}, normalized = {normalize}"
        );

        WindowTable {
            w,
            windows,
            window_size,
            entries: points.into_iter().map(Entry::new).collect(),
        }
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn windows(&self) -> usize {
        self.windows
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entry(&self, offset: usize) -> &Entry<P> {
        &self.entries[offset]
    }
}

/// `(windows, window_size)` for a `w`-bit window over `bits`-bit scalars.
/// One extra window absorbs the final carry.
pub fn window_layout(w: u32, bits: u32) -> (usize, usize) {
    (bits.div_ceil(w) as usize + 1, 1usize << (w - 1))
}

/// Cache key for a table built from a point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableKey {
    x: BigUint,
    y: BigUint,
    z: BigUint,
    w: u32,
    normalized: bool,
}

impl TableKey {
    pub fn new<P: Group>(point: &P, w: u32, normalized: bool) -> Self {
        TableKey {
            x: point.x().clone(),
            y: point.y().clone(),
            z: point.z().clone(),
            w,
            normalized,
        }
    }
}

/// Cache key for a `(point, scalar)` product.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProductKey {
    x: BigUint,
    y: BigUint,
    z: BigUint,
    k: BigUint,
}

impl ProductKey {
    pub fn new<P: Group>(point: &P, k: &BigUint) -> Self {
        ProductKey {
            x: point.x().clone(),
            y: point.y().clone(),
            z: point.z().clone(),
            k: k.clone(),
        }
    }
}

struct LruState<K, V> {
    map: HashMap<K, (V, u64)>,
    tick: u64,
}

/// A bounded least-recently-used map behind a mutex.
///
/// Values are built outside the lock, so two threads missing on the same key
/// may both build it; the later insert wins and the results are identical.
pub struct TableCache<K, V> {
    capacity: usize,
    state: Mutex<LruState<K, V>>,
}

impl<K: Hash + Eq + Clone, V: Clone> TableCache<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        TableCache {
            capacity,
            state: Mutex::new(LruState {
                map: HashMap::with_capacity(capacity.min(256)),
                tick: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruState<K, V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.lock();
        state.tick += 1;
        let tick = state.tick;
        state.map.get_mut(key).map(|(value, used)| {
            *used = tick;
            value.clone()
        })
    }

    pub fn insert(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.lock();
        state.tick += 1;
        let tick = state.tick;
        if !state.map.contains_key(&key) && state.map.len() >= self.capacity {
            let oldest = state
                .map
                .iter()
                .min_by_key(|(_, (_, used))| *used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                state.map.remove(&oldest);
                trace!("cache full ({} entries), evicted least recently used", self.capacity);
            }
        }
        state.map.insert(key, (value, tick));
    }

    /// Return the cached value or build and insert it.
    pub fn get_or_insert_with(&self, key: K, build: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            trace!("cache hit");
            return value;
        }
        let value = build();
        self.insert(key, value.clone());
        value
    }

    pub fn clear(&self) {
        self.lock().map.clear();
    }
}

/// The memo caches attached to a curve descriptor.
pub struct Caches<P> {
    pub odd: TableCache<TableKey, Arc<OddTable<P>>>,
    pub base: TableCache<TableKey, Arc<BaseTable<P>>>,
    pub window: TableCache<TableKey, Arc<WindowTable<P>>>,
    pub products: TableCache<ProductKey, P>,
}

impl<P: Group> Caches<P> {
    pub fn new() -> Self {
        Caches {
            odd: TableCache::with_capacity(DEFAULT_CACHE_CAPACITY),
            base: TableCache::with_capacity(DEFAULT_CACHE_CAPACITY),
            window: TableCache::with_capacity(DEFAULT_CACHE_CAPACITY),
            products: TableCache::with_capacity(DEFAULT_PRODUCT_CAPACITY),
        }
    }

    pub fn odd_table(&self, point: &P, w: u32, normalize: bool, curve: &P::Curve) -> Arc<OddTable<P>> {
        self.odd.get_or_insert_with(TableKey::new(point, w, normalize), || {
            Arc::new(OddTable::build(point, w, normalize, curve))
        })
    }

    pub fn base_table(&self, point: &P, w: u32, normalize: bool, curve: &P::Curve) -> Arc<BaseTable<P>> {
        self.base.get_or_insert_with(TableKey::new(point, w, normalize), || {
            Arc::new(BaseTable::build(point, w, normalize, curve))
        })
    }

    pub fn window_table(
        &self,
        point: &P,
        w: u32,
        normalize: bool,
        curve: &P::Curve,
    ) -> Arc<WindowTable<P>> {
        self.window.get_or_insert_with(TableKey::new(point, w, normalize), || {
            Arc::new(WindowTable::build(point, w, normalize, curve))
        })
    }

    pub fn clear(&self) {
        self.odd.clear();
        self.base.clear();
        self.window.clear();
        self.products.clear();
    }
}

impl<P: Group> Default for Caches<P> {
    fn default() -> Self {
        Self::new()
    }
}

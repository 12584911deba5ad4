//! Global symbol registry.
//!
//! Names are sharded over a handful of mutex-guarded maps to keep lock
//! contention low; the key -> symbol storage is a single `SlotMap`. Symbols
//! are never removed, so a name keeps its key for the life of the process.

use std::hash::Hasher;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use rustc_hash::{FxHashMap, FxHasher};
use slotmap::{DefaultKey, SlotMap};

use super::InternedSymbol;
use crate::Expr;

const NUM_SHARDS: usize = 16;

struct RegistryShard {
    name_to_key: FxHashMap<String, DefaultKey>,
}

struct SymbolRegistry {
    shards: [Mutex<RegistryShard>; NUM_SHARDS],
    symbols: RwLock<SlotMap<DefaultKey, InternedSymbol>>,
}

impl SymbolRegistry {
    fn new() -> Self {
        let shards: [Mutex<RegistryShard>; NUM_SHARDS] = std::array::from_fn(|_| {
            Mutex::new(RegistryShard {
                name_to_key: FxHashMap::default(),
            })
        });

        Self {
            shards,
            symbols: RwLock::new(SlotMap::with_key()),
        }
    }

    fn shard(&self, name: &str) -> MutexGuard<'_, RegistryShard> {
        let mut hasher = FxHasher::default();
        std::hash::Hash::hash(name, &mut hasher);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "only the low bits are needed to pick a shard"
        )]
        let idx = (hasher.finish() as usize) % NUM_SHARDS;
        // The registry holds plain data; a panic elsewhere cannot leave it
        // half-updated, so a poisoned lock is still usable.
        self.shards[idx]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn get_or_insert(&self, name: &str) -> InternedSymbol {
        let mut shard = self.shard(name);

        if let Some(&key) = shard.name_to_key.get(name) {
            drop(shard);
            let symbols = self.symbols.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(symbol) = symbols.get(key) {
                return symbol.clone();
            }
            // Unreachable in practice: keys are never removed.
            return InternedSymbol::new_named(name, key);
        }

        let mut symbols = self.symbols.write().unwrap_or_else(PoisonError::into_inner);
        let key = symbols.insert_with_key(|k| InternedSymbol::new_named(name, k));
        let symbol = symbols[key].clone();
        drop(symbols);
        shard.name_to_key.insert(name.to_owned(), key);
        symbol
    }
}

static REGISTRY: std::sync::LazyLock<SymbolRegistry> =
    std::sync::LazyLock::new(SymbolRegistry::new);

thread_local! {
    // Avoids the shard lock for names this thread has already seen.
    static NAME_CACHE: std::cell::RefCell<FxHashMap<String, InternedSymbol>> =
        std::cell::RefCell::new(FxHashMap::default());
}

/// Get or create the interned symbol for `name`.
pub fn symb_interned(name: &str) -> InternedSymbol {
    if let Some(symbol) = NAME_CACHE.with(|cache| cache.borrow().get(name).cloned()) {
        return symbol;
    }

    let symbol = REGISTRY.get_or_insert(name);
    NAME_CACHE.with(|cache| {
        cache.borrow_mut().insert(name.to_owned(), symbol.clone());
    });
    symbol
}

/// Create (or fetch) the symbol `name` as an expression.
#[must_use]
pub fn symb(name: &str) -> Expr {
    Expr::from_interned(symb_interned(name))
}

/// Check whether `name` has been registered.
pub fn symbol_exists(name: &str) -> bool {
    REGISTRY.shard(name).name_to_key.contains_key(name)
}

/// Number of registered symbols.
pub fn symbol_count() -> usize {
    REGISTRY
        .symbols
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .len()
}

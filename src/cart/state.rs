//! Shopping Cart State Management
//!
//! [`CartStore`] is the only owner of the cart. Both the tool surface and the
//! HTTP surface go through its methods; the line storage itself is private.
//!
//! Every operation holds the cart lock for its whole duration, so a snapshot
//! never observes a half-applied add or remove even when tool calls and HTTP
//! requests run on different worker threads.

use parking_lot::Mutex;
use std::sync::Arc;

use super::helpers::{effective_quantity, round2};
use super::models::{AddOutcome, CartLine, CartSnapshot, RemoveOutcome, SnapshotLine, CURRENCY};
use crate::catalog::{Catalog, Pizza};
use crate::catalog::helpers::normalize_name;
use crate::error::CartError;

// =============================================================================
// Cart Store
// =============================================================================

/// Owner of the single in-memory cart.
pub struct CartStore {
    catalog: Arc<Catalog>,
    /// Lines in order of first add, at most one per normalized name.
    lines: Mutex<Vec<CartLine>>,
}

impl CartStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Case-insensitive exact lookup in the catalog.
    pub fn find_pizza(&self, name: &str) -> Option<&Pizza> {
        self.catalog.find(name)
    }

    /// Adds `quantity` of a pizza (missing or non-positive means 1).
    ///
    /// An existing line keeps its original unit price; a new line takes the
    /// current catalog price.
    pub fn add_to_cart(&self, name: &str, quantity: Option<i64>) -> Result<AddOutcome, CartError> {
        let pizza = self.require_pizza(name)?;
        let mut lines = self.lines.lock();
        Ok(apply_add(&mut lines, pizza, quantity))
    }

    /// Like [`CartStore::add_to_cart`], but also returns the cart as it was
    /// right after this add, taken under the same lock.
    pub fn add_to_cart_with_snapshot(
        &self,
        name: &str,
        quantity: Option<i64>,
    ) -> Result<(AddOutcome, CartSnapshot), CartError> {
        let pizza = self.require_pizza(name)?;
        let mut lines = self.lines.lock();
        let outcome = apply_add(&mut lines, pizza, quantity);
        Ok((outcome, snapshot_of(&lines)))
    }

    /// Removes `quantity` of a pizza (missing or non-positive means 1).
    ///
    /// A line whose quantity would drop to zero or below is deleted.
    pub fn remove_from_cart(
        &self,
        name: &str,
        quantity: Option<i64>,
    ) -> Result<RemoveOutcome, CartError> {
        let mut lines = self.lines.lock();
        apply_remove(&mut lines, name, quantity)
    }

    /// Like [`CartStore::remove_from_cart`], but also returns the cart as it
    /// was right after this remove, taken under the same lock.
    pub fn remove_from_cart_with_snapshot(
        &self,
        name: &str,
        quantity: Option<i64>,
    ) -> Result<(RemoveOutcome, CartSnapshot), CartError> {
        let mut lines = self.lines.lock();
        let outcome = apply_remove(&mut lines, name, quantity)?;
        Ok((outcome, snapshot_of(&lines)))
    }

    /// Computes a fresh snapshot of the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        snapshot_of(&self.lines.lock())
    }

    fn require_pizza(&self, name: &str) -> Result<&Pizza, CartError> {
        self.find_pizza(name)
            .ok_or_else(|| CartError::PizzaNotFound(name.trim().to_string()))
    }
}

// Callers hold the cart lock for the duration of these.

fn apply_add(lines: &mut Vec<CartLine>, pizza: &Pizza, quantity: Option<i64>) -> AddOutcome {
    let added = effective_quantity(quantity);
    let key = normalize_name(&pizza.name);

    let line = match lines.iter().position(|l| l.key == key) {
        Some(index) => {
            let line = &mut lines[index];
            line.quantity = line.quantity.saturating_add(added);
            line
        }
        None => {
            lines.push(CartLine {
                key,
                name: pizza.name.clone(),
                unit_price: pizza.price,
                quantity: added,
            });
            let last = lines.len() - 1;
            &mut lines[last]
        }
    };

    tracing::debug!(pizza = %line.name, added, quantity = line.quantity, "cart add");

    AddOutcome {
        name: line.name.clone(),
        added,
        quantity: line.quantity,
        unit_price: line.unit_price,
    }
}

fn apply_remove(
    lines: &mut Vec<CartLine>,
    name: &str,
    quantity: Option<i64>,
) -> Result<RemoveOutcome, CartError> {
    let key = normalize_name(name);
    let removed = effective_quantity(quantity);

    let index = lines
        .iter()
        .position(|l| l.key == key)
        .ok_or_else(|| CartError::LineNotFound(name.trim().to_string()))?;

    let outcome = if lines[index].quantity <= removed {
        let line = lines.remove(index);
        RemoveOutcome::Removed { name: line.name }
    } else {
        let line = &mut lines[index];
        line.quantity -= removed;
        RemoveOutcome::Updated {
            name: line.name.clone(),
            quantity: line.quantity,
        }
    };

    tracing::debug!(pizza = %outcome.name(), removed, "cart remove");

    Ok(outcome)
}

fn snapshot_of(lines: &[CartLine]) -> CartSnapshot {
    CartSnapshot {
        items: lines.iter().map(SnapshotLine::from).collect(),
        subtotal: round2(lines.iter().map(CartLine::value).sum()),
        currency: CURRENCY,
        item_count: lines.iter().map(|l| u64::from(l.quantity)).sum(),
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// State shared by the tool surface and the HTTP surface
pub struct AppState {
    /// The immutable menu
    pub catalog: Arc<Catalog>,

    /// The single cart of this process
    pub cart: CartStore,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            cart: CartStore::new(Arc::clone(&catalog)),
            catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CartStore {
        let catalog = Catalog::new(vec![
            Pizza {
                name: "Margherita".into(),
                price: 8.0,
                ingredients: vec!["tomato".into(), "mozzarella".into()],
                allergens: vec!["dairy".into()],
            },
            Pizza {
                name: "Quattro Formaggi".into(),
                price: 10.1,
                ingredients: vec!["mozzarella".into(), "gorgonzola".into()],
                allergens: vec!["dairy".into()],
            },
        ]);
        CartStore::new(Arc::new(catalog))
    }

    #[test]
    fn repeated_adds_share_one_line() {
        let store = store();
        store.add_to_cart("Margherita", Some(2)).unwrap();
        let outcome = store.add_to_cart("margherita ", Some(1)).unwrap();

        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.quantity, 3);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 3);
        assert_eq!(snapshot.items[0].unit_price, 8.0);
        assert_eq!(snapshot.items[0].line_total, 24.0);
        assert_eq!(snapshot.item_count, 3);
    }

    #[test]
    fn unknown_pizza_is_rejected() {
        let store = store();
        assert_eq!(
            store.add_to_cart("Hawaii", None),
            Err(CartError::PizzaNotFound("Hawaii".into()))
        );
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn non_positive_quantities_count_as_one() {
        let store = store();
        assert_eq!(store.add_to_cart("Margherita", Some(0)).unwrap().added, 1);
        assert_eq!(store.add_to_cart("Margherita", Some(-5)).unwrap().added, 1);
        assert_eq!(store.snapshot().items[0].quantity, 2);
    }

    #[test]
    fn removing_everything_deletes_the_line() {
        let store = store();
        store.add_to_cart("Margherita", Some(3)).unwrap();

        assert_eq!(
            store.remove_from_cart("Margherita", Some(1)).unwrap(),
            RemoveOutcome::Updated {
                name: "Margherita".into(),
                quantity: 2
            }
        );
        assert_eq!(
            store.remove_from_cart("MARGHERITA", Some(10)).unwrap(),
            RemoveOutcome::Removed {
                name: "Margherita".into()
            }
        );

        let snapshot = store.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.subtotal, 0.0);
    }

    #[test]
    fn removing_a_missing_line_leaves_cart_unchanged() {
        let store = store();
        store.add_to_cart("Margherita", None).unwrap();
        let before = store.snapshot();

        assert_eq!(
            store.remove_from_cart("Quattro Formaggi", None),
            Err(CartError::LineNotFound("Quattro Formaggi".into()))
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn snapshot_preserves_first_add_order() {
        let store = store();
        store.add_to_cart("Quattro Formaggi", None).unwrap();
        store.add_to_cart("Margherita", None).unwrap();
        store.add_to_cart("Quattro Formaggi", None).unwrap();

        let first = store.snapshot();
        let second = store.snapshot();
        assert_eq!(first, second);
        let names: Vec<_> = first.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Quattro Formaggi", "Margherita"]);
    }

    #[test]
    fn subtotal_rounds_the_unrounded_sum() {
        let store = store();
        store.add_to_cart("Quattro Formaggi", Some(3)).unwrap();
        store.add_to_cart("Margherita", Some(1)).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items[0].line_total, 30.3);
        assert_eq!(snapshot.subtotal, 38.3);
    }

    #[test]
    fn mutation_snapshots_include_the_mutation() {
        let store = store();
        let (added, cart) = store.add_to_cart_with_snapshot("Margherita", Some(2)).unwrap();
        assert_eq!(added.quantity, 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart, store.snapshot());

        let (removed, cart) = store.remove_from_cart_with_snapshot("margherita", None).unwrap();
        assert_eq!(removed, RemoveOutcome::Updated { name: "Margherita".into(), quantity: 1 });
        assert_eq!(cart.subtotal, 8.0);

        assert_eq!(
            store.remove_from_cart_with_snapshot("Quattro Formaggi", None),
            Err(CartError::LineNotFound("Quattro Formaggi".into()))
        );
    }

    #[test]
    fn concurrent_mutation_snapshots_match_their_outcome() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        if worker % 2 == 0 {
                            let (outcome, cart) =
                                store.add_to_cart_with_snapshot("Margherita", Some(1)).unwrap();
                            assert_eq!(cart.items[0].quantity, outcome.quantity);
                        } else if let Ok((RemoveOutcome::Updated { quantity, .. }, cart)) =
                            store.remove_from_cart_with_snapshot("Margherita", Some(1))
                        {
                            let line = cart.items.iter().find(|i| i.name == "Margherita").unwrap();
                            assert_eq!(line.quantity, quantity);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.add_to_cart("Margherita", Some(1)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.snapshot().items[0].quantity, 800);
    }
}

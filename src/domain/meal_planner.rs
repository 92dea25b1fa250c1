//! Meal Planner - Reactive store of the recipes in the meal plan.
//!
//! The plan is an ordered, append-only sequence. Every mutation publishes a
//! fresh immutable [`Snapshot`]:
//!
//! ```text
//! []  --add(Burger)-->  [Burger]  --add(Salad)-->  [Burger, Salad]
//! ```
//!
//! Two ways to observe it:
//! - read [`MealPlanner::recipes`] inside an `effect` (views do this)
//! - [`MealPlanner::subscribe`] with a callback, called in registration order

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{peek, signal, Signal};

use super::recipe::Recipe;

/// Immutable copy of the plan, shared between readers.
pub type Snapshot = Rc<[Recipe]>;

type Subscriber = Rc<dyn Fn(&Snapshot)>;

/// Read-only reactive view over the plan.
///
/// `get()` inside an effect or derived subscribes it to future snapshots.
#[derive(Clone)]
pub struct RecipesView {
    inner: Signal<Snapshot>,
}

impl RecipesView {
    /// Current snapshot (creates reactive dependency).
    pub fn get(&self) -> Snapshot {
        self.inner.get()
    }
}

/// Append-only meal plan.
pub struct MealPlanner {
    recipes: Signal<Snapshot>,
    subscribers: Rc<RefCell<Vec<(usize, Subscriber)>>>,
    next_id: Cell<usize>,
}

impl Default for MealPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MealPlanner {
    /// Empty plan.
    pub fn new() -> Self {
        let empty: Snapshot = Rc::from(Vec::new());
        Self {
            recipes: signal(empty),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Read-only reactive view.
    pub fn recipes(&self) -> RecipesView {
        RecipesView {
            inner: self.recipes.clone(),
        }
    }

    /// Current snapshot without creating a reactive dependency.
    pub fn snapshot(&self) -> Snapshot {
        peek(|| self.recipes.get())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Append `recipe` and publish the new snapshot.
    ///
    /// Effects reading [`MealPlanner::recipes`] re-run first, then
    /// subscribers are called in registration order. Everything is delivered
    /// before this returns.
    pub fn add_recipe(&self, recipe: Recipe) {
        let next: Snapshot = {
            let current = self.snapshot();
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(recipe);
            next.into()
        };
        tracing::debug!(
            recipe = %next[next.len() - 1].name,
            count = next.len(),
            "recipe added to meal plan"
        );

        self.recipes.set(next.clone());

        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(&next);
        }
    }

    /// Call `subscriber` with the current snapshot now and with every new
    /// snapshot afterwards. Returns cleanup function.
    pub fn subscribe<F>(&self, subscriber: F) -> impl FnOnce()
    where
        F: Fn(&Snapshot) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let subscriber: Subscriber = Rc::new(subscriber);
        self.subscribers.borrow_mut().push((id, subscriber.clone()));
        subscriber(&self.snapshot());

        let subscribers = self.subscribers.clone();
        move || {
            subscribers
                .borrow_mut()
                .retain(|(subscriber_id, _)| *subscriber_id != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;

    fn recipe(name: &str) -> Recipe {
        Recipe::new(format!("rec_{}", name.to_lowercase()), name)
    }

    fn names(snapshot: &Snapshot) -> Vec<String> {
        snapshot.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_starts_empty() {
        let planner = MealPlanner::new();
        assert!(planner.is_empty());
        assert_eq!(planner.recipes().get().len(), 0);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let planner = MealPlanner::new();
        planner.add_recipe(recipe("Burger"));
        planner.add_recipe(recipe("Salad"));
        planner.add_recipe(recipe("Burger"));

        assert_eq!(planner.len(), 3);
        assert_eq!(names(&planner.snapshot()), vec!["Burger", "Salad", "Burger"]);
    }

    #[test]
    fn test_snapshots_are_copies() {
        let planner = MealPlanner::new();
        planner.add_recipe(recipe("Burger"));
        let before = planner.snapshot();
        planner.add_recipe(recipe("Salad"));

        assert_eq!(before.len(), 1);
        assert_eq!(planner.snapshot().len(), 2);
    }

    #[test]
    fn test_effect_sees_every_snapshot() {
        let planner = MealPlanner::new();
        let view = planner.recipes();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();

        let _stop = effect(move || {
            s.borrow_mut().push(view.get().len());
        });

        planner.add_recipe(recipe("Burger"));
        planner.add_recipe(recipe("Salad"));
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_plain_reads_do_not_subscribe() {
        let planner = Rc::new(MealPlanner::new());
        let runs = Rc::new(Cell::new(0));
        let p = planner.clone();
        let r = runs.clone();

        let _stop = effect(move || {
            let _ = p.len();
            let _ = p.is_empty();
            let _ = p.snapshot();
            r.set(r.get() + 1);
        });

        planner.add_recipe(recipe("Burger"));
        planner.add_recipe(recipe("Salad"));
        assert_eq!(runs.get(), 1);
        assert_eq!(planner.len(), 2);
    }

    #[test]
    fn test_subscribers_replay_and_run_in_order() {
        let planner = MealPlanner::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        let _a = planner.subscribe(move |snapshot| l.borrow_mut().push(("a", snapshot.len())));
        let l = log.clone();
        let _b = planner.subscribe(move |snapshot| l.borrow_mut().push(("b", snapshot.len())));

        planner.add_recipe(recipe("Burger"));
        assert_eq!(
            *log.borrow(),
            vec![("a", 0), ("b", 0), ("a", 1), ("b", 1)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let planner = MealPlanner::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let unsubscribe = planner.subscribe(move |_| c.set(c.get() + 1));

        planner.add_recipe(recipe("Burger"));
        unsubscribe();
        planner.add_recipe(recipe("Salad"));
        assert_eq!(count.get(), 2);
    }
}

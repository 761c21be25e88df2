use crate::hashing::HashMap;
use crate::new_trait::New;
use crate::type_of;
use std::any::{Any, TypeId};

/// Holds everything one simulation run needs: its random number streams and its
/// configuration, each stored as a data plugin keyed by type.
///
/// A `Context` is cheap to create. A parameter sweep makes a fresh one for every run
/// so no state leaks from one run into the next.
#[derive(Default)]
pub struct Context {
    // This is actually a `HashMap<TypeId, Box<dyn New>>` but must be declared this way to avoid
    // having to implement an `as_any()` method on everything.
    data_plugins: HashMap<TypeId, Box<dyn Any>>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            data_plugins: HashMap::default(),
        }
    }

    /// Returns a mutable reference for the data container for `T`, creating it if it doesn't exist yet.
    pub fn get_data_container_mut<T: New>(&mut self) -> &mut T {
        self.data_plugins
            .entry(type_of::<T>())
            .or_insert_with(|| Box::new(<T as New>::new()))
            .downcast_mut::<T>()
            .unwrap() // Will never panic as data container has the matching type
    }

    /// Returns a reference to the data container for `T` if it exists.
    /// If you need a mutable reference or lazy instantiation, use `Context::get_data_container_mut()`.
    pub fn get_data_container<T: New>(&self) -> Option<&T> {
        self.data_plugins
            .get(&type_of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_containers_are_created_lazily() {
        let mut context = Context::new();
        assert!(context.get_data_container::<Vec<u64>>().is_none());

        {
            let daily_cases: &mut Vec<u64> = context.get_data_container_mut();
            daily_cases.push(10);
            daily_cases.push(4);
        }
        {
            let labels: &mut Vec<&str> = context.get_data_container_mut();
            labels.push("S");
        }

        assert_eq!(context.get_data_container::<Vec<u64>>(), Some(&vec![10, 4]));
        assert_eq!(context.get_data_container::<Vec<&str>>(), Some(&vec!["S"]));
    }
}

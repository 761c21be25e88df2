use crate::{
  hashing::HashMap,
  type_of,
  TypeId
};
use std::any::Any;

/// A map holding at most one value of each type, keyed by the value's type.
#[derive(Default)]
pub struct TraitMap {
  map: HashMap<TypeId, Box<dyn Any>>,
}

impl TraitMap {
  pub fn new() -> Self {
    TraitMap {
      map: HashMap::default(),
    }
  }

  pub fn insert<T: Any>(&mut self, value: T) -> Option<Box<T>> {
    self.map
        .insert(type_of::<T>(), Box::new(value))
        .map(|boxed|
            // Guaranteed safe, as only a Box<T> can be a value for `type_of::<T>()`.
            unsafe { boxed.downcast().unwrap_unchecked() }
        )
  }

  pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
    self.map
        .get_mut(&type_of::<T>())
        .map(|boxed|
            // Guaranteed safe, as only a Box<T> can be a value for `type_of::<T>()`.
            unsafe { boxed.downcast_mut().unwrap_unchecked() }
        )
  }

  pub fn contains_key<T: Any>(&self) -> bool {
    self.map.contains_key(&type_of::<T>())
  }

  pub fn clear(&mut self) {
    self.map.clear();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Seed(u64);
  struct Label(&'static str);

  #[test]
  fn values_are_keyed_by_type() {
    let mut map = TraitMap::new();
    assert!(map.insert(Seed(7)).is_none());
    assert!(map.insert(Label("recovery")).is_none());

    let previous = map.insert(Seed(8)).unwrap();
    assert_eq!(previous.0, 7);
    assert_eq!(map.get_mut::<Seed>().unwrap().0, 8);
    assert_eq!(map.get_mut::<Label>().unwrap().0, "recovery");

    map.clear();
    assert!(!map.contains_key::<Seed>());
  }
}

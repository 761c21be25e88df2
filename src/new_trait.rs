/*!

An object safe trait for types that know how to construct themselves with `new()`. The hitch
is it needs to be `'static` or a value type. Data plugins stored in a
[`Context`](crate::Context) implement it so the context can create them lazily on first use.

```rust
# use sirs_sim::New;
struct DayCounter {
  days: u32,
}

impl New for DayCounter {
  const new: &'static dyn Fn() -> Self = &|| DayCounter { days: 0 };
}

let counter = <DayCounter as New>::new();
assert_eq!(counter.days, 0);
```

If your type already has a `Default` impl, point the constant at it:

```rust
# use sirs_sim::New;
#[derive(Default)]
struct Tally(Vec<u64>);

impl New for Tally {
  const new: &'static dyn Fn() -> Self = &Tally::default;
}
```

*/

use std::any::Any;

/// An object-safe trait that can construct itself.
pub trait New: Any + 'static {
  /// A constant reference to a constructor
  #[allow(non_upper_case_globals)]
  const new: &'static dyn Fn() -> Self;
}

impl<T: 'static> New for Vec<T> {
  const new: &'static dyn Fn() -> Self = &Vec::<T>::new;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vec_constructs_empty() {
    let days = <Vec<u64> as New>::new();
    assert!(days.is_empty());
  }
}

use crate::{
    context::Context,
    error::SimError,
    hashing::hash_str,
    log::trace,
    new_trait::New,
    parameters::check_non_negative,
    trait_map::TraitMap,
};
use rand::{prelude::Distribution, Rng, SeedableRng};
use rand_distr::{Exp, Normal, Poisson};
use std::any::Any;

/// A named random number stream. Each stream is seeded from the context's base seed
/// offset by a hash of its name, so streams are independent of one another and of
/// the order in which they are first used.
pub trait RngId: Any {
    #![allow(non_upper_case_globals)]
    const new: &'static dyn Fn(u64) -> Self;
    const name: &'static str;
    type RngType: SeedableRng;
    fn rng(&mut self) -> &mut Self::RngType;
}

struct RngPlugin {
    base_seed: u64,
    rng_map: TraitMap,
}

impl RngPlugin {
    fn clear(&mut self) {
        self.rng_map.clear();
    }

    pub fn get_rng<R: RngId>(&mut self) -> &mut R::RngType {
        if !self.rng_map.contains_key::<R>() {
            let seed_offset = self.base_seed.wrapping_add(hash_str(R::name));
            self.rng_map.insert(R::new(seed_offset));
        }

        // Inserted above if it was missing.
        self.rng_map.get_mut::<R>().unwrap().rng()
    }
}

impl New for RngPlugin {
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self = &|| RngPlugin {
        base_seed: 0,
        rng_map: TraitMap::new(),
    };
}

/// Gets a mutable reference to the random number generator associated with the given
/// `RngId`.
// This is a private free function so that it's not leaked to the public API.
fn get_rng<R: RngId>(context: &mut Context) -> &mut R::RngType {
    context.get_data_container_mut::<RngPlugin>().get_rng::<R>()
}

pub trait ContextRandomExt {
    /// Sets the base seed and drops every existing stream so they are re-seeded on
    /// next use. A context that never calls this uses base seed 0.
    fn init_random(&mut self, base_seed: u64);

    /// Gets a random sample from the random number generator associated with the given
    /// `RngId` by applying the specified sampler function. If the Rng has not been used
    /// before, one will be created with the base seed you defined in `init_random`.
    fn sample<R: RngId + 'static, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T;

    /// Gets a random sample from the specified distribution using a random number generator
    /// associated with the given `RngId`.
    fn sample_distr<R: RngId + 'static, T>(&mut self, distribution: impl Distribution<T>) -> T
    where
        R::RngType: Rng;
}

impl ContextRandomExt for Context {
    fn init_random(&mut self, base_seed: u64) {
        trace!("initializing random module with base seed {base_seed}");
        let rng_container = self.get_data_container_mut::<RngPlugin>();
        rng_container.base_seed = base_seed;
        rng_container.clear();
    }

    fn sample<R: RngId + 'static, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T {
        let rng = get_rng::<R>(self);
        sampler(rng)
    }

    fn sample_distr<R: RngId + 'static, T>(&mut self, distribution: impl Distribution<T>) -> T
    where
        R::RngType: Rng,
    {
        let rng = get_rng::<R>(self);
        distribution.sample::<R::RngType>(rng)
    }
}

#[macro_export]
macro_rules! define_rng {
    ($random_id:ident) => {
        struct $random_id {
            rng: $crate::rand::rngs::StdRng,
        }

        impl $crate::random::RngId for $random_id {
            #![allow(non_upper_case_globals)]
            type RngType = $crate::rand::rngs::StdRng;
            const name: &'static str = stringify!($random_id);
            const new: &'static dyn Fn(u64) -> Self = &|seed| {
                use $crate::rand::SeedableRng;
                Self {
                    rng: $crate::rand::rngs::StdRng::seed_from_u64(seed),
                }
            };

            fn rng(&mut self) -> &mut Self::RngType {
                &mut self.rng
            }
        }
    };
}
pub use crate::define_rng;

/// The random draws a simulation run makes. [`Context`] implements it on top of its
/// seeded streams; tests substitute scripted implementations.
pub trait DiseaseSampler {
    /// A recovery delay in days from `Normal(mean, std_dev)`. Not yet rounded or
    /// clamped. A negative `std_dev` is an error.
    fn recovery_delay(&mut self, mean: f64, std_dev: f64) -> Result<f64, SimError>;

    /// A count from `Poisson(rate)`. Only called with `rate > 0`.
    fn poisson(&mut self, rate: f64) -> Result<f64, SimError>;

    /// A draw from the exponential distribution with the given rate, i.e. mean `1 / rate`.
    fn exponential(&mut self, rate: f64) -> Result<f64, SimError>;
}

define_rng!(RecoveryRng);
define_rng!(TransmissionRng);

impl DiseaseSampler for Context {
    fn recovery_delay(&mut self, mean: f64, std_dev: f64) -> Result<f64, SimError> {
        // `Normal::new` accepts a negative standard deviation and mirrors the draw.
        check_non_negative("infection_duration_std", std_dev)?;
        let normal = Normal::new(mean, std_dev)?;
        Ok(self.sample_distr::<RecoveryRng, f64>(normal))
    }

    fn poisson(&mut self, rate: f64) -> Result<f64, SimError> {
        let poisson = Poisson::new(rate)?;
        Ok(self.sample_distr::<TransmissionRng, f64>(poisson))
    }

    fn exponential(&mut self, rate: f64) -> Result<f64, SimError> {
        let exp = Exp::new(rate)?;
        Ok(self.sample_distr::<TransmissionRng, f64>(exp))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::RngCore;

    define_rng!(FooRng);
    define_rng!(BarRng);

    #[test]
    fn get_rng_basic() {
        let mut context = Context::new();
        context.init_random(42);

        assert_ne!(
            context.sample::<FooRng, _>(RngCore::next_u64),
            context.sample::<FooRng, _>(RngCore::next_u64)
        );
    }

    #[test]
    fn multiple_rng_types() {
        let mut context = Context::new();
        context.init_random(42);

        assert_ne!(
            context.sample::<FooRng, _>(RngCore::next_u64),
            context.sample::<BarRng, _>(RngCore::next_u64)
        );
    }

    #[test]
    fn reset_seed() {
        let mut context = Context::new();
        context.init_random(42);

        let run_0 = context.sample::<FooRng, _>(RngCore::next_u64);
        let run_1 = context.sample::<FooRng, _>(RngCore::next_u64);

        // Reset with same seed, ensure we get the same values
        context.init_random(42);
        assert_eq!(run_0, context.sample::<FooRng, _>(RngCore::next_u64));
        assert_eq!(run_1, context.sample::<FooRng, _>(RngCore::next_u64));

        // Reset with different seed, ensure we get different values
        context.init_random(88);
        assert_ne!(run_0, context.sample::<FooRng, _>(RngCore::next_u64));
        assert_ne!(run_1, context.sample::<FooRng, _>(RngCore::next_u64));
    }

    #[test]
    fn recovery_delays_follow_the_normal() {
        let mut context = Context::new();
        context.init_random(42);

        let n_samples = 5000;
        let mut total = 0.0;
        for _ in 0..n_samples {
            total += context.recovery_delay(9.0, 2.0).unwrap();
        }
        let mean = total / f64::from(n_samples);
        assert!((mean - 9.0).abs() < 0.2, "mean recovery delay was {mean}");
    }

    #[test]
    fn poisson_counts_are_whole_and_centred() {
        let mut context = Context::new();
        context.init_random(42);

        let n_samples = 5000;
        let mut total = 0.0;
        for _ in 0..n_samples {
            let count = context.poisson(4.0).unwrap();
            assert_eq!(count, count.round());
            total += count;
        }
        let mean = total / f64::from(n_samples);
        assert!((mean - 4.0).abs() < 0.2, "mean count was {mean}");
    }

    #[test]
    fn exponential_mean_is_inverse_rate() {
        let mut context = Context::new();
        context.init_random(42);

        let n_samples = 5000;
        let mut total = 0.0;
        for _ in 0..n_samples {
            total += context.exponential(0.5).unwrap();
        }
        let mean = total / f64::from(n_samples);
        assert!((mean - 2.0).abs() < 0.15, "mean was {mean}");
    }

    #[test]
    fn bad_distribution_parameters_are_errors() {
        let mut context = Context::new();
        assert!(matches!(
            context.recovery_delay(9.0, -1.0),
            Err(SimError::InvalidParameter { name: "infection_duration_std", .. })
        ));
        assert!(matches!(
            context.recovery_delay(9.0, f64::INFINITY),
            Err(SimError::InvalidParameter { name: "infection_duration_std", .. })
        ));
        assert!(matches!(context.poisson(0.0), Err(SimError::Distribution(_))));
        assert!(matches!(context.exponential(-1.0), Err(SimError::Distribution(_))));
    }
}

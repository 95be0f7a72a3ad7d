use rand::Rng;

/// Source of uniform floats in `[0, 1)`.
///
/// The simulators derive every random value from this single operation so
/// tests can substitute a scripted source and assert exact outputs.
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::rng().random()
    }
}

/// Deterministic source that replays a fixed script of values.
///
/// Cycles back to the start when the script is exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }

    /// Source that returns the same value forever.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Integer in `[min, min + span)`, computed as `floor(r * span) + min`.
pub fn int_in<R: RandomSource + ?Sized>(rng: &mut R, min: u32, span: u32) -> u32 {
    (rng.next_f64() * f64::from(span)) as u32 + min
}

/// Uniform pick from a non-empty slice.
pub fn pick<'a, R: RandomSource + ?Sized, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[int_in(rng, 0, items.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_in_hits_both_ends_of_the_range() {
        let mut low = ScriptedRandom::constant(0.0);
        assert_eq!(int_in(&mut low, 20, 80), 20);

        let mut high = ScriptedRandom::constant(0.999_999);
        assert_eq!(int_in(&mut high, 20, 80), 99);
    }

    #[test]
    fn scripted_source_replays_in_order() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.5]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.5);
        assert_eq!(rng.next_f64(), 0.1);
    }

    #[test]
    fn pick_covers_every_slot() {
        let items = ["a", "b", "c", "d"];
        let mut rng = ScriptedRandom::constant(0.75);
        assert_eq!(*pick(&mut rng, &items), "d");
        let mut rng = ScriptedRandom::constant(0.0);
        assert_eq!(*pick(&mut rng, &items), "a");
    }
}

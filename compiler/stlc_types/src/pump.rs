use crate::Type;

/// Source of fresh type variables `V1`, `V2`, ...
///
/// One pump serves one top-level inference run; names are never reused
/// within it.
#[derive(Clone, Debug, Default)]
pub struct Pump {
    counter: u32,
}

impl Pump {
    pub fn new() -> Self {
        Pump::default()
    }

    #[allow(
        clippy::should_implement_trait,
        reason = "a pump never ends, so Iterator would only add Option noise"
    )]
    pub fn next(&mut self) -> Type {
        self.counter += 1;
        Type::var(format!("V{}", self.counter))
    }

    pub fn next_n(&mut self, count: usize) -> Vec<Type> {
        (0..count).map(|_| self.next()).collect()
    }

    /// How many variables have been handed out.
    pub fn issued(&self) -> u32 {
        self.counter
    }
}

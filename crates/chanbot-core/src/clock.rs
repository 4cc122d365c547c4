/// Lamport-style logical clock carried on every exchange.
///
/// The value never decreases: [`tick`](Self::tick) advances it before a
/// request is stamped, [`merge`](Self::merge) folds in the broker's value
/// after the reply is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalClock {
    value: u64,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Advance by one and return the stamp for the next outgoing request.
    pub fn tick(&mut self) -> u64 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    /// Adopt `received` if it is ahead of the local value.
    pub fn merge(&mut self, received: u64) -> u64 {
        self.value = self.value.max(received);
        self.value
    }
}

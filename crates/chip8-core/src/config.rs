/// What the machine does with an instruction word it cannot decode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpcodePolicy {
    /// Stop with an error
    #[default]
    Strict,
    /// Log a warning and carry on with the next instruction
    Permissive,
}

/// Runtime settings of a [`Machine`](crate::Machine)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub opcode_policy: OpcodePolicy,
    /// Seeds the random number generator, a fresh seed from the os is used when left empty
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn permissive(mut self) -> Self {
        self.opcode_policy = OpcodePolicy::Permissive;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

use crate::constants::STACK_DEPTH;
use crate::error::{MachineError, Result};

/// 16 16-bit return addresses, used to call subroutines and return from them.
/// Nesting deeper than 16 subroutines overflows the stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    values: [u16; STACK_DEPTH],
    /// Points at the first free slot, so 0 through 16
    pointer: usize,
}

impl Stack {
    /// Pushes the address to return to. `target` is only used to report an overflow
    pub fn push(&mut self, return_address: u16, target: u16) -> Result<()> {
        let slot = self
            .values
            .get_mut(self.pointer)
            .ok_or(MachineError::StackOverflow { address: target })?;
        *slot = return_address;
        self.pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        self.pointer = self
            .pointer
            .checked_sub(1)
            .ok_or(MachineError::StackUnderflow)?;
        Ok(self.values[self.pointer])
    }

    /// How many return addresses are on the stack
    pub fn depth(&self) -> usize {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_order() {
        let mut stack = Stack::default();
        stack.push(0x202, 0x300).unwrap();
        stack.push(0x302, 0x400).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop().unwrap(), 0x302);
        assert_eq!(stack.pop().unwrap(), 0x202);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn overflows_after_16_calls() {
        let mut stack = Stack::default();
        for i in 0..STACK_DEPTH as u16 {
            stack.push(0x200 + 2 * i, 0x300).unwrap();
        }
        assert!(matches!(
            stack.push(0x220, 0x300),
            Err(MachineError::StackOverflow { address: 0x300 })
        ));
        assert_eq!(stack.depth(), STACK_DEPTH);
    }

    #[test]
    fn underflows_when_empty() {
        let mut stack = Stack::default();
        assert!(matches!(stack.pop(), Err(MachineError::StackUnderflow)));
        assert_eq!(stack.depth(), 0);
    }
}

//! Capacity limits enforced throughout the pipeline. These are fixed
//! compile-time constants, not runtime configuration.

pub const MAX_REGEXP_STRING_LENGTH: usize = 100;
pub const MAX_REGEXP_TOKENS: usize = 100;
pub const MAX_NUM_REGEXP_CHILDREN: usize = 20;
pub const MAX_NUM_NFA_STATES: usize = crate::bitset::CAPACITY;
pub const MAX_NUM_DFA_STATES: usize = crate::bitset::CAPACITY;
pub const NUM_CHARS: usize = 256;

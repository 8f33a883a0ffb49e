//! Resource limits for the evaluator.

/// Default cap on the number of iterations of a single `while` loop.
pub const MAX_LOOP_ITERATIONS: usize = 10_000;
/// Default cap on the number of simultaneously active function calls.
pub const MAX_RECURSION_DEPTH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// A loop may run its body this many times; the next iteration is an error.
    pub max_loop_iterations: usize,
    /// Calls may nest this deep; the next nested call is an error.
    pub max_recursion_depth: usize,
}

impl Config {
    pub fn with_max_loop_iterations(self, max_loop_iterations: usize) -> Self {
        Self {
            max_loop_iterations,
            ..self
        }
    }

    pub fn with_max_recursion_depth(self, max_recursion_depth: usize) -> Self {
        Self {
            max_recursion_depth,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_loop_iterations: MAX_LOOP_ITERATIONS,
            max_recursion_depth: MAX_RECURSION_DEPTH,
        }
    }
}

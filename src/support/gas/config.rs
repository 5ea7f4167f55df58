/// Iteration limits and tolerances for the real-gas and topup solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum Newton–Raphson iterations for a Van der Waals amount solve.
    pub max_newton_iters: usize,

    /// Maximum secant iterations for a topup.
    pub max_secant_iters: usize,

    /// Accuracy of real-gas amounts, in the cylinder's capacity unit.
    pub amount_tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_newton_iters: 100,
            max_secant_iters: 100,
            amount_tol: 0.5,
        }
    }
}

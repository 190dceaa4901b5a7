pub mod acc;
pub mod engine;
pub mod error;
pub mod membership;
pub mod rules;
pub mod sampled;

/// Максимальное число термов одной лингвистической переменной
pub const MAX_TERMS: usize = 16;

/// Максимальное число правил (клеток таблицы)
pub const MAX_RULES: usize = MAX_TERMS * MAX_TERMS;

//! Ошибки нечеткого движка

use core::fmt;

/// Ошибки конфигурации и вывода
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuzzyError {
    /// Некорректные параметры функции принадлежности или домена
    InvalidParameter { reason: &'static str },
    /// Дискретные функции построены на разных доменах
    IncompatibleDomain { expected: f32, found: f32 },
    /// Суммарная принадлежность выходного множества равна нулю
    UndefinedDefuzzification,
    /// Таблица правил не покрывает все пары термов
    IncompleteRuleBase { rows: usize, cols: usize },
    /// Правило ссылается на несуществующий выходной терм
    UnknownOutputTerm { row: usize, col: usize, index: usize },
    /// Превышена емкость фиксированного буфера
    CapacityExceeded { capacity: usize },
    /// Входное значение NaN или бесконечность
    NonFiniteInput,
}

impl fmt::Display for FuzzyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuzzyError::InvalidParameter { reason } => write!(f, "invalid parameter: {}", reason),
            FuzzyError::IncompatibleDomain { expected, found } => {
                write!(f, "incompatible domain: expected ±{}, found ±{}", expected, found)
            }
            FuzzyError::UndefinedDefuzzification => {
                write!(f, "undefined defuzzification: zero total membership")
            }
            FuzzyError::IncompleteRuleBase { rows, cols } => {
                write!(f, "incomplete rule base: expected {}x{} rules", rows, cols)
            }
            FuzzyError::UnknownOutputTerm { row, col, index } => {
                write!(f, "rule [{}][{}] refers to unknown output term {}", row, col, index)
            }
            FuzzyError::CapacityExceeded { capacity } => {
                write!(f, "capacity exceeded: at most {} items", capacity)
            }
            FuzzyError::NonFiniteInput => write!(f, "input is not finite"),
        }
    }
}

impl core::error::Error for FuzzyError {}

// Реализация Format для defmt
#[cfg(feature = "defmt")]
impl defmt::Format for FuzzyError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FuzzyError::InvalidParameter { reason } => {
                defmt::write!(fmt, "Invalid parameter: {}", reason)
            }
            FuzzyError::IncompatibleDomain { expected, found } => {
                defmt::write!(fmt, "Incompatible domain: {} vs {}", expected, found)
            }
            FuzzyError::UndefinedDefuzzification => {
                defmt::write!(fmt, "Undefined defuzzification")
            }
            FuzzyError::IncompleteRuleBase { rows, cols } => {
                defmt::write!(fmt, "Incomplete rule base: {}x{}", rows, cols)
            }
            FuzzyError::UnknownOutputTerm { row, col, index } => {
                defmt::write!(fmt, "Unknown output term {} at [{}][{}]", index, row, col)
            }
            FuzzyError::CapacityExceeded { capacity } => {
                defmt::write!(fmt, "Capacity exceeded: {}", capacity)
            }
            FuzzyError::NonFiniteInput => defmt::write!(fmt, "Non-finite input"),
        }
    }
}

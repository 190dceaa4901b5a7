//! База правил: таблица (терм 1, терм 2) -> выходной терм

use heapless::Vec;

use crate::control::error::FuzzyError;
use crate::control::{MAX_RULES, MAX_TERMS};

/// Прямоугольная таблица индексов выходных термов
///
/// `consequent(i, j)` - выходной терм для i-го терма первой входной
/// переменной и j-го терма второй. Заполнена каждая клетка.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    rows: usize,
    cols: usize,
    /// Клетки построчно
    cells: Vec<u8, MAX_RULES>,
}

impl RuleBase {
    /// Построение из строк таблицы; все строки должны быть одной длины
    pub fn from_rows<R: AsRef<[u8]>>(table: &[R]) -> Result<Self, FuzzyError> {
        let rows = table.len();
        let cols = table.first().map_or(0, |row| row.as_ref().len());
        if rows == 0 || cols == 0 {
            return Err(FuzzyError::IncompleteRuleBase { rows, cols });
        }
        if rows > MAX_TERMS || cols > MAX_TERMS {
            return Err(FuzzyError::CapacityExceeded { capacity: MAX_TERMS });
        }

        let mut cells = Vec::new();
        for row in table {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(FuzzyError::IncompleteRuleBase { rows, cols });
            }
            cells
                .extend_from_slice(row)
                .map_err(|_| FuzzyError::CapacityExceeded { capacity: MAX_RULES })?;
        }

        Ok(Self { rows, cols, cells })
    }

    /// Число термов первой входной переменной
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Число термов второй входной переменной
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn consequent(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).map(|&term| term as usize)
    }

    /// Все клетки в виде (строка, столбец, выходной терм)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(k, &term)| (k / self.cols, k % self.cols, term as usize))
    }

    /// Проверка согласованности с размерами словарей
    pub fn validate(
        &self,
        antecedent1_terms: usize,
        antecedent2_terms: usize,
        output_terms: usize,
    ) -> Result<(), FuzzyError> {
        if self.rows != antecedent1_terms || self.cols != antecedent2_terms {
            return Err(FuzzyError::IncompleteRuleBase {
                rows: antecedent1_terms,
                cols: antecedent2_terms,
            });
        }
        match self.iter().find(|&(_, _, term)| term >= output_terms) {
            Some((row, col, index)) => Err(FuzzyError::UnknownOutputTerm { row, col, index }),
            None => Ok(()),
        }
    }
}

//! Дискретизированные функции принадлежности выходной переменной
//!
//! Выходные нечеткие множества хранятся как `N` отсчетов на равномерной
//! сетке [-bound, bound] (разрешение `N - 1`). Агрегация (max) и
//! импликация (min) выполняются поточечно.

use crate::control::error::FuzzyError;
use crate::control::membership::ContinuousMembershipFunction;
use crate::utils::math::{approx_eq, symmetric_grid_point};

/// Допуск при поиске отсчетов на максимуме
const MAXIMA_TOLERANCE: f32 = 1e-6;

/// Нечеткое множество, заданное отсчетами на фиксированной сетке
#[derive(Debug, Clone, PartialEq)]
pub struct SampledMembershipFunction<const N: usize> {
    /// Полуширина домена
    bound: f32,
    /// Принадлежность в каждой точке сетки
    samples: [f32; N],
}

impl<const N: usize> SampledMembershipFunction<N> {
    /// Пустое множество (все отсчеты равны 0)
    pub fn zeroed(bound: f32) -> Result<Self, FuzzyError> {
        if N < 2 {
            return Err(FuzzyError::InvalidParameter {
                reason: "sampled function needs at least two samples",
            });
        }
        if !(bound.is_finite() && bound > 0.0) {
            return Err(FuzzyError::InvalidParameter {
                reason: "domain bound must be positive and finite",
            });
        }
        Ok(Self {
            bound,
            samples: [0.0; N],
        })
    }

    /// Дискретизация непрерывной функции на сетке домена
    pub fn from_function(
        bound: f32,
        function: &ContinuousMembershipFunction,
    ) -> Result<Self, FuzzyError> {
        let mut sampled = Self::zeroed(bound)?;
        for (k, sample) in sampled.samples.iter_mut().enumerate() {
            *sample = function.evaluate(symmetric_grid_point(bound, k, N - 1));
        }
        Ok(sampled)
    }

    /// Треугольный терм по трем точкам
    pub fn triangle(bound: f32, lower: f32, peak: f32, upper: f32) -> Result<Self, FuzzyError> {
        Self::from_function(bound, &ContinuousMembershipFunction::triangle(lower, peak, upper)?)
    }

    /// Терм-плечо по двум точкам
    pub fn shoulder(bound: f32, edge: f32, peak: f32) -> Result<Self, FuzzyError> {
        Self::from_function(bound, &ContinuousMembershipFunction::shoulder(edge, peak)?)
    }

    /// Полуширина домена
    pub fn domain_bound(&self) -> f32 {
        self.bound
    }

    /// Число интервалов сетки
    pub const fn resolution(&self) -> usize {
        N - 1
    }

    pub fn samples(&self) -> &[f32; N] {
        &self.samples
    }

    /// Координата k-го отсчета
    pub fn position(&self, k: usize) -> f32 {
        symmetric_grid_point(self.bound, k, N - 1)
    }

    /// Координаты всех отсчетов по возрастанию
    pub fn positions(&self) -> impl Iterator<Item = f32> + '_ {
        (0..N).map(move |k| self.position(k))
    }

    /// Совпадает ли сетка отсчетов с сеткой `other`
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.bound.to_bits() == other.bound.to_bits()
    }

    /// Высота множества (максимальная принадлежность)
    pub fn height(&self) -> f32 {
        self.samples.iter().fold(0.0, |acc, &m| acc.max(m))
    }

    /// Поточечный максимум с `other` (нечеткое объединение), на месте
    pub fn fuzzy_max(&mut self, other: &Self) -> Result<(), FuzzyError> {
        if !self.is_compatible(other) {
            return Err(FuzzyError::IncompatibleDomain {
                expected: self.bound,
                found: other.bound,
            });
        }
        for (sample, &theirs) in self.samples.iter_mut().zip(other.samples.iter()) {
            *sample = sample.max(theirs);
        }
        Ok(())
    }

    /// Копия, срезанная сверху уровнем `limit` (импликация по минимуму)
    pub fn bound(&self, limit: f32) -> Self {
        // Принадлежность не бывает отрицательной; NaN превращается в 0
        let limit = limit.max(0.0);
        let mut clipped = self.clone();
        for sample in clipped.samples.iter_mut() {
            *sample = sample.min(limit);
        }
        clipped
    }

    /// Дефаззификация методом центра тяжести
    pub fn defuzzify(&self) -> Result<f32, FuzzyError> {
        let total: f32 = self.samples.iter().sum();
        if total <= 0.0 {
            return Err(FuzzyError::UndefinedDefuzzification);
        }

        // Нормированные веса: одиночный отсчет в точке p дает ровно p
        let centroid: f32 = self
            .samples
            .iter()
            .enumerate()
            .filter(|(_, &m)| m > 0.0)
            .map(|(k, &m)| (m / total) * self.position(k))
            .sum();
        Ok(centroid)
    }

    /// Дефаззификация средним максимумов
    pub fn mean_of_maxima(&self) -> Result<f32, FuzzyError> {
        let height = self.height();
        if height <= 0.0 {
            return Err(FuzzyError::UndefinedDefuzzification);
        }

        let (sum, count) = self
            .samples
            .iter()
            .enumerate()
            .filter(|(_, &m)| approx_eq(m, height, MAXIMA_TOLERANCE))
            .fold((0.0f32, 0usize), |(sum, count), (k, _)| {
                (sum + self.position(k), count + 1)
            });
        Ok(sum / count as f32)
    }
}

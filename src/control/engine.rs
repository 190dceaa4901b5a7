//! Движок нечеткого вывода Мамдани
//!
//! Импликация - минимум, агрегация - максимум, дефаззификация - центр
//! тяжести (или среднее максимумов). Движок настраивается один раз и
//! дальше не меняется, поэтому его можно разделять между потоками.

use heapless::Vec;

use crate::control::error::FuzzyError;
use crate::control::membership::ContinuousMembershipFunction;
use crate::control::rules::RuleBase;
use crate::control::sampled::SampledMembershipFunction;
use crate::control::{MAX_RULES, MAX_TERMS};

/// Метод дефаззификации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefuzzificationMethod {
    /// Центр тяжести
    #[default]
    Centroid,
    /// Среднее точек максимума
    MeanOfMaxima,
}

/// Параметры настройки движка
///
/// Разрешение выходной сетки задается параметром `N` движка
/// (`N - 1` интервалов).
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig<'a> {
    /// Термы первой входной переменной (строки таблицы правил)
    pub antecedent1: &'a [ContinuousMembershipFunction],
    /// Термы второй входной переменной (столбцы таблицы правил)
    pub antecedent2: &'a [ContinuousMembershipFunction],
    /// Термы выходной переменной, дискретизируются при настройке
    pub output_terms: &'a [ContinuousMembershipFunction],
    pub rules: &'a RuleBase,
    /// Полуширина выходного домена
    pub output_bound: f32,
    pub defuzzification: DefuzzificationMethod,
}

/// Матрица степеней срабатывания правил
#[derive(Debug, Clone, PartialEq)]
pub struct FiringStrengths {
    rows: usize,
    cols: usize,
    values: Vec<f32, MAX_RULES>,
}

impl FiringStrengths {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    /// Сильнейшее правило: (строка, столбец, степень)
    pub fn strongest(&self) -> Option<(usize, usize, f32)> {
        self.values
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (k, &s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((k, s)),
            })
            .map(|(k, s)| (k / self.cols, k % self.cols, s))
    }
}

/// Настроенный движок нечеткого вывода
#[derive(Debug, Clone)]
pub struct FuzzyEngine<const N: usize> {
    antecedent1: Vec<ContinuousMembershipFunction, MAX_TERMS>,
    antecedent2: Vec<ContinuousMembershipFunction, MAX_TERMS>,
    output_terms: Vec<SampledMembershipFunction<N>, MAX_TERMS>,
    rules: RuleBase,
    output_bound: f32,
    defuzzification: DefuzzificationMethod,
}

impl<const N: usize> FuzzyEngine<N> {
    /// Настройка движка: дискретизация выходных термов и проверка правил
    pub fn configure(config: &EngineConfig<'_>) -> Result<Self, FuzzyError> {
        let mut output_terms: Vec<SampledMembershipFunction<N>, MAX_TERMS> = Vec::new();
        for term in config.output_terms {
            let sampled = SampledMembershipFunction::from_function(config.output_bound, term)?;
            output_terms
                .push(sampled)
                .map_err(|_| FuzzyError::CapacityExceeded { capacity: MAX_TERMS })?;
        }

        Self::from_sampled(
            config.antecedent1,
            config.antecedent2,
            &output_terms,
            config.rules.clone(),
            config.defuzzification,
        )
    }

    /// Настройка из уже дискретизированных выходных термов
    ///
    /// Все выходные термы должны лежать на одной сетке.
    pub fn from_sampled(
        antecedent1: &[ContinuousMembershipFunction],
        antecedent2: &[ContinuousMembershipFunction],
        output_terms: &[SampledMembershipFunction<N>],
        rules: RuleBase,
        defuzzification: DefuzzificationMethod,
    ) -> Result<Self, FuzzyError> {
        if antecedent1.is_empty() || antecedent2.is_empty() || output_terms.is_empty() {
            return Err(FuzzyError::InvalidParameter {
                reason: "every vocabulary needs at least one term",
            });
        }

        let reference = &output_terms[0];
        if let Some(term) = output_terms.iter().find(|t| !reference.is_compatible(t)) {
            return Err(FuzzyError::IncompatibleDomain {
                expected: reference.domain_bound(),
                found: term.domain_bound(),
            });
        }

        rules.validate(antecedent1.len(), antecedent2.len(), output_terms.len())?;

        let capacity = FuzzyError::CapacityExceeded { capacity: MAX_TERMS };
        let engine = Self {
            antecedent1: Vec::from_slice(antecedent1).map_err(|_| capacity)?,
            antecedent2: Vec::from_slice(antecedent2).map_err(|_| capacity)?,
            output_terms: Vec::from_slice(output_terms).map_err(|_| capacity)?,
            rules,
            output_bound: reference.domain_bound(),
            defuzzification,
        };

        info!(
            "Fuzzy engine configured: {}x{} rules, {} output terms, resolution {}",
            engine.antecedent1.len(),
            engine.antecedent2.len(),
            engine.output_terms.len(),
            N - 1
        );

        Ok(engine)
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    pub fn output_bound(&self) -> f32 {
        self.output_bound
    }

    pub fn defuzzification(&self) -> DefuzzificationMethod {
        self.defuzzification
    }

    /// Степени срабатывания всех правил для входов
    pub fn firing_strengths(&self, input1: f32, input2: f32) -> Result<FiringStrengths, FuzzyError> {
        check_input(input1)?;
        check_input(input2)?;
        let degrees1 = degrees(&self.antecedent1, input1);
        let degrees2 = degrees(&self.antecedent2, input2);

        let values = self
            .rules
            .iter()
            .map(|(i, j, _)| degrees1[i].min(degrees2[j]))
            .collect();

        Ok(FiringStrengths {
            rows: self.rules.rows(),
            cols: self.rules.cols(),
            values,
        })
    }

    /// Агрегированное выходное множество до дефаззификации
    pub fn aggregate(
        &self,
        input1: f32,
        input2: f32,
    ) -> Result<SampledMembershipFunction<N>, FuzzyError> {
        let strengths = self.firing_strengths(input1, input2)?;

        let mut accumulator = SampledMembershipFunction::zeroed(self.output_bound)?;
        // Обходим все клетки, даже с нулевой степенью срабатывания
        for ((_, _, term), &strength) in self.rules.iter().zip(strengths.values.iter()) {
            accumulator.fuzzy_max(&self.output_terms[term].bound(strength))?;
        }

        Ok(accumulator)
    }

    /// Четкий выход для двух четких входов
    pub fn infer(&self, input1: f32, input2: f32) -> Result<f32, FuzzyError> {
        let aggregated = self.aggregate(input1, input2)?;
        let output = match self.defuzzification {
            DefuzzificationMethod::Centroid => aggregated.defuzzify(),
            DefuzzificationMethod::MeanOfMaxima => aggregated.mean_of_maxima(),
        };

        if let Err(FuzzyError::UndefinedDefuzzification) = output {
            warn!("No rule fired for inputs ({}, {})", input1, input2);
        }

        output
    }
}

fn check_input(value: f32) -> Result<(), FuzzyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FuzzyError::NonFiniteInput)
    }
}

fn degrees(terms: &[ContinuousMembershipFunction], x: f32) -> Vec<f32, MAX_TERMS> {
    terms.iter().map(|term| term.evaluate(x)).collect()
}

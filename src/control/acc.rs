//! Нечеткий регулятор адаптивного круиз-контроля

use crate::config::acc::vocabulary::{acceleration, distance_ratio, relative_speed, NUM_SLICE};
use crate::config::acc::RULE_GRID;
use crate::control::engine::{DefuzzificationMethod, EngineConfig, FuzzyEngine};
use crate::control::error::FuzzyError;
use crate::control::membership::uniform_partition;
use crate::control::rules::RuleBase;
use crate::utils::math::constrain;

/// Движок с выходной сеткой из настроек круиз-контроля
pub type AccEngine = FuzzyEngine<{ acceleration::SAMPLES }>;

/// Регулятор: (относительная скорость, отношение дистанции) -> ускорение
#[derive(Debug, Clone)]
pub struct AccController {
    engine: AccEngine,
}

impl AccController {
    /// Регулятор с настройками по умолчанию (центр тяжести)
    pub fn new() -> Result<Self, FuzzyError> {
        Self::with_method(DefuzzificationMethod::default())
    }

    pub fn with_method(method: DefuzzificationMethod) -> Result<Self, FuzzyError> {
        let speed = uniform_partition(relative_speed::CENTER_MS, relative_speed::BOUND_MS, NUM_SLICE)?;
        let distance = uniform_partition(distance_ratio::CENTER, distance_ratio::HALF_WIDTH, NUM_SLICE)?;
        let acc = uniform_partition(acceleration::CENTER_MS2, acceleration::BOUND_MS2, NUM_SLICE)?;
        let rules = RuleBase::from_rows(&RULE_GRID)?;

        let engine = AccEngine::configure(&EngineConfig {
            antecedent1: &speed,
            antecedent2: &distance,
            output_terms: &acc,
            rules: &rules,
            output_bound: acceleration::BOUND_MS2,
            defuzzification: method,
        })?;

        Ok(Self { engine })
    }

    pub fn engine(&self) -> &AccEngine {
        &self.engine
    }

    /// Расчет ускорения
    ///
    /// * `relative_speed` - скорость лидера минус наша, м/с
    /// * `distance_ratio` - дистанция, деленная на идеальную
    pub fn update(&self, relative_speed: f32, distance_ratio: f32) -> Result<f32, FuzzyError> {
        let acc = self.engine.infer(relative_speed, distance_ratio)?;
        Ok(constrain(acc, -acceleration::BOUND_MS2, acceleration::BOUND_MS2))
    }
}

// Тесты для отладки на хосте
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::acc::vocabulary::NUM_TERMS;

    #[test]
    fn test_controller_creation() {
        let controller = AccController::new().unwrap();
        assert_eq!(controller.engine().rules().rows(), NUM_TERMS);
        assert_eq!(controller.engine().rules().cols(), NUM_TERMS);
        assert_eq!(controller.engine().output_bound(), acceleration::BOUND_MS2);
    }

    #[test]
    fn test_ideal_following_holds_speed() {
        let controller = AccController::new().unwrap();
        let acc = controller.update(0.0, 1.0).unwrap();
        assert!(acc.abs() < 1e-4);

        let strengths = controller.engine().firing_strengths(0.0, 1.0).unwrap();
        let az = crate::config::acc::term::AZ as usize;
        assert_eq!(strengths.strongest(), Some((az, az, 1.0)));
    }

    #[test]
    fn test_too_close_brakes() {
        let controller = AccController::new().unwrap();
        for ratio in [0.05, 0.2, 0.3] {
            for speed in [-25.0, -8.0, -2.0, 0.0] {
                let acc = controller.update(speed, ratio).unwrap();
                assert!(acc < 0.0, "speed {} ratio {} -> {}", speed, ratio, acc);
            }
        }
    }

    #[test]
    fn test_far_away_accelerates() {
        let controller = AccController::new().unwrap();
        for ratio in [1.8, 2.5, 4.44] {
            for speed in [0.0, 2.0, 8.0, 15.0, 30.0] {
                let acc = controller.update(speed, ratio).unwrap();
                assert!(acc >= 0.0, "speed {} ratio {} -> {}", speed, ratio, acc);
            }
        }
    }

    #[test]
    fn test_output_within_limits() {
        let controller = AccController::new().unwrap();
        let mut speed = -40.0;
        while speed <= 40.0 {
            let mut ratio = 0.0;
            while ratio <= 3.0 {
                let acc = controller.update(speed, ratio).unwrap();
                assert!(acc.abs() <= acceleration::BOUND_MS2);
                ratio += 0.13;
            }
            speed += 1.7;
        }
    }

    #[test]
    fn test_determinism() {
        let controller = AccController::new().unwrap();
        let a = controller.update(-3.3, 0.87).unwrap();
        let b = controller.update(-3.3, 0.87).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_mean_of_maxima_controller() {
        let controller = AccController::with_method(DefuzzificationMethod::MeanOfMaxima).unwrap();
        assert!(controller.update(-8.0, 0.2).unwrap() < 0.0);
        assert!(controller.update(8.0, 2.0).unwrap() > 0.0);
        assert_eq!(controller.update(0.0, 1.0).unwrap(), 0.0);
    }
}

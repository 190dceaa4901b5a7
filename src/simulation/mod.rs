//! Тестовый заезд для нечеткого регулятора
//!
//! Простая кинематика с шагом 1 с: лидер едет со случайными событиями,
//! мы держим дистанцию ускорением от регулятора. В конце - сумма
//! квадратов ошибки дистанции, сумма квадратов ускорения и число
//! столкновений.

use heapless::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::drive::{events, following, initial, TRAVEL_TIME_S};
use crate::control::acc::AccController;
use crate::control::error::FuzzyError;
use crate::data::{
    DriveEvent, DriveReport, DriveState, StepRecord, VehicleState, MAX_EVENTS_PER_STEP,
};

/// Параметры заезда
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveConfig {
    /// Число шагов по 1 с
    pub travel_time_s: u32,
    pub initial: DriveState,
    pub ideal_headway_s: f32,
    pub min_ideal_distance_m: f32,
    pub car_length_m: f32,
    /// Вероятность ухода лидера или вклинивания, %
    pub chance_of_distance_jump: u32,
    /// Вероятность смены ускорения лидером, %
    pub chance_of_acc_change: u32,
    pub lead_acc_step_ms2: f32,
    pub max_acc_episode_steps: u32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            travel_time_s: TRAVEL_TIME_S,
            initial: DriveState {
                lead: VehicleState {
                    speed_ms: initial::LEAD_SPEED_MS,
                    acc_ms2: initial::LEAD_ACC_MS2,
                },
                ego: VehicleState {
                    speed_ms: initial::EGO_SPEED_MS,
                    acc_ms2: initial::EGO_ACC_MS2,
                },
                distance_m: initial::DISTANCE_M,
            },
            ideal_headway_s: following::IDEAL_HEADWAY_S,
            min_ideal_distance_m: following::MIN_IDEAL_DISTANCE_M,
            car_length_m: following::CAR_LENGTH_M,
            chance_of_distance_jump: events::CHANCE_OF_DISTANCE_JUMP,
            chance_of_acc_change: events::CHANCE_OF_ACC_CHANGE,
            lead_acc_step_ms2: events::LEAD_ACC_STEP_MS2,
            max_acc_episode_steps: events::MAX_ACC_EPISODE_STEPS,
        }
    }
}

/// Заезд с фиксированным зерном генератора
pub struct TestDrive<'a> {
    controller: &'a AccController,
    config: DriveConfig,
    rng: SmallRng,
    state: DriveState,
    /// Сколько шагов осталось до конца эпизода ускорения лидера
    acc_episode_left: u32,
    step: u32,
    report: DriveReport,
}

impl<'a> TestDrive<'a> {
    pub fn new(controller: &'a AccController, config: DriveConfig, seed: u64) -> Self {
        Self {
            controller,
            config,
            rng: SmallRng::seed_from_u64(seed),
            state: config.initial,
            acc_episode_left: 0,
            step: 0,
            report: DriveReport::default(),
        }
    }

    pub fn state(&self) -> &DriveState {
        &self.state
    }

    pub fn report(&self) -> &DriveReport {
        &self.report
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.config.travel_time_s
    }

    /// Один шаг заезда
    pub fn step(&mut self) -> Result<StepRecord, FuzzyError> {
        let step = self.step;
        let before = self.state;
        let mut events: Vec<DriveEvent, MAX_EVENTS_PER_STEP> = Vec::new();

        // === Случайные события ===
        let roll: u32 = self.rng.random_range(1..=100);
        for event in [self.distance_jump(step, roll), self.lead_acc_change(roll)]
            .into_iter()
            .flatten()
        {
            if events.push(event).is_err() {
                warn!("Шаг {}: событие не записано, больше {} за шаг", step, MAX_EVENTS_PER_STEP);
            }
        }

        // === Регулятор ===
        let relative_speed = self.state.relative_speed();
        let distance_ratio = self.distance_ratio();
        let acc = self.controller.update(relative_speed, distance_ratio)?;
        self.state.ego.acc_ms2 = acc;

        // === Кинематика ===
        self.state.lead.speed_ms += self.state.lead.acc_ms2;
        self.state.ego.speed_ms += acc;
        // Равноускоренное движение: s = v*t + a*t²/2
        self.state.distance_m += self.state.relative_speed() + 0.5 * self.state.relative_acc();

        // === Оценка ===
        self.report.comfort += acc * acc;
        let error = 1.0 - self.distance_ratio();
        self.report.distance_error += error * error;

        let collision = self.state.distance_m <= 0.0;
        if collision {
            warn!("Столкновение на шаге {}", step);
            self.state.distance_m = 0.0;
            self.state.ego.speed_ms = 0.0;
            self.state.ego.acc_ms2 = 0.0;
            self.report.collisions += 1;
        }

        self.step += 1;
        self.report.steps += 1;

        Ok(StepRecord {
            step,
            before,
            relative_speed,
            distance_ratio,
            ego_acc_ms2: acc,
            state: self.state,
            events,
            collision,
        })
    }

    /// Заезд до конца
    pub fn run(self) -> Result<DriveReport, FuzzyError> {
        self.run_with(|_| {})
    }

    /// Заезд до конца с наблюдателем за каждым шагом
    pub fn run_with<F: FnMut(&StepRecord)>(mut self, mut observer: F) -> Result<DriveReport, FuzzyError> {
        while !self.is_finished() {
            let record = self.step()?;
            observer(&record);
        }

        info!(
            "Заезд завершен: {} шагов, {} столкновений",
            self.report.steps,
            self.report.collisions
        );

        Ok(self.report)
    }

    fn distance_ratio(&self) -> f32 {
        self.state
            .distance_ratio(self.config.ideal_headway_s, self.config.min_ideal_distance_m)
    }

    /// Лидер уходит (четные шаги) или вклинивается другая машина (нечетные)
    fn distance_jump(&mut self, step: u32, roll: u32) -> Option<DriveEvent> {
        if roll >= self.config.chance_of_distance_jump {
            return None;
        }

        let car_length = self.config.car_length_m;
        if step % 2 == 0 {
            let gap_m = (roll % 5 + 1) as f32 * car_length;
            self.state.distance_m += gap_m;
            self.report.lead_departures += 1;
            debug!("Лидер ушел, дистанция +{} м", gap_m);
            Some(DriveEvent::LeadLeft { gap_m })
        } else if self.state.distance_m > car_length {
            self.state.distance_m -= car_length;
            self.state.lead.acc_ms2 = 0.0;
            self.state.lead.speed_ms -= 1.0;
            self.report.cut_ins += 1;
            debug!("Вклинилась машина на шаге {}", step);
            Some(DriveEvent::CutIn)
        } else {
            None
        }
    }

    /// Новый эпизод ускорения лидера или отсчет текущего
    fn lead_acc_change(&mut self, roll: u32) -> Option<DriveEvent> {
        if self.acc_episode_left == 0 && roll < self.config.chance_of_acc_change {
            let steps = roll % self.config.max_acc_episode_steps.max(1) + 1;
            let acc_ms2 = if roll % 2 == 0 {
                self.config.lead_acc_step_ms2
            } else {
                -self.config.lead_acc_step_ms2
            };
            self.acc_episode_left = steps;
            self.state.lead.acc_ms2 = acc_ms2;
            self.report.lead_acc_changes += 1;
            Some(DriveEvent::LeadAccChange { acc_ms2, steps })
        } else {
            if self.acc_episode_left > 0 {
                self.acc_episode_left -= 1;
                if self.acc_episode_left == 0 {
                    self.state.lead.acc_ms2 = 0.0;
                }
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AccController {
        AccController::new().unwrap()
    }

    #[test]
    fn test_default_drive() {
        let controller = controller();
        let report = TestDrive::new(&controller, DriveConfig::default(), 7).run().unwrap();
        assert_eq!(report.steps, TRAVEL_TIME_S);
        assert!(report.comfort.is_finite() && report.comfort > 0.0);
        assert!(report.distance_error.is_finite() && report.distance_error >= 0.0);
        // Без случайных событий
        assert_eq!(report.lead_departures, 0);
        assert_eq!(report.cut_ins, 0);
        assert_eq!(report.lead_acc_changes, 0);
    }

    #[test]
    fn test_first_step_closes_gap() {
        let controller = controller();
        let mut drive = TestDrive::new(&controller, DriveConfig::default(), 1);
        let record = drive.step().unwrap();
        assert_eq!(record.step, 0);
        assert_eq!(record.relative_speed, 15.0);
        assert!(record.ego_acc_ms2 > 0.0);
        assert!(drive.state().ego.speed_ms > initial::EGO_SPEED_MS);
        assert!(!record.collision);
        assert!(record.events.is_empty());
        assert_eq!(drive.report().steps, 1);
        // Запись хранит состояние до шага
        assert_eq!(record.before, DriveConfig::default().initial);
        assert_eq!(record.state.ego.acc_ms2, record.ego_acc_ms2);

        let second = drive.step().unwrap();
        assert_eq!(second.before, record.state);
    }

    #[test]
    fn test_collision_resets_ego() {
        let controller = controller();
        let mut config = DriveConfig::default();
        config.travel_time_s = 1;
        config.initial.lead.speed_ms = 0.0;
        config.initial.ego.speed_ms = 30.0;
        config.initial.distance_m = 1.0;

        let mut drive = TestDrive::new(&controller, config, 3);
        let record = drive.step().unwrap();
        assert!(record.ego_acc_ms2 < 0.0);
        assert!(record.collision);
        assert_eq!(drive.state().distance_m, 0.0);
        assert_eq!(drive.state().ego.speed_ms, 0.0);
        assert_eq!(drive.state().ego.acc_ms2, 0.0);
        assert_eq!(drive.report().collisions, 1);
        assert!(drive.is_finished());
    }

    #[test]
    fn test_events_fire() {
        let controller = controller();
        let mut config = DriveConfig::default();
        config.travel_time_s = 2;
        config.chance_of_distance_jump = 101;
        config.chance_of_acc_change = 101;

        let mut records = std::vec::Vec::new();
        let report = TestDrive::new(&controller, config, 11)
            .run_with(|record| records.push(record.clone()))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].events[0], DriveEvent::LeadLeft { .. }));
        assert!(matches!(records[0].events[1], DriveEvent::LeadAccChange { .. }));
        assert!(matches!(records[1].events[0], DriveEvent::CutIn));
        assert_eq!(report.lead_departures, 1);
        assert_eq!(report.cut_ins, 1);
        assert_eq!(report.lead_acc_changes, 1);
    }

    #[test]
    fn test_acc_episode_expires() {
        let controller = controller();
        let mut config = DriveConfig::default();
        config.chance_of_acc_change = 101;
        config.max_acc_episode_steps = 1;

        let mut drive = TestDrive::new(&controller, config, 5);
        drive.step().unwrap();
        assert_eq!(drive.state().lead.acc_ms2.abs(), events::LEAD_ACC_STEP_MS2);
        // Эпизод длиной 1 шаг закончился, ускорение лидера сброшено
        let record = drive.step().unwrap();
        assert!(record.events.is_empty());
        assert_eq!(drive.state().lead.acc_ms2, 0.0);
        // Следующий шаг начинает новый эпизод
        let record = drive.step().unwrap();
        assert_eq!(record.events.len(), 1);
    }

    #[test]
    fn test_same_seed_same_drive() {
        let controller = controller();
        let mut config = DriveConfig::default();
        config.travel_time_s = 300;
        config.chance_of_distance_jump = 20;
        config.chance_of_acc_change = 30;

        let a = TestDrive::new(&controller, config, 42).run().unwrap();
        let b = TestDrive::new(&controller, config, 42).run().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.steps, 300);
    }
}

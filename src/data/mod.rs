// src/data/mod.rs
use heapless::Vec;

/// Максимум событий за один шаг заезда
pub const MAX_EVENTS_PER_STEP: usize = 2;

/// Продольное состояние автомобиля
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VehicleState {
    pub speed_ms: f32, // Скорость м/с
    pub acc_ms2: f32,  // Ускорение м/с²
}

/// Состояние пары "лидер - мы"
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveState {
    pub lead: VehicleState,
    pub ego: VehicleState,
    pub distance_m: f32, // Дистанция до лидера в метрах
}

impl DriveState {
    /// Скорость лидера относительно нас (положительная - отрываемся)
    pub fn relative_speed(&self) -> f32 {
        self.lead.speed_ms - self.ego.speed_ms
    }

    pub fn relative_acc(&self) -> f32 {
        self.lead.acc_ms2 - self.ego.acc_ms2
    }

    /// Идеальная дистанция: путь за `headway_s` на нашей скорости,
    /// но не меньше `min_distance_m`
    pub fn ideal_distance(&self, headway_s: f32, min_distance_m: f32) -> f32 {
        (self.ego.speed_ms * headway_s).max(min_distance_m)
    }

    pub fn distance_ratio(&self, headway_s: f32, min_distance_m: f32) -> f32 {
        self.distance_m / self.ideal_distance(headway_s, min_distance_m)
    }
}

/// Случайные события заезда
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveEvent {
    /// Лидер перестроился, дистанция выросла
    LeadLeft { gap_m: f32 },
    /// Перед нами вклинилась другая машина
    CutIn,
    /// Лидер начал разгон или торможение
    LeadAccChange { acc_ms2: f32, steps: u32 },
}

/// Запись одного шага заезда
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub step: u32,
    /// Состояние в начале шага, до событий и регулятора
    pub before: DriveState,
    /// Входы регулятора
    pub relative_speed: f32,
    pub distance_ratio: f32,
    /// Выход регулятора
    pub ego_acc_ms2: f32,
    /// Состояние после шага
    pub state: DriveState,
    pub events: Vec<DriveEvent, MAX_EVENTS_PER_STEP>,
    pub collision: bool,
}

/// Итоги заезда
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveReport {
    pub steps: u32,
    /// Сумма квадратов (1 - отношение дистанции)
    pub distance_error: f32,
    /// Сумма квадратов нашего ускорения
    pub comfort: f32,
    pub collisions: u32,
    pub lead_departures: u32,
    pub cut_ins: u32,
    pub lead_acc_changes: u32,
}

impl DriveReport {
    /// Столкновений в секунду
    pub fn collision_rate(&self) -> f32 {
        if self.steps == 0 {
            0.0
        } else {
            self.collisions as f32 / self.steps as f32
        }
    }
}
